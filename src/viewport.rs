//! Viewport classification and responsive panel scaling.
//!
//! All widths here are logical (CSS) pixels: physical size divided by the
//! host's scale factor. A phone reporting 1170 physical pixels at 3x is a
//! 390-pixel viewport.

use crate::options::LayoutOptions;

/// Whether the current viewport is treated as a tilt-capable mobile device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportClass {
    /// Narrow viewport; tilt readings drive the scroll offset.
    Mobile,
    /// Wide viewport; the panels stay put and a fallback message is shown.
    Desktop,
}

impl ViewportClass {
    /// Classify a viewport by its logical width. Widths up to and including
    /// `mobile_max_width` count as mobile, mirroring the media query
    /// `(max-width: <mobile_max_width>px)`.
    #[must_use]
    pub fn classify(logical_width: f32, mobile_max_width: f32) -> Self {
        if logical_width <= mobile_max_width {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    /// `true` for [`ViewportClass::Mobile`].
    #[must_use]
    pub fn is_mobile(self) -> bool {
        self == Self::Mobile
    }
}

/// Panel group scale for a viewport of the given logical width.
#[must_use]
pub fn scale_for_width(logical_width: f32, layout: &LayoutOptions) -> f32 {
    if logical_width < layout.small_width {
        layout.small_scale
    } else {
        layout.normal_scale
    }
}

/// Current surface size plus the host scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Surface width in physical pixels.
    pub width: u32,
    /// Surface height in physical pixels.
    pub height: u32,
    /// Physical pixels per logical pixel.
    pub scale_factor: f64,
}

impl Viewport {
    /// Viewport of `width` × `height` physical pixels. Zero dimensions are
    /// bumped to 1 and a non-positive scale factor is treated as 1.
    #[must_use]
    pub fn new(width: u32, height: u32, scale_factor: f64) -> Self {
        let scale_factor = if scale_factor > 0.0 && scale_factor.is_finite() {
            scale_factor
        } else {
            1.0
        };
        Self {
            width: width.max(1),
            height: height.max(1),
            scale_factor,
        }
    }

    /// Width in logical pixels.
    #[must_use]
    pub fn logical_width(&self) -> f32 {
        (f64::from(self.width) / self.scale_factor) as f32
    }

    /// Width / height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Mobile/desktop class under the given layout.
    #[must_use]
    pub fn class(&self, layout: &LayoutOptions) -> ViewportClass {
        ViewportClass::classify(self.logical_width(), layout.mobile_max_width)
    }

    /// Panel group scale under the given layout.
    #[must_use]
    pub fn panel_scale(&self, layout: &LayoutOptions) -> f32 {
        scale_for_width(self.logical_width(), layout)
    }
}
