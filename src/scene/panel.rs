//! The built-in panel stack and its shared style.

use glam::Vec3;

use super::Rgb;

/// One labeled slab in the stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    /// Label drawn on the front face.
    pub text: &'static str,
    /// Slab color.
    pub color: Rgb,
    /// Center of the panel in group-local space.
    pub position: Vec3,
}

/// Panel geometry and typography shared by every panel, in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelStyle {
    /// Slab width, height and depth.
    pub size: Vec3,
    /// Slab center relative to the panel position (pushed behind the text).
    pub slab_offset: Vec3,
    /// Text anchor relative to the panel position.
    pub text_offset: Vec3,
    /// Glyph em size.
    pub font_size: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    /// Wrap width for the label.
    pub max_text_width: f32,
    /// Label color.
    pub text_color: Rgb,
}

impl PanelStyle {
    /// Style of the built-in panel stack.
    pub const DEFAULT: Self = Self {
        size: Vec3::new(4.0, 2.0, 0.1),
        slab_offset: Vec3::new(0.0, 0.0, -0.05),
        text_offset: Vec3::new(0.0, 0.0, 0.1),
        font_size: 0.2,
        line_height: 1.5,
        max_text_width: 3.5,
        text_color: Rgb::new(0xff, 0xff, 0xff),
    };
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The built-in stack: five panels, three units apart.
pub const DEFAULT_PANELS: [Panel; 5] = [
    Panel {
        text: "Welcome to our tilt-scrolling adventure! Tilt your device to explore more.",
        color: Rgb::new(0xff, 0x6b, 0x6b),
        position: Vec3::new(0.0, 0.0, 0.0),
    },
    Panel {
        text: "Section 2: wgpu brings portable, GPU-accelerated rendering to Rust on native and the web alike.",
        color: Rgb::new(0x4e, 0xcd, 0xc4),
        position: Vec3::new(0.0, -3.0, 0.0),
    },
    Panel {
        text: "Section 3: This demo uses device orientation for a unique scrolling experience.",
        color: Rgb::new(0x45, 0xb7, 0xd1),
        position: Vec3::new(0.0, -6.0, 0.0),
    },
    Panel {
        text: "Section 4: Remember, this works best on mobile devices with gyroscope support!",
        color: Rgb::new(0xf9, 0xa6, 0x02),
        position: Vec3::new(0.0, -9.0, 0.0),
    },
    Panel {
        text: "Section 5: Thanks for exploring! Tilt back up to revisit previous sections.",
        color: Rgb::new(0x6c, 0x5c, 0xe7),
        position: Vec3::new(0.0, -12.0, 0.0),
    },
];
