//! Orientation-to-scroll mapping.
//!
//! Each tilt reading nudges the offset by `beta * sensitivity`, then the
//! result is clamped to `[0, max_offset]`. The mapping is incremental: a
//! device held at a steady angle keeps scrolling until it hits a bound.

use crate::options::ScrollOptions;
use crate::sensor::OrientationReading;
use crate::viewport::ViewportClass;

/// Owns the scroll offset of the panel stack.
#[derive(Debug, Clone, PartialEq)]
pub struct TiltScroller {
    offset: f32,
    sensitivity: f32,
    max_offset: f32,
}

impl TiltScroller {
    /// Scroller at offset 0. A negative `max_offset` is treated as 0.
    #[must_use]
    pub fn new(options: &ScrollOptions) -> Self {
        Self {
            offset: 0.0,
            sensitivity: options.sensitivity,
            max_offset: options.max_offset.max(0.0),
        }
    }

    /// Current offset, always within `[0, max_offset]`.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Upper clamp bound.
    #[must_use]
    pub fn max_offset(&self) -> f32 {
        self.max_offset
    }

    /// Apply one reading. Returns `true` if the offset changed.
    ///
    /// Readings are ignored on desktop viewports and when the tilt angle is
    /// missing or not finite.
    pub fn apply(
        &mut self,
        reading: OrientationReading,
        class: ViewportClass,
    ) -> bool {
        if !class.is_mobile() {
            return false;
        }
        let Some(beta) = reading.beta.filter(|b| b.is_finite()) else {
            return false;
        };
        let next =
            (self.offset + beta * self.sensitivity).clamp(0.0, self.max_offset);
        if next == self.offset {
            return false;
        }
        self.offset = next;
        true
    }

    /// Jump back to the first panel.
    pub fn reset(&mut self) {
        self.offset = 0.0;
    }

    /// Swap in new constants, re-clamping the current offset.
    pub fn set_options(&mut self, options: &ScrollOptions) {
        self.sensitivity = options.sensitivity;
        self.max_offset = options.max_offset.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_offset);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn tilt(beta: f32) -> OrientationReading {
        OrientationReading::new(Some(beta))
    }

    fn scroller() -> TiltScroller {
        TiltScroller::new(&ScrollOptions::default())
    }

    #[test]
    fn reading_moves_offset_by_beta_times_sensitivity() {
        let mut s = scroller();
        assert!(s.apply(tilt(50.0), ViewportClass::Mobile));
        assert!((s.offset() - 1.0).abs() < 1e-6);
        assert!(s.apply(tilt(-25.0), ViewportClass::Mobile));
        assert!((s.offset() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn offset_clamps_at_both_ends() {
        let mut s = scroller();
        assert!(!s.apply(tilt(-90.0), ViewportClass::Mobile));
        assert_eq!(s.offset(), 0.0);

        for _ in 0..20 {
            let _ = s.apply(tilt(90.0), ViewportClass::Mobile);
        }
        assert_eq!(s.offset(), 10.0);
        assert!(!s.apply(tilt(90.0), ViewportClass::Mobile));
    }

    #[test]
    fn desktop_ignores_tilt() {
        let mut s = scroller();
        assert!(!s.apply(tilt(45.0), ViewportClass::Desktop));
        assert_eq!(s.offset(), 0.0);
    }

    #[test]
    fn missing_or_non_finite_beta_is_noop() {
        let mut s = scroller();
        let _ = s.apply(tilt(50.0), ViewportClass::Mobile);
        let before = s.offset();
        assert!(!s.apply(OrientationReading::new(None), ViewportClass::Mobile));
        assert!(!s.apply(tilt(f32::NAN), ViewportClass::Mobile));
        assert!(!s.apply(tilt(f32::INFINITY), ViewportClass::Mobile));
        assert_eq!(s.offset(), before);
    }

    #[test]
    fn reclassification_takes_effect_immediately() {
        let mut s = scroller();
        let _ = s.apply(tilt(50.0), ViewportClass::Mobile);
        let _ = s.apply(tilt(50.0), ViewportClass::Desktop);
        assert!((s.offset() - 1.0).abs() < 1e-6);
        let _ = s.apply(tilt(50.0), ViewportClass::Mobile);
        assert!((s.offset() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn shrinking_max_reclamps() {
        let mut s = scroller();
        for _ in 0..10 {
            let _ = s.apply(tilt(90.0), ViewportClass::Mobile);
        }
        s.set_options(&ScrollOptions {
            sensitivity: 0.02,
            max_offset: 4.0,
        });
        assert_eq!(s.offset(), 4.0);
        s.reset();
        assert_eq!(s.offset(), 0.0);
    }

    proptest! {
        #[test]
        fn offset_stays_in_bounds(
            betas in prop::collection::vec(
                prop::option::of(-180.0f32..180.0), 0..200),
        ) {
            let mut s = scroller();
            for beta in betas {
                let _ = s.apply(OrientationReading::new(beta), ViewportClass::Mobile);
                prop_assert!(s.offset() >= 0.0);
                prop_assert!(s.offset() <= s.max_offset());
            }
        }

        #[test]
        fn desktop_offset_never_changes(
            betas in prop::collection::vec(any::<f32>(), 0..200),
        ) {
            let mut s = scroller();
            for beta in betas {
                let _ = s.apply(tilt(beta), ViewportClass::Desktop);
            }
            prop_assert_eq!(s.offset(), 0.0);
        }
    }
}
