use serde::{Deserialize, Serialize};

/// Viewer actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML files stay readable:
/// ```toml
/// [keybindings.bindings]
/// ArrowDown = "tilt_forward"
/// Home = "reset_scroll"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Emit a simulated positive tilt (scrolls the panels up).
    TiltForward,
    /// Emit a simulated negative tilt (scrolls back toward the first panel).
    TiltBack,
    /// Return the scroll offset to zero.
    ResetScroll,
}

impl KeyAction {
    /// Simulated tilt angle for this action, or `None` for non-tilt
    /// actions.
    #[must_use]
    pub fn tilt_degrees(self, magnitude: f32) -> Option<f32> {
        match self {
            Self::TiltForward => Some(magnitude),
            Self::TiltBack => Some(-magnitude),
            Self::ResetScroll => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilt_actions_carry_signed_angle() {
        assert_eq!(KeyAction::TiltForward.tilt_degrees(15.0), Some(15.0));
        assert_eq!(KeyAction::TiltBack.tilt_degrees(15.0), Some(-15.0));
        assert_eq!(KeyAction::ResetScroll.tilt_degrees(15.0), None);
    }
}
