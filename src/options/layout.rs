//! `[layout]` section: mobile breakpoint and panel scale.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Responsive layout breakpoints, in logical pixels.
pub struct LayoutOptions {
    /// Widest viewport still treated as mobile (tilt scrolling active).
    pub mobile_max_width: f32,
    /// Viewports narrower than this get [`small_scale`](Self::small_scale).
    pub small_width: f32,
    /// Panel group scale on narrow viewports.
    pub small_scale: f32,
    /// Panel group scale everywhere else.
    pub normal_scale: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            mobile_max_width: 768.0,
            small_width: 600.0,
            small_scale: 0.7,
            normal_scale: 1.0,
        }
    }
}
