//! `[lighting]` section: background, ambient and point light.

use serde::{Deserialize, Serialize};

use crate::scene::Rgb;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Scene background and light setup.
pub struct LightingOptions {
    /// Clear color behind the panels.
    pub background: Rgb,
    /// Ambient light intensity (white).
    pub ambient: f32,
    /// World-space position of the point light.
    pub point_position: [f32; 3],
    /// Point light intensity (white, no falloff).
    pub point_intensity: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            background: Rgb::new(0x11, 0x11, 0x11),
            ambient: 0.5,
            point_position: [10.0, 10.0, 10.0],
            point_intensity: 1.0,
        }
    }
}
