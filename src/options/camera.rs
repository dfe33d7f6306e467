//! `[camera]` section: fixed eye position and projection.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera placement and projection parameters.
pub struct CameraOptions {
    /// Eye position; the camera always looks down -Z from here.
    pub eye: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.0, 5.0],
            fovy: 75.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}
