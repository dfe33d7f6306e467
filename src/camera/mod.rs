//! Fixed perspective camera.
//!
//! The camera never moves; scrolling is done by translating the panel
//! group instead. Besides the GPU uniform, the camera projects text anchors
//! to screen space for the label renderer.

/// GPU uniform buffer and bind group.
pub mod binding;
/// Core camera struct and GPU uniform types.
pub mod core;

pub use binding::CameraBinding;
pub use self::core::{Camera, CameraUniform};
