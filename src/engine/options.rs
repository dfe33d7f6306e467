//! Options methods for TiltScrollEngine

use super::TiltScrollEngine;
use crate::camera::Camera;
use crate::options::Options;

impl TiltScrollEngine {
    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace options and apply all changes to subsystems.
    ///
    /// Scroll constants and breakpoints apply immediately (the offset is
    /// re-clamped); camera and lighting apply on the next frame.
    pub fn set_options(&mut self, new: Options) {
        self.options = new;
        self.apply_options();
    }

    /// Push current option values to the scroll state and camera.
    fn apply_options(&mut self) {
        self.state.set_options(&self.options);
        let aspect = self.state.viewport().aspect();
        self.camera = Camera::from_options(&self.options.camera, aspect);
    }
}
