//! Group transform shared by every panel.

use glam::{Mat4, Vec3};

/// Transform applied to the whole panel stack.
///
/// Written once per frame from the scroll offset and the viewport scale.
/// The translation is applied after the scale, so scrolling by one unit
/// moves every panel by one world unit regardless of scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelGroup {
    offset_y: f32,
    scale: f32,
}

impl Default for PanelGroup {
    fn default() -> Self {
        Self {
            offset_y: 0.0,
            scale: 1.0,
        }
    }
}

impl PanelGroup {
    /// Overwrite the group's vertical position and uniform scale.
    pub fn write(&mut self, offset_y: f32, scale: f32) {
        self.offset_y = offset_y;
        self.scale = scale;
    }

    /// Vertical position of the group origin.
    #[must_use]
    pub fn offset_y(&self) -> f32 {
        self.offset_y
    }

    /// Uniform scale.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Group-local to world transform.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.offset_y, 0.0))
            * Mat4::from_scale(Vec3::splat(self.scale))
    }

    /// Map a group-local point to world space.
    #[must_use]
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.model_matrix().transform_point3(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DEFAULT_PANELS;

    #[test]
    fn panel_world_y_is_offset_minus_scaled_spacing() {
        let mut group = PanelGroup::default();
        group.write(4.5, 0.7);
        for (i, panel) in DEFAULT_PANELS.iter().enumerate() {
            let world = group.to_world(panel.position);
            let expected = 4.5 - 3.0 * i as f32 * 0.7;
            assert!((world.y - expected).abs() < 1e-5);
            assert_eq!(world.x, 0.0);
        }
    }

    #[test]
    fn default_group_is_identity() {
        assert_eq!(PanelGroup::default().model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn write_overwrites_previous_state() {
        let mut group = PanelGroup::default();
        group.write(3.0, 0.7);
        group.write(1.0, 1.0);
        assert_eq!(group.offset_y(), 1.0);
        assert_eq!(group.scale(), 1.0);
    }
}
