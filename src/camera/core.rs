use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

use crate::options::CameraOptions;
use crate::viewport::Viewport;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and eye position.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position (w unused).
    pub position: [f32; 4],
}

impl Camera {
    /// Camera looking down -Z from `options.eye`.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        let eye = Vec3::from_array(options.eye);
        Self {
            eye,
            target: eye - Vec3::Z,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Build the combined view-projection matrix.
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }

    /// Unit vector from eye toward target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize()
    }

    /// Project a world point to physical pixel coordinates (origin top-left).
    /// `None` if the point is at or behind the eye plane.
    pub fn project(&self, world: Vec3, viewport: &Viewport) -> Option<Vec2> {
        let clip = self.build_matrix() * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.xy() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.width as f32,
            (1.0 - ndc.y) * 0.5 * viewport.height as f32,
        ))
    }

    /// Physical pixels covered by one world unit at the depth of `world`,
    /// measured vertically.
    pub fn pixels_per_unit(&self, world: Vec3, viewport: &Viewport) -> Option<f32> {
        let depth = (world - self.eye).dot(self.forward());
        if depth <= f32::EPSILON {
            return None;
        }
        let half_fov = (self.fovy.to_radians() * 0.5).tan();
        Some(viewport.height as f32 / (2.0 * depth * half_fov))
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 4],
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.eye.extend(1.0).to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_for(viewport: &Viewport) -> Camera {
        Camera::from_options(&CameraOptions::default(), viewport.aspect())
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let vp = Viewport::new(800, 600, 1.0);
        let cam = camera_for(&vp);
        assert_eq!(cam.eye, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(cam.forward(), Vec3::NEG_Z);
    }

    #[test]
    fn target_projects_to_viewport_center() {
        let vp = Viewport::new(800, 600, 1.0);
        let cam = camera_for(&vp);
        let p = cam.project(Vec3::ZERO, &vp).unwrap();
        assert!((p.x - 400.0).abs() < 1e-3);
        assert!((p.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn one_unit_up_matches_pixels_per_unit() {
        let vp = Viewport::new(800, 600, 1.0);
        let cam = camera_for(&vp);
        let ppu = cam.pixels_per_unit(Vec3::ZERO, &vp).unwrap();
        let expected = 600.0 / (2.0 * 5.0 * 37.5f32.to_radians().tan());
        assert!((ppu - expected).abs() < 1e-3);

        let up = cam.project(Vec3::Y, &vp).unwrap();
        assert!((300.0 - up.y - ppu).abs() < 1e-2);
    }

    #[test]
    fn points_behind_eye_do_not_project() {
        let vp = Viewport::new(800, 600, 1.0);
        let cam = camera_for(&vp);
        assert!(cam.project(Vec3::new(0.0, 0.0, 6.0), &vp).is_none());
        assert!(cam.pixels_per_unit(Vec3::new(0.0, 0.0, 6.0), &vp).is_none());
    }

    #[test]
    fn uniform_tracks_eye() {
        let vp = Viewport::new(800, 600, 1.0);
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera_for(&vp));
        assert_eq!(uniform.position, [0.0, 0.0, 5.0, 1.0]);
    }
}
