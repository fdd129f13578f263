//! Perspective camera for the cube demos.
//!
//! The camera is described by an eye point, a target it looks at, and an up vector,
//! the same parameters `gluLookAt`-style code takes. All matrices are column-major
//! `[f32; 16]` ready for `glUniformMatrix4fv`.

use crate::engine::math::matrixfuncs::{look_at_matrix, matrix_mul_4x4, perspective_matrix};

/// Represents a perspective projection camera in a 3D scene.
///
/// This camera uses a right-handed coordinate system. The camera tracks:
/// - Eye, target and up vectors for the view transform
/// - Perspective projection parameters (field of view, aspect ratio, near/far planes)
///
/// # Example
/// ```
/// use gl_cubes::engine::camera::Camera;
///
/// let mut camera = Camera::new(16.0 / 9.0);
/// camera.set_fov(60.0);
/// let proj_view = camera.proj_view_matrix();
/// assert_eq!(proj_view.len(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct Camera {
    /// The camera's world-space position.
    pub eye: [f32; 3],

    /// The world-space point the camera faces.
    pub target: [f32; 3],

    /// World-space up direction, usually +Y.
    pub up: [f32; 3],

    /// Vertical field of view in radians.
    pub fov_y: f32,

    /// Aspect ratio of the view (width / height).
    pub aspect: f32,

    /// Distance to the near clipping plane.
    pub near: f32,

    /// Distance to the far clipping plane.
    pub far: f32,
}

impl Camera {
    /// Creates a new camera with default parameters and given aspect ratio.
    ///
    /// Defaults:
    /// - Eye: `[0.0, 0.0, 1.0]` looking at the origin, +Y up
    /// - FOV: 90 degrees vertical
    /// - Near/Far: 0.1 / 100.0
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: [0.0, 0.0, 1.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov_y: 90.0_f32.to_radians(),
            aspect,
            near: 0.1,
            far: 100.0,
        }
    }

    /// Points the camera from `eye` towards `target`.
    pub fn look_at(&mut self, eye: [f32; 3], target: [f32; 3]) {
        self.eye = eye;
        self.target = target;
    }

    /// Sets the camera's Near & Far ranges
    pub fn set_near_far(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
    }

    /// Sets the camera's FOV, given in degrees
    pub fn set_fov(&mut self, fov: f32) {
        self.fov_y = fov.to_radians();
    }

    /// Sets the camera's FOV directly in radians
    pub fn set_fov_radians(&mut self, fov: f32) {
        self.fov_y = fov;
    }

    /// Updates the aspect ratio from a framebuffer size.
    ///
    /// A zero-sized framebuffer (minimized window) leaves the aspect untouched.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Computes the view matrix from the eye, target and up vectors.
    ///
    /// This transform converts world-space coordinates into view-space,
    /// where the camera is at the origin looking down the negative Z-axis.
    pub fn view_matrix(&self) -> [f32; 16] {
        look_at_matrix(self.eye, self.target, self.up)
    }

    /// Computes the perspective projection matrix based on the camera's FOV, aspect ratio, and near/far planes.
    pub fn projection_matrix(&self) -> [f32; 16] {
        perspective_matrix(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Returns the combined projection * view matrix for transforming world-space coordinates
    /// directly into clip space.
    pub fn proj_view_matrix(&self) -> [f32; 16] {
        matrix_mul_4x4(&self.projection_matrix(), &self.view_matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::math::matrixfuncs::transform_point;

    #[test]
    fn target_projects_to_screen_centre() {
        let mut camera = Camera::new(1.0);
        camera.look_at([0.3, 0.2, 2.0], [-1.0, 0.5, -4.0]);
        let ndc = transform_point(&camera.proj_view_matrix(), camera.target);
        assert!(ndc[0].abs() < 1e-4);
        assert!(ndc[1].abs() < 1e-4);
        assert!(ndc[2] > -1.0 && ndc[2] < 1.0);
    }

    #[test]
    fn viewport_updates_aspect() {
        let mut camera = Camera::new(1.0);
        camera.set_viewport(1600, 900);
        assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn zero_viewport_keeps_previous_aspect() {
        let mut camera = Camera::new(1.5);
        camera.set_viewport(0, 600);
        camera.set_viewport(800, 0);
        assert_eq!(camera.aspect, 1.5);
    }

    #[test]
    fn radian_fov_is_stored_unchanged() {
        let mut camera = Camera::new(1.0);
        camera.set_fov_radians(90.0);
        assert_eq!(camera.fov_y, 90.0);
        assert!((camera.projection_matrix()[5] - 1.0 / 45.0_f32.tan()).abs() < 1e-6);
    }

    #[test]
    fn fov_is_stored_in_radians() {
        let mut camera = Camera::new(1.0);
        camera.set_fov(60.0);
        assert!((camera.fov_y - std::f32::consts::FRAC_PI_3).abs() < 1e-6);
    }
}
