use crate::engine::math::matrixfuncs::{
    compute_local_matrix, matrix_mul_4x4, quat_from_axis_angle, IDENTITY_MATRIX, IDENTITY_QUAT,
};
use crate::engine::mesh::GLMesh;
use crate::engine::shader::GLShaderProgram;

/// Name of the combined projection * view * model uniform in the cube shader.
pub const TRANSFORM_UNIFORM: &str = "u_transform";

/// Name of the sampler uniform in the cube shader.
pub const TEXTURE_UNIFORM: &str = "u_texture";

/// One drawable cube instance: a transform plus the texture unit it samples from.
///
/// Position, rotation, and scale combine into the model matrix `T * R * S`.
/// The matrix is cached and only recomputed after a setter marks the object dirty.
#[derive(Debug, Clone)]
pub struct Object3D {
    /// World-space position (x, y, z).
    pub position: [f32; 3],

    /// Orientation as a unit quaternion [x, y, z, w].
    pub rotation: [f32; 4],

    /// Scale factors along x, y, z.
    pub scale: [f32; 3],

    /// Texture unit the sampler uniform is pointed at when this object draws.
    pub texture_unit: u32,

    /// Cached model matrix, column-major.
    local_matrix: [f32; 16],

    /// Set whenever position, rotation or scale change.
    dirty: bool,
}

impl Object3D {
    /// Creates an object at the origin with no rotation, unit scale and texture unit 0.
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: IDENTITY_QUAT,
            scale: [1.0, 1.0, 1.0],
            texture_unit: 0,
            local_matrix: IDENTITY_MATRIX,
            dirty: true,
        }
    }

    pub fn with_position(mut self, pos: [f32; 3]) -> Self {
        self.set_position(pos);
        self
    }

    pub fn with_scale(mut self, scale: [f32; 3]) -> Self {
        self.set_scale(scale);
        self
    }

    pub fn with_texture_unit(mut self, unit: u32) -> Self {
        self.texture_unit = unit;
        self
    }

    /// Updates the object's position and marks it dirty for recalculation.
    pub fn set_position(&mut self, pos: [f32; 3]) {
        self.position = pos;
        self.dirty = true;
    }

    /// Updates the object's rotation quaternion and marks it dirty.
    pub fn set_rotation(&mut self, rot: [f32; 4]) {
        self.rotation = rot;
        self.dirty = true;
    }

    /// Sets the rotation to `degrees` around `axis`.
    pub fn set_axis_angle(&mut self, axis: [f32; 3], degrees: f32) {
        self.set_rotation(quat_from_axis_angle(axis, degrees));
    }

    /// Updates the object's scale and marks it dirty.
    pub fn set_scale(&mut self, scale: [f32; 3]) {
        self.scale = scale;
        self.dirty = true;
    }

    /// Returns the model matrix, recomputing it first if the object is dirty.
    pub fn local_matrix(&mut self) -> [f32; 16] {
        if self.dirty {
            self.local_matrix = compute_local_matrix(self.position, self.rotation, self.scale);
            self.dirty = false;
        }
        self.local_matrix
    }

    /// Full clip-space transform for this object under `proj_view`.
    pub fn transform(&mut self, proj_view: &[f32; 16]) -> [f32; 16] {
        matrix_mul_4x4(proj_view, &self.local_matrix())
    }

    /// Uploads the transform and sampler uniforms, then draws `mesh`.
    ///
    /// The program must already be in use and the texture bound to `texture_unit`.
    pub fn draw(&mut self, shader: &GLShaderProgram, mesh: &GLMesh, proj_view: &[f32; 16]) {
        let transform = self.transform(proj_view);
        shader.set_uniform_matrix4(TRANSFORM_UNIFORM, &transform);
        shader.set_uniform_i32(TEXTURE_UNIFORM, self.texture_unit as i32);
        mesh.draw();
    }
}

impl Default for Object3D {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::math::matrixfuncs::transform_point;

    #[test]
    fn new_object_has_identity_transform() {
        let mut object = Object3D::new();
        assert_eq!(object.local_matrix(), IDENTITY_MATRIX);
    }

    #[test]
    fn setters_invalidate_cached_matrix() {
        let mut object = Object3D::new().with_position([1.0, 0.0, 0.0]);
        assert_eq!(transform_point(&object.local_matrix(), [0.0; 3]), [1.0, 0.0, 0.0]);

        object.set_scale([2.0, 2.0, 2.0]);
        assert_eq!(transform_point(&object.local_matrix(), [1.0, 0.0, 0.0]), [3.0, 0.0, 0.0]);
    }

    #[test]
    fn rotation_applies_between_scale_and_translation() {
        let mut object = Object3D::new()
            .with_position([0.0, 0.0, -2.0])
            .with_scale([2.0, 1.0, 1.0]);
        object.set_axis_angle([0.0, 0.0, 1.0], 90.0);
        let p = transform_point(&object.local_matrix(), [1.0, 0.0, 0.0]);
        assert!(p[0].abs() < 1e-5);
        assert!((p[1] - 2.0).abs() < 1e-5);
        assert!((p[2] + 2.0).abs() < 1e-5);
    }

    #[test]
    fn transform_premultiplies_proj_view() {
        let mut object = Object3D::new().with_position([0.0, 1.0, 0.0]);
        let proj_view = compute_local_matrix([5.0, 0.0, 0.0], IDENTITY_QUAT, [1.0; 3]);
        assert_eq!(transform_point(&object.transform(&proj_view), [0.0; 3]), [5.0, 1.0, 0.0]);
    }
}
