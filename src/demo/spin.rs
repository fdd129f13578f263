//! Clock-driven animation: four cubes tumbling about their own axes in front of a
//! fixed camera.

use anyhow::Result;

use crate::demo::{AssetPaths, CubeKit};
use crate::engine::camera::Camera;
use crate::engine::clock::FrameTime;
use crate::engine::config::WindowConfig;
use crate::engine::input::KeyboardState;
use crate::engine::object3d::Object3D;
use crate::engine::renderer::Scene;
use crate::engine::texture::Texture;

/// Base rotation rate; each cube scales it by its own multiplier.
pub const DEGREES_PER_SECOND: f64 = 60.0;

const TEXTURE_UNIT: u32 = 0;

pub fn window_config() -> WindowConfig {
    WindowConfig {
        title: "Spin".to_owned(),
        width: 800,
        height: 600,
        clear_color: [0.1, 0.2, 0.3, 1.0],
        ..WindowConfig::default()
    }
}

/// A cube plus the axis and relative speed it spins with.
#[derive(Debug, Clone)]
pub struct SpinningCube {
    pub object: Object3D,
    pub axis: [f32; 3],
    pub speed: f32,
}

impl SpinningCube {
    fn new(position: [f32; 3], scale: [f32; 3], axis: [f32; 3], speed: f32) -> Self {
        Self {
            object: Object3D::new()
                .with_position(position)
                .with_scale(scale)
                .with_texture_unit(TEXTURE_UNIT),
            axis,
            speed,
        }
    }

    /// Angle in degrees after `elapsed` seconds, wrapped into `0..360`.
    ///
    /// The product is formed in `f64` and only narrowed after wrapping.
    pub fn angle_at(&self, elapsed: f64) -> f32 {
        ((elapsed * DEGREES_PER_SECOND * f64::from(self.speed)) % 360.0) as f32
    }

    pub fn advance(&mut self, elapsed: f64) {
        let angle = self.angle_at(elapsed);
        self.object.set_axis_angle(self.axis, angle);
    }
}

pub fn spin_layout() -> Vec<SpinningCube> {
    vec![
        SpinningCube::new([-1.2, 0.6, 0.0], [0.6, 0.6, 0.6], [1.0, 0.0, 0.0], 1.0),
        SpinningCube::new([1.2, 0.6, 0.0], [0.6, 0.6, 0.6], [0.0, 1.0, 0.0], 1.5),
        SpinningCube::new([-1.2, -0.6, 0.0], [0.5, 0.5, 0.5], [0.0, 0.0, 1.0], 0.5),
        SpinningCube::new([1.2, -0.6, -0.5], [0.8, 0.4, 0.6], [1.0, 1.0, 0.0], 2.0),
    ]
}

pub struct SpinScene {
    kit: CubeKit,
    texture: Texture,
    camera: Camera,
    cubes: Vec<SpinningCube>,
}

impl SpinScene {
    /// Builds the GL resources. Needs a current GL context.
    pub fn new(assets: &AssetPaths, aspect: f32) -> Result<Self> {
        let kit = CubeKit::load(assets)?;
        let texture = Texture::load_or_placeholder(&assets.room_texture());

        let mut camera = Camera::new(aspect);
        camera.set_fov(60.0);
        camera.set_near_far(0.1, 100.0);
        camera.look_at([0.0, 0.0, 3.0], [0.0, 0.0, 0.0]);

        Ok(Self {
            kit,
            texture,
            camera,
            cubes: spin_layout(),
        })
    }
}

impl Scene for SpinScene {
    fn update(&mut self, time: &FrameTime, _keys: &KeyboardState) {
        for cube in &mut self.cubes {
            cube.advance(time.elapsed);
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    fn draw(&mut self) {
        self.kit.program.use_program();
        self.texture.bind(TEXTURE_UNIT);

        let proj_view = self.camera.proj_view_matrix();
        for cube in &mut self.cubes {
            cube.object.draw(&self.kit.program, &self.kit.mesh, &proj_view);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::math::matrixfuncs::{IDENTITY_QUAT, transform_point};

    #[test]
    fn angle_grows_sixty_degrees_per_second_scaled_by_speed() {
        let cubes = spin_layout();
        assert_eq!(cubes[0].angle_at(0.0), 0.0);
        assert!((cubes[0].angle_at(1.5) - 90.0).abs() < 1e-4);
        assert!((cubes[1].angle_at(1.0) - 90.0).abs() < 1e-4);
    }

    #[test]
    fn angle_wraps_after_full_turn() {
        let cubes = spin_layout();
        assert!((cubes[0].angle_at(7.0) - 60.0).abs() < 1e-3);
    }

    #[test]
    fn angle_stays_smooth_after_hours_of_runtime() {
        let cubes = spin_layout();
        // Ten hours plus half a second: exactly 30 degrees past a full turn
        assert!((cubes[0].angle_at(36_000.5) - 30.0).abs() < 1e-4);
        // One 60 Hz frame later the angle has moved by one degree
        assert!((cubes[0].angle_at(36_000.5 + 1.0 / 60.0) - 31.0).abs() < 1e-4);
    }

    #[test]
    fn advance_rotates_about_cube_axis() {
        let mut cube = spin_layout().remove(1);
        cube.advance(0.0);
        assert_eq!(cube.object.rotation, IDENTITY_QUAT);

        // Quarter turn about +Y, so +X swings round to -Z
        cube.advance(1.0);
        let m = cube.object.local_matrix();
        let centre = transform_point(&m, [0.0, 0.0, 0.0]);
        let p = transform_point(&m, [0.5, 0.0, 0.0]);
        assert!((p[0] - centre[0]).abs() < 1e-4);
        assert!((p[2] - centre[2] + 0.3).abs() < 1e-4);
    }

    #[test]
    fn every_cube_is_in_view() {
        let mut camera = Camera::new(800.0 / 600.0);
        camera.set_fov(60.0);
        camera.look_at([0.0, 0.0, 3.0], [0.0, 0.0, 0.0]);
        let proj_view = camera.proj_view_matrix();
        for cube in spin_layout() {
            let ndc = transform_point(&proj_view, cube.object.position);
            assert!(ndc.iter().all(|c| c.abs() < 1.0), "{:?} off screen", cube.object.position);
        }
    }
}
