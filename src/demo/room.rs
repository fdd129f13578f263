//! Keyboard-driven room: a large textured cube around the camera holding a table
//! and two chairs.
//!
//! Controls, one key per frame in this priority:
//! arrows move the camera (and its look target) sideways or forwards/backwards,
//! `W`/`S` tilt the look target up/down, `A`/`D` pan it left/right,
//! `Space` resets the view. `Escape` closes the window.

use anyhow::Result;

use crate::demo::{AssetPaths, CubeKit};
use crate::engine::camera::Camera;
use crate::engine::clock::FrameTime;
use crate::engine::config::WindowConfig;
use crate::engine::input::{Key, KeyboardState};
use crate::engine::object3d::Object3D;
use crate::engine::renderer::Scene;
use crate::engine::texture::Texture;

/// Distance the rig moves per frame while a key is held.
pub const CAMERA_STEP: f32 = 0.1;

/// Only the first held key in this list acts on a given frame.
pub const KEY_PRIORITY: [Key; 9] = [
    Key::Left,
    Key::Right,
    Key::Up,
    Key::Down,
    Key::W,
    Key::S,
    Key::A,
    Key::D,
    Key::Space,
];

/// Vertical field of view in radians, handed to the projection as-is.
///
/// `tan(45 rad)` wraps round to about 1.62, so this frames the room like a
/// ~116.6 degree view: the whole table is visible from the start position.
pub const ROOM_FOV_RADIANS: f32 = 90.0;

/// Texture unit holding the room atlas.
pub const ROOM_UNIT: u32 = 0;

/// Texture unit holding the metal texture used by the furniture.
pub const METAL_UNIT: u32 = 1;

pub fn window_config() -> WindowConfig {
    WindowConfig {
        title: "Room".to_owned(),
        width: 800,
        height: 800,
        ..WindowConfig::default()
    }
}

/// Eye and look-target offsets steered by the keyboard.
///
/// The eye sits at `(move_x, 0, move_z)` and looks at `(look_x, look_y, look_z)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub move_x: f32,
    pub move_z: f32,
    pub look_x: f32,
    pub look_y: f32,
    pub look_z: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            move_x: 0.0,
            move_z: 1.0,
            look_x: 0.0,
            look_y: 0.0,
            look_z: 0.0,
        }
    }
}

impl CameraRig {
    pub fn eye(&self) -> [f32; 3] {
        [self.move_x, 0.0, self.move_z]
    }

    pub fn target(&self) -> [f32; 3] {
        [self.look_x, self.look_y, self.look_z]
    }

    /// Applies the highest-priority held key, if any. Returns the key that acted.
    pub fn update(&mut self, keys: &KeyboardState) -> Option<Key> {
        let key = keys.first_down(&KEY_PRIORITY)?;
        self.apply(key);
        Some(key)
    }

    pub fn apply(&mut self, key: Key) {
        match key {
            Key::Left => {
                self.move_x -= CAMERA_STEP;
                self.look_x -= CAMERA_STEP;
            }
            Key::Right => {
                self.move_x += CAMERA_STEP;
                self.look_x += CAMERA_STEP;
            }
            Key::Up => {
                self.move_z -= CAMERA_STEP;
                self.look_z -= CAMERA_STEP;
            }
            Key::Down => {
                self.move_z += CAMERA_STEP;
                self.look_z += CAMERA_STEP;
            }
            Key::W => self.look_y += CAMERA_STEP,
            Key::S => self.look_y -= CAMERA_STEP,
            Key::A => self.look_x -= CAMERA_STEP,
            Key::D => self.look_x += CAMERA_STEP,
            Key::Space => *self = Self::default(),
            Key::Escape => {}
        }
    }
}

/// Room, table, front chair, back chair, in draw order.
pub fn room_layout() -> Vec<Object3D> {
    vec![
        Object3D::new()
            .with_scale([4.0, 4.0, 4.0])
            .with_texture_unit(ROOM_UNIT),
        Object3D::new()
            .with_position([0.0, -1.5, 0.0])
            .with_scale([1.75, 0.75, 1.0])
            .with_texture_unit(METAL_UNIT),
        Object3D::new()
            .with_position([0.0, -1.75, 1.0])
            .with_scale([0.5, 0.5, 0.5])
            .with_texture_unit(METAL_UNIT),
        Object3D::new()
            .with_position([0.0, -1.75, -1.0])
            .with_scale([0.5, 0.5, 0.5])
            .with_texture_unit(METAL_UNIT),
    ]
}

pub struct RoomScene {
    kit: CubeKit,
    room_texture: Texture,
    metal_texture: Texture,
    camera: Camera,
    rig: CameraRig,
    objects: Vec<Object3D>,
}

impl RoomScene {
    /// Builds the GL resources. Needs a current GL context.
    pub fn new(assets: &AssetPaths, aspect: f32) -> Result<Self> {
        let kit = CubeKit::load(assets)?;
        let room_texture = Texture::load_or_placeholder(&assets.room_texture());
        let metal_texture = Texture::load_or_placeholder(&assets.metal_texture());

        let rig = CameraRig::default();
        let mut camera = Camera::new(aspect);
        camera.set_fov_radians(ROOM_FOV_RADIANS);
        camera.set_near_far(0.1, 100.0);
        camera.look_at(rig.eye(), rig.target());

        Ok(Self {
            kit,
            room_texture,
            metal_texture,
            camera,
            rig,
            objects: room_layout(),
        })
    }
}

impl Scene for RoomScene {
    fn update(&mut self, _time: &FrameTime, keys: &KeyboardState) {
        if let Some(key) = self.rig.update(keys) {
            log::trace!("{key:?} -> eye {:?} target {:?}", self.rig.eye(), self.rig.target());
        }
        self.camera.look_at(self.rig.eye(), self.rig.target());
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    fn draw(&mut self) {
        self.kit.program.use_program();
        self.room_texture.bind(ROOM_UNIT);
        self.metal_texture.bind(METAL_UNIT);

        let proj_view = self.camera.proj_view_matrix();
        for object in &mut self.objects {
            object.draw(&self.kit.program, &self.kit.mesh, &proj_view);
        }
    }
}
