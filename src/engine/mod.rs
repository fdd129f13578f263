pub mod camera;
pub mod clock;
pub mod config;
pub mod input;
pub mod logging;
pub mod math;
pub mod mesh;
pub mod object3d;
pub mod renderer;
pub mod shader;
pub mod texture;
