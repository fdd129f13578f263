//! Two small OpenGL demos that draw textured cubes.
//!
//! `engine` holds the GL plumbing: window and context, shader program, cube mesh,
//! textures and hand-written matrix math. `demo` holds the two scenes built on it.

pub mod demo;
pub mod engine;
