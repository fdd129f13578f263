//! The two cube scenes and the GL resources they share.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::engine::config::DemoConfig;
use crate::engine::mesh::{GLMesh, Geometry};
use crate::engine::shader::GLShaderProgram;

pub mod room;
pub mod spin;

/// Locations of the bundled shaders and textures under an assets root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    root: PathBuf,
}

impl AssetPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &DemoConfig) -> Self {
        Self::new(config.assets_root.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn vertex_shader(&self) -> PathBuf {
        self.root.join("shaders").join("cube.vert")
    }

    pub fn fragment_shader(&self) -> PathBuf {
        self.root.join("shaders").join("cube.frag")
    }

    /// Cross-shaped 4x3 atlas wrapped around the room cube.
    pub fn room_texture(&self) -> PathBuf {
        self.root.join("textures").join("room.png")
    }

    pub fn metal_texture(&self) -> PathBuf {
        self.root.join("textures").join("metal.png")
    }
}

/// Shader program plus the uploaded cube mesh. Both demos draw every instance with it.
#[derive(Debug)]
pub struct CubeKit {
    pub program: GLShaderProgram,
    pub mesh: GLMesh,
}

impl CubeKit {
    /// Compiles the cube shaders and uploads the cube mesh. Needs a current GL context.
    pub fn load(assets: &AssetPaths) -> Result<Self> {
        let program = GLShaderProgram::from_files(&assets.vertex_shader(), &assets.fragment_shader())
            .with_context(|| format!("loading cube shaders from {}", assets.root().display()))?;
        let mesh = GLMesh::upload(&Geometry::cube());
        Ok(Self { program, mesh })
    }
}
