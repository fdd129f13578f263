//! Window and asset configuration.
//!
//! Each demo starts from its own defaults and then applies `CUBES_*` environment
//! overrides. Values that fail to parse are logged and ignored.

use std::path::{Path, PathBuf};

pub const ENV_ASSETS: &str = "CUBES_ASSETS";
pub const ENV_WIDTH: &str = "CUBES_WIDTH";
pub const ENV_HEIGHT: &str = "CUBES_HEIGHT";
pub const ENV_VSYNC: &str = "CUBES_VSYNC";

/// Window and context settings handed to [`crate::engine::renderer::Renderer::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub clear_color: [f32; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Cubes".to_owned(),
            width: 800,
            height: 600,
            vsync: true,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl WindowConfig {
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Everything a demo binary needs before it opens a window.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub window: WindowConfig,
    /// Directory holding `shaders/` and `textures/`.
    pub assets_root: PathBuf,
}

impl DemoConfig {
    pub fn new(window: WindowConfig) -> Self {
        Self {
            window,
            assets_root: PathBuf::from("assets"),
        }
    }

    /// Applies overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(root) = lookup(ENV_ASSETS).filter(|s| !s.trim().is_empty()) {
            self.assets_root = PathBuf::from(root.trim());
        }
        if let Some(width) = lookup(ENV_WIDTH).and_then(|v| parse_dimension(ENV_WIDTH, &v)) {
            self.window.width = width;
        }
        if let Some(height) = lookup(ENV_HEIGHT).and_then(|v| parse_dimension(ENV_HEIGHT, &v)) {
            self.window.height = height;
        }
        if let Some(vsync) = lookup(ENV_VSYNC).and_then(|v| parse_flag(ENV_VSYNC, &v)) {
            self.window.vsync = vsync;
        }
        self
    }

    pub fn asset(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.assets_root.join(relative)
    }
}

fn parse_dimension(name: &str, value: &str) -> Option<u32> {
    match value.trim().parse::<u32>() {
        Ok(v) if v > 0 => Some(v),
        _ => {
            log::warn!("ignoring {name}={value:?}: expected a positive integer");
            None
        }
    }
}

fn parse_flag(name: &str, value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => {
            log::warn!("ignoring {name}={value:?}: expected 0/1/true/false");
            None
        }
    }
}
