use anyhow::Result;
use gl_cubes::demo::AssetPaths;
use gl_cubes::demo::spin::{self, SpinScene};
use gl_cubes::engine::config::DemoConfig;
use gl_cubes::engine::logging::{LoggingConfig, init_logging};
use gl_cubes::engine::renderer::Renderer;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = DemoConfig::new(spin::window_config()).with_env();
    let renderer = Renderer::new(&config.window)?;

    // The renderer reports the real framebuffer size before the first frame
    let scene = SpinScene::new(&AssetPaths::from_config(&config), config.window.aspect())?;

    renderer.run(scene)
}
