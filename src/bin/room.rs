use anyhow::Result;
use gl_cubes::demo::AssetPaths;
use gl_cubes::demo::room::{self, RoomScene};
use gl_cubes::engine::config::DemoConfig;
use gl_cubes::engine::logging::{LoggingConfig, init_logging};
use gl_cubes::engine::renderer::Renderer;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = DemoConfig::new(room::window_config()).with_env();
    let renderer = Renderer::new(&config.window)?;
    let scene = RoomScene::new(&AssetPaths::from_config(&config), config.window.aspect())?;

    renderer.run(scene) // blocks until the window closes
}
