use std::sync::Once;

/// Options for the `env_logger` backend.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directives, e.g. `"gl_cubes=debug"`. Takes precedence over `RUST_LOG`.
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Picks the filter directives to install; `None` means plain `info`.
fn filter_directives(explicit: Option<String>, rust_log: Option<String>) -> Option<String> {
    explicit.or(rust_log).filter(|f| !f.trim().is_empty())
}

/// Installs the global logger. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match filter_directives(config.env_filter, std::env::var("RUST_LOG").ok()) {
            Some(directives) => {
                builder.parse_filters(&directives);
            }
            None => {
                builder.filter_level(log::LevelFilter::Info);
            }
        }

        builder.write_style(config.write_style);
        // Test binaries may have installed a logger already
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logger installed");
    });
}
