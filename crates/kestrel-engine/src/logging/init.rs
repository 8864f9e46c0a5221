use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses the `env_logger` filter syntax
/// (e.g. "warn", "kestrel_engine=debug,wgpu=warn") and takes precedence over
/// the `RUST_LOG` environment variable. `default_level` applies when neither
/// is present.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; subsequent calls are ignored.
///
/// Intended usage is early in `main`, before the runtime starts.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match (config.env_filter, std::env::var("RUST_LOG").ok()) {
            (Some(filter), _) => {
                builder.parse_filters(&filter);
            }
            (None, Some(filter)) => {
                builder.parse_filters(&filter);
            }
            (None, None) => {
                builder.filter_level(config.default_level);
            }
        }

        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized");
    });
}
