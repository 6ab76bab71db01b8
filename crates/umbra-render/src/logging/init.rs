use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses `env_logger` filter syntax, e.g.
/// `"info,umbra_render=debug"`. When unset, `RUST_LOG` is consulted before
/// falling back to [`LoggingConfig::DEFAULT_FILTER`].
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl LoggingConfig {
    /// Info for the renderer, warnings only from the GPU stack.
    pub const DEFAULT_FILTER: &'static str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

    /// Turns on the per-frame statistics the renderer emits on debug frames.
    pub fn with_frame_stats(mut self) -> Self {
        let base = self.resolved_filter();
        self.env_filter = Some(format!("{base},umbra_render::renderer=debug"));
        self
    }

    fn resolved_filter(&self) -> String {
        self.env_filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| Self::DEFAULT_FILTER.to_string())
    }
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

/// Initializes the global logger once. Later calls are ignored, as is a
/// logger installed by someone else (a test harness, for instance).
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&config.resolved_filter());
        builder.write_style(config.write_style);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let config = LoggingConfig { env_filter: Some("warn".into()), ..LoggingConfig::default() };
        assert_eq!(config.resolved_filter(), "warn");
    }

    #[test]
    fn frame_stats_extend_the_filter() {
        let config = LoggingConfig { env_filter: Some("warn".into()), ..LoggingConfig::default() }.with_frame_stats();
        assert_eq!(config.env_filter.as_deref(), Some("warn,umbra_render::renderer=debug"));
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::default());
    }
}
