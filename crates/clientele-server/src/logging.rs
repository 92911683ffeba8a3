//! Tracing subscriber setup.

use clientele_config::ObservabilityConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor the configured level is usable.
pub const DEFAULT_FILTER: &str = "info,clientele=debug,tower_http=debug";

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over the configured level. `log_format = "json"` switches
/// to one JSON object per line.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| build_filter(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Builds the filter for a configured level, keeping crate-level debug output.
fn build_filter(level: &str) -> EnvFilter {
    if level.eq_ignore_ascii_case("info") {
        return EnvFilter::new(DEFAULT_FILTER);
    }

    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_keeps_crate_debug() {
        assert_eq!(build_filter("info").to_string(), EnvFilter::new(DEFAULT_FILTER).to_string());
    }

    #[test]
    fn test_configured_level_is_used() {
        assert_eq!(build_filter("warn").to_string(), "warn");
    }
}
