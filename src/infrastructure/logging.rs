//! Tracing subscriber setup.
//!
//! The filter directive comes from `RUST_LOG` when set, otherwise from the
//! merged configuration's logging section. Output always goes to stderr so
//! command output on stdout stays machine-readable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::domain::models::LoggingConfig;

fn directive(env: Option<String>, config: &LoggingConfig) -> String {
    env.unwrap_or_else(|| config.level.clone())
}

/// Initialize the global subscriber from the logging configuration.
///
/// `RUST_LOG` overrides the configured level when present. The configured
/// format selects json or human-readable output.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::new(directive(std::env::var("RUST_LOG").ok(), config));
    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
