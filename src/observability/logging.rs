//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Pick the filter from `RUST_LOG`, the config, or quiet mode
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Human-readable fmt output on stdout, next to the harness's own output
//! - Quiet mode wins over everything, including `RUST_LOG`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Filter directives for a config, ignoring the environment.
pub fn default_directives(config: &ObservabilityConfig) -> String {
    if config.quiet {
        "off".to_string()
    } else {
        format!("mock_api={}", config.log_level.to_ascii_lowercase())
    }
}

/// Build the filter: quiet mode, else `RUST_LOG`, else the configured level.
pub fn build_filter(config: &ObservabilityConfig) -> EnvFilter {
    if config.quiet {
        return EnvFilter::new("off");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directives(config).into())
}

/// Install the global subscriber. Call once, at startup.
pub fn init_logging(config: &ObservabilityConfig) {
    tracing_subscriber::registry()
        .with(build_filter(config))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
