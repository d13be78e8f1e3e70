//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the bind host is an IP address
//! - Check the log level is one the subscriber understands
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MockConfig → Result<(), Vec<ValidationError>>

use std::net::IpAddr;

use crate::config::schema::MockConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.host {0:?} is not an IP address")]
    InvalidHost(String),

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error, off")]
    InvalidLogLevel(String),

    #[error("recording.pid_file must not be empty")]
    EmptyPidFile,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &MockConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.parse::<IpAddr>().is_err() {
        errors.push(ValidationError::InvalidHost(config.listener.host.clone()));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.recording.pid_file.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyPidFile);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
