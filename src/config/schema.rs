//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file, and
//! every section falls back to its defaults so an empty file is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::recording::MissingResponse;

/// Root configuration for the mock server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MockConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Where and how requests are recorded.
    pub recording: RecordingConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind host (IP address).
    pub host: String,

    /// TCP port. `0` asks the OS for a free one.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ListenerConfig {
    /// `host:port` as a single string.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Recording configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RecordingConfig {
    /// Directory record files are written to.
    pub dir: PathBuf,

    /// Process id file. Relative paths resolve against `dir`.
    pub pid_file: PathBuf,

    /// How records without a reply payload show the `response` field.
    pub missing_response: MissingResponse,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            pid_file: PathBuf::from("server.pid"),
            missing_response: MissingResponse::Omit,
        }
    }
}

impl RecordingConfig {
    /// Resolved location of the pid file.
    pub fn pid_path(&self) -> PathBuf {
        self.dir.join(&self.pid_file)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error, off).
    pub log_level: String,

    /// Suppress all diagnostic output.
    pub quiet: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            quiet: false,
        }
    }
}
