//! `mock-api` binary.
//!
//! Writes `server.pid`, then records every POST/PATCH it receives until the
//! harness kills it.

use std::path::PathBuf;

use clap::Parser;

use mock_api::config::{load_config, validate_config, ConfigError, MockConfig};
use mock_api::observability::init_logging;

#[derive(Parser, Debug)]
#[command(name = "mock-api")]
#[command(about = "Mock runs API that records every request to disk", long_about = None)]
struct Cli {
    /// Port to listen on [default: 8000]
    #[arg(long)]
    port: Option<u16>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for record files and the pid file [default: .]
    #[arg(long)]
    record_dir: Option<PathBuf>,

    /// Suppress all log output
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Load the config file, if any, and apply command-line overrides.
    fn into_config(self) -> Result<MockConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => MockConfig::default(),
        };

        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(dir) = self.record_dir {
            config.recording.dir = dir;
        }
        if self.quiet {
            config.observability.quiet = true;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    init_logging(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        record_dir = %config.recording.dir.display(),
        missing_response = ?config.recording.missing_response,
        "Configuration loaded"
    );

    let started = mock_api::start(&config).await?;
    started.serve().await;

    Ok(())
}
