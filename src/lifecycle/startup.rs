//! Startup orchestration.
//!
//! # Responsibilities
//! - Publish the process id before anything can connect
//! - Bind the listener
//! - Build the server around the configured record directory
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Pid file first, listener last (traffic only when discoverable)

use std::path::PathBuf;

use crate::config::MockConfig;
use crate::http::MockServer;
use crate::lifecycle::pidfile::write_pid_file;
use crate::net::{Listener, ListenerError};

/// Error type for startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to write pid file {}: {source}", path.display())]
    PidFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Listener(#[from] ListenerError),
}

/// A server that has published its pid and bound its listener.
#[derive(Debug)]
pub struct Started {
    pub pid: u32,
    pub server: MockServer,
    pub listener: Listener,
}

impl Started {
    /// Serve until the process is killed.
    pub async fn serve(self) {
        self.server.run(self.listener).await
    }
}

/// Write the pid file, bind the listener and build the server.
pub async fn start(config: &MockConfig) -> Result<Started, StartupError> {
    let pid_path = config.recording.pid_path();
    let pid = write_pid_file(&pid_path).map_err(|source| StartupError::PidFile {
        path: pid_path.clone(),
        source,
    })?;

    tracing::info!(pid, pid_file = %pid_path.display(), "Process id written");

    let listener = Listener::bind(&config.listener).await?;
    let server = MockServer::new(config);

    Ok(Started {
        pid,
        server,
        listener,
    })
}
