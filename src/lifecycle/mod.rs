//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Write pid file (pidfile.rs) → Bind listener → Build server
//!
//! Shutdown:
//!     None. The harness kills the process using the pid file.
//! ```

pub mod pidfile;
pub mod startup;

pub use pidfile::write_pid_file;
pub use startup::{start, Started, StartupError};
