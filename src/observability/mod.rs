//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields)
//!     → logging.rs (subscriber, filter)
//!     → stdout
//! ```
//!
//! Connection tasks run inside a `connection` span carrying
//! `connection_id` and `peer_addr`, so every event from a request is
//! attributable to its connection.

pub mod logging;

pub use logging::init_logging;
