//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept loop)
//!     → connection.rs (connection id for tracing)
//!     → Hand off to HTTP layer (one task per connection)
//! ```
//!
//! # Design Decisions
//! - No connection limit: every accepted connection gets its own task
//! - Plain TCP only

pub mod connection;
pub mod listener;

pub use connection::{ConnectionId, ConnectionIds};
pub use listener::{Listener, ListenerError};
