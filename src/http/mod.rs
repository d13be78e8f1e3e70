//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (hyper HTTP/1.1, one task per connection)
//!     → routing (method policy, route table)
//!     → request.rs (Content-Length, JSON body)
//!     → recording (sequence number, record file)
//!     → response.rs (200 + reply body)
//!     → Send to client, close connection
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use server::{HandlerError, MockServer};
