//! Request recording subsystem.
//!
//! # Data Flow
//! ```text
//! POST/PATCH request
//!     → counter.rs (reserve the next sequence number for the method)
//!     → record.rs (requestUrl + requestBody [+ response])
//!     → format.rs (JSON text with spaced separators)
//!     → store.rs (write post-<n>.json / patch-<n>.json)
//! ```
//!
//! # Design Decisions
//! - One counter per method, owned by the store rather than the process
//! - Sequence numbers are reserved before the body is read, so a failed
//!   request still consumes its number
//! - Writes happen outside the counter's critical section; completion order
//!   across connections is unordered

pub mod counter;
pub mod error;
pub mod format;
pub mod record;
pub mod store;

pub use counter::SequenceCounter;
pub use error::RecordError;
pub use record::{MissingResponse, RecordKind, RequestRecord};
pub use store::{RecordSlot, RecordStore};
