//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, target)
//!     → router.rs (method policy + route table lookup)
//!     → Return: Dispatch::{Record, Ignore, Unsupported}
//!
//! Route table (built at startup):
//!     (POST, "/api/v0/spaces/front/runs") → Reply::Json({"id": "1234"})
//!     anything else                      → Reply::Empty
//! ```
//!
//! # Design Decisions
//! - Table is immutable once the server is built (shared without locks)
//! - Exact target match only; no prefixes or patterns
//! - Unknown routes are not an error: they record and reply empty

pub mod router;

pub use router::{Dispatch, Reply, RouteTable, RUNS_PATH, RUN_ID};
