//! Recording mock API server.
//!
//! A test fixture that stands in for the runs API during integration tests.
//! Every POST and PATCH it receives is written to a numbered JSON file
//! (`post-<n>.json`, `patch-<n>.json`) so the test can assert afterwards
//! exactly which requests the client sent.
//!
//! ```text
//!     Client ──▶ net::Listener ──▶ http::MockServer ──▶ routing::RouteTable
//!                                        │
//!                                        ├──▶ recording::RecordStore ──▶ post-<n>.json
//!                                        │
//!     Client ◀───────── 200 / reply ◀────┘
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod recording;
pub mod routing;

pub use config::MockConfig;
pub use http::MockServer;
pub use lifecycle::start;
