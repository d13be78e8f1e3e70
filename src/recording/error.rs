//! Errors raised while recording a request.

use std::path::PathBuf;

/// A request that could not be recorded.
///
/// None of these are answered with an error status; the connection that
/// produced them is dropped instead.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("request has no Content-Length header")]
    MissingContentLength,

    /// Only reachable for requests built in-process. hyper answers an
    /// unparseable length header with `400 Bad Request` before the request
    /// is dispatched, so no sequence number is taken.
    #[error("invalid Content-Length header: {0:?}")]
    InvalidContentLength(String),

    /// Covers a connection closing mid-body: hyper reports it as a body
    /// error.
    #[error("failed to read request body: {0}")]
    Body(#[source] axum::Error),

    /// An in-memory body shorter than its declared length.
    #[error("request body ended after {received} of {expected} bytes")]
    TruncatedBody { expected: usize, received: usize },

    #[error("request body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write record {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
