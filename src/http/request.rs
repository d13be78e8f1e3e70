//! Request handling.
//!
//! # Responsibilities
//! - Extract the request target used for routing and recording
//! - Enforce the `Content-Length` contract on recorded requests
//! - Read and parse the JSON body
//!
//! # Design Decisions
//! - The body length comes only from `Content-Length`; chunked bodies without
//!   it are rejected
//! - Exactly the declared number of bytes is read
//! - A length header hyper cannot parse never gets here: hyper replies
//!   `400 Bad Request` itself

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, Uri};
use serde_json::Value;

use crate::recording::RecordError;

/// Request target as sent by the client: path plus query, if any.
pub fn target(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

/// Declared body length.
pub fn content_length(headers: &HeaderMap) -> Result<usize, RecordError> {
    let value = headers
        .get(header::CONTENT_LENGTH)
        .ok_or(RecordError::MissingContentLength)?;

    let text = value.to_str().map_err(|_| {
        RecordError::InvalidContentLength(String::from_utf8_lossy(value.as_bytes()).into_owned())
    })?;

    text.trim()
        .parse::<usize>()
        .map_err(|_| RecordError::InvalidContentLength(text.to_string()))
}

/// Read exactly `Content-Length` bytes and parse them as JSON.
pub async fn read_json_body(request: Request<Body>) -> Result<Value, RecordError> {
    let expected = content_length(request.headers())?;

    let bytes = axum::body::to_bytes(request.into_body(), expected)
        .await
        .map_err(RecordError::Body)?;

    if bytes.len() < expected {
        return Err(RecordError::TruncatedBody {
            expected,
            received: bytes.len(),
        });
    }

    Ok(serde_json::from_slice(&bytes)?)
}
