//! Response construction.
//!
//! # Responsibilities
//! - Build the `200` reply for recorded requests
//! - Build the `501` reply for methods the server does not implement

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Response, StatusCode};

use crate::recording::{format, RecordError};
use crate::routing::Reply;

/// `200 OK` with `Content-type: application/json` and the reply body, if any.
pub fn recorded(reply: &Reply) -> Result<Response<Body>, RecordError> {
    let body = match reply {
        Reply::Empty => Body::empty(),
        Reply::Json(value) => Body::from(format::to_vec(value)?),
    };

    let mut response = Response::new(body);
    *response.status_mut() = StatusCode::OK;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    Ok(response)
}

/// `501 Not Implemented` naming the rejected method.
pub fn not_implemented(method: &Method) -> Response<Body> {
    let mut response = Response::new(Body::from(format!("Unsupported method ('{}')", method)));
    *response.status_mut() = StatusCode::NOT_IMPLEMENTED;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}
