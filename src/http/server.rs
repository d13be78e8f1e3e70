//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Accept connections and serve each on its own task
//! - Speak HTTP/1.1 via hyper, one request per connection
//! - Dispatch requests through the route table
//! - Record POST/PATCH requests and send the route's reply
//! - Drop the connection, without a response, for ignored methods and faults

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;
use tracing::Instrument;

use crate::config::MockConfig;
use crate::http::{request, response};
use crate::net::Listener;
use crate::recording::{RecordError, RecordKind, RecordStore, RequestRecord};
use crate::routing::{Dispatch, Reply, RouteTable};

/// Why a request ended without a response.
///
/// Returned as the hyper service error, which closes the connection without
/// writing anything back.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("{0} requests get no reply")]
    NoReply(Method),
}

/// State shared by every connection task.
#[derive(Debug)]
struct ServerState {
    routes: RouteTable,
    store: RecordStore,
}

/// The recording mock server.
///
/// Cheap to clone; clones share the route table and the record counters.
#[derive(Debug, Clone)]
pub struct MockServer {
    state: Arc<ServerState>,
}

impl MockServer {
    /// Create a server with the standard route table.
    pub fn new(config: &MockConfig) -> Self {
        let store = RecordStore::new(
            config.recording.dir.clone(),
            config.recording.missing_response,
        );
        Self::with_routes(RouteTable::standard(), store)
    }

    /// Create a server from explicit parts.
    pub fn with_routes(routes: RouteTable, store: RecordStore) -> Self {
        Self {
            state: Arc::new(ServerState { routes, store }),
        }
    }

    /// The store this server records into.
    pub fn store(&self) -> &RecordStore {
        &self.state.store
    }

    /// Run the server, accepting connections on the given listener forever.
    pub async fn run(self, listener: Listener) {
        match listener.local_addr() {
            Ok(addr) => tracing::info!(
                address = %addr,
                record_dir = %self.store().dir().display(),
                "HTTP server starting"
            ),
            Err(e) => tracing::warn!(error = %e, "Listener has no local address"),
        }

        loop {
            match listener.accept().await {
                Ok((stream, peer_addr, connection_id)) => {
                    let span = tracing::info_span!(
                        "connection",
                        connection_id = %connection_id,
                        peer_addr = %peer_addr
                    );
                    tokio::spawn(self.clone().serve_connection(stream).instrument(span));
                }
                Err(e) => {
                    tracing::error!(error = %e, "Accept failed");
                }
            }
        }
    }

    async fn serve_connection(self, stream: TcpStream) {
        let service = service_fn(move |request: Request<Incoming>| {
            let server = self.clone();
            async move { server.handle(request.map(Body::new)).await }
        });

        let result = http1::Builder::new()
            .keep_alive(false)
            .serve_connection(TokioIo::new(stream), service)
            .await;

        match result {
            Ok(()) => tracing::trace!("Connection closed"),
            Err(e) => tracing::debug!(error = %e, "Connection closed without a response"),
        }
    }

    /// Handle one request.
    ///
    /// An `Err` means no response must be sent for this request.
    pub async fn handle(&self, request: Request<Body>) -> Result<Response<Body>, HandlerError> {
        let method = request.method().clone();
        let target = request::target(request.uri());

        match self.state.routes.dispatch(&method, &target) {
            Dispatch::Record { kind, reply } => {
                let result = self.record(kind, reply, target.clone(), request).await;
                if let Err(e) = &result {
                    tracing::error!(
                        method = %method,
                        target = %target,
                        error = %e,
                        "Failed to record request"
                    );
                }
                result.map_err(HandlerError::from)
            }
            Dispatch::Ignore => {
                tracing::debug!(method = %method, target = %target, "Ignoring request");
                Err(HandlerError::NoReply(method))
            }
            Dispatch::Unsupported => {
                tracing::warn!(method = %method, target = %target, "Unsupported method");
                Ok(response::not_implemented(&method))
            }
        }
    }

    async fn record(
        &self,
        kind: RecordKind,
        reply: Reply,
        target: String,
        request: Request<Body>,
    ) -> Result<Response<Body>, RecordError> {
        let slot = self.state.store.reserve(kind);
        let body = request::read_json_body(request).await?;

        let record = RequestRecord::new(target, body, reply.payload().cloned());
        self.state.store.write(&slot, &record).await?;

        response::recorded(&reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::MissingResponse;
    use crate::routing::RUNS_PATH;
    use axum::http::{header, StatusCode};
    use serde_json::{json, Value};
    use std::path::Path;

    fn server_in(dir: &Path) -> MockServer {
        MockServer::with_routes(
            RouteTable::standard(),
            RecordStore::new(dir, MissingResponse::Omit),
        )
    }

    fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_LENGTH, body.len())
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn read_record(dir: &Path, name: &str) -> Value {
        serde_json::from_slice(&std::fs::read(dir.join(name)).unwrap()).unwrap()
    }

    async fn body_text(response: Response<Body>) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn runs_route_records_and_replies() {
        let dir = tempfile::tempdir().unwrap();
        let server = server_in(dir.path());

        let response = server
            .handle(json_request(Method::POST, RUNS_PATH, r#"{"x": 1}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(body_text(response).await, r#"{"id": "1234"}"#);

        assert_eq!(
            read_record(dir.path(), "post-0.json"),
            json!({
                "requestUrl": RUNS_PATH,
                "requestBody": {"x": 1},
                "response": {"id": "1234"}
            })
        );
    }

    #[tokio::test]
    async fn other_post_route_replies_empty() {
        let dir = tempfile::tempdir().unwrap();
        let server = server_in(dir.path());

        let response = server
            .handle(json_request(Method::POST, "/other/route", r#"{"y": 2}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "");

        let record = read_record(dir.path(), "post-0.json");
        assert_eq!(record, json!({"requestUrl": "/other/route", "requestBody": {"y": 2}}));
        assert!(record.get("response").is_none());
    }

    #[tokio::test]
    async fn patch_uses_its_own_counter() {
        let dir = tempfile::tempdir().unwrap();
        let server = server_in(dir.path());

        server
            .handle(json_request(Method::POST, "/a", "{}"))
            .await
            .unwrap();
        for _ in 0..2 {
            let response = server
                .handle(json_request(Method::PATCH, "/anything", "{}"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_text(response).await, "");
        }

        assert_eq!(
            read_record(dir.path(), "patch-0.json"),
            json!({"requestUrl": "/anything", "requestBody": {}})
        );
        assert!(dir.path().join("patch-1.json").exists());
        assert!(!dir.path().join("patch-2.json").exists());
        assert_eq!(server.store().reserved(RecordKind::Post), 1);
        assert_eq!(server.store().reserved(RecordKind::Patch), 2);
    }

    #[tokio::test]
    async fn get_and_put_get_no_reply_and_no_record() {
        let dir = tempfile::tempdir().unwrap();
        let server = server_in(dir.path());

        for method in [Method::GET, Method::PUT] {
            let err = server
                .handle(json_request(method, RUNS_PATH, "{}"))
                .await
                .unwrap_err();
            assert!(matches!(err, HandlerError::NoReply(_)));
        }

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        assert_eq!(server.store().reserved(RecordKind::Post), 0);
    }

    #[tokio::test]
    async fn unsupported_method_gets_501() {
        let dir = tempfile::tempdir().unwrap();
        let server = server_in(dir.path());

        let response = server
            .handle(json_request(Method::DELETE, "/x", "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[tokio::test]
    async fn malformed_post_consumes_sequence_number() {
        let dir = tempfile::tempdir().unwrap();
        let server = server_in(dir.path());

        let no_length = Request::post("/x").body(Body::from("{}")).unwrap();
        let err = server.handle(no_length).await.unwrap_err();
        assert!(matches!(
            err,
            HandlerError::Record(RecordError::MissingContentLength)
        ));

        let err = server
            .handle(json_request(Method::POST, "/x", "not json"))
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::Record(RecordError::Json(_))));

        server
            .handle(json_request(Method::POST, "/x", r#"{"ok": true}"#))
            .await
            .unwrap();

        assert!(!dir.path().join("post-0.json").exists());
        assert!(!dir.path().join("post-1.json").exists());
        assert_eq!(
            read_record(dir.path(), "post-2.json")["requestBody"],
            json!({"ok": true})
        );
    }

    #[tokio::test]
    async fn short_in_memory_body_is_truncated_fault() {
        let dir = tempfile::tempdir().unwrap();
        let server = server_in(dir.path());

        let short = Request::post("/x")
            .header(header::CONTENT_LENGTH, 50)
            .body(Body::from(r#"{"a":"#))
            .unwrap();
        let err = server.handle(short).await.unwrap_err();
        assert!(matches!(
            err,
            HandlerError::Record(RecordError::TruncatedBody {
                expected: 50,
                received: 5
            })
        ));
        assert_eq!(server.store().reserved(RecordKind::Post), 1);
        assert!(!dir.path().join("post-0.json").exists());
    }

    #[tokio::test]
    async fn write_failure_is_a_fault() {
        let dir = tempfile::tempdir().unwrap();
        let server = server_in(&dir.path().join("missing"));

        let err = server
            .handle(json_request(Method::POST, RUNS_PATH, "{}"))
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::Record(RecordError::Write { .. })));
    }

    #[tokio::test]
    async fn clones_share_counters() {
        let dir = tempfile::tempdir().unwrap();
        let server = server_in(dir.path());
        let other = server.clone();

        server
            .handle(json_request(Method::POST, "/a", "1"))
            .await
            .unwrap();
        other
            .handle(json_request(Method::POST, "/b", "2"))
            .await
            .unwrap();

        assert_eq!(read_record(dir.path(), "post-0.json")["requestUrl"], "/a");
        assert_eq!(read_record(dir.path(), "post-1.json")["requestUrl"], "/b");
    }
}
