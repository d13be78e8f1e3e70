//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Decide per method whether a request is recorded, ignored or rejected
//! - Look up the reply strategy for recorded requests
//! - Fall back to an empty reply for unknown targets

use std::collections::HashMap;

use axum::http::Method;
use serde_json::{json, Value};

use crate::recording::RecordKind;

/// Target of the run-creation endpoint.
pub const RUNS_PATH: &str = "/api/v0/spaces/front/runs";

/// Run id handed back by the run-creation endpoint.
pub const RUN_ID: &str = "1234";

/// What a recorded request sends back.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Reply {
    /// `200` with no body.
    #[default]
    Empty,
    /// `200` with this JSON document as body; also stored in the record.
    Json(Value),
}

impl Reply {
    /// The payload to store in the record's `response` field, if any.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Reply::Empty => None,
            Reply::Json(value) => Some(value),
        }
    }
}

/// Result of routing one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Record the request under `kind` and answer with `reply`.
    Record { kind: RecordKind, reply: Reply },
    /// Accept the request but send nothing back.
    Ignore,
    /// Method this server does not implement.
    Unsupported,
}

/// Maps (method, target) pairs to reply strategies.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<(Method, String), Reply>,
}

impl RouteTable {
    /// An empty table: every recorded request replies empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// The table the fixture serves: run creation answers with a run id.
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.insert(Method::POST, RUNS_PATH, Reply::Json(json!({ "id": RUN_ID })));
        table
    }

    /// Register `reply` for an exact method and target.
    pub fn insert(&mut self, method: Method, target: impl Into<String>, reply: Reply) {
        self.routes.insert((method, target.into()), reply);
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Route a request by method and target.
    pub fn dispatch(&self, method: &Method, target: &str) -> Dispatch {
        let kind = match method {
            &Method::POST => RecordKind::Post,
            &Method::PATCH => RecordKind::Patch,
            &Method::GET | &Method::PUT => return Dispatch::Ignore,
            _ => return Dispatch::Unsupported,
        };

        let reply = self
            .routes
            .get(&(method.clone(), target.to_string()))
            .cloned()
            .unwrap_or_default();

        Dispatch::Record { kind, reply }
    }
}
