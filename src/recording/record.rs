//! The on-disk shape of a recorded request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::recording::format;

/// Which method family a record belongs to. Each kind has its own counter
/// and file name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Post,
    Patch,
}

impl RecordKind {
    /// File name prefix, e.g. `post` in `post-3.json`.
    pub fn prefix(self) -> &'static str {
        match self {
            RecordKind::Post => "post",
            RecordKind::Patch => "patch",
        }
    }

    /// File name for the given sequence number.
    pub fn file_name(self, seq: u64) -> String {
        format!("{}-{}.json", self.prefix(), seq)
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// How a record without a reply payload represents the `response` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingResponse {
    /// Leave the field out.
    #[default]
    Omit,
    /// Write `"response": null`.
    Null,
}

/// One recorded POST or PATCH request.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    /// Request target as received (path, plus query if any).
    pub request_url: String,

    /// Parsed JSON body.
    pub request_body: Value,

    /// Payload sent back to the client, for routes that reply with one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

impl RequestRecord {
    pub fn new(
        request_url: impl Into<String>,
        request_body: Value,
        response: Option<Value>,
    ) -> Self {
        Self {
            request_url: request_url.into(),
            request_body,
            response,
        }
    }

    /// Render the record as file contents.
    pub fn to_json(&self, missing: MissingResponse) -> serde_json::Result<Vec<u8>> {
        match (missing, &self.response) {
            (MissingResponse::Null, None) => {
                let mut value = serde_json::to_value(self)?;
                if let Value::Object(fields) = &mut value {
                    fields.insert("response".to_string(), Value::Null);
                }
                format::to_vec(&value)
            }
            _ => format::to_vec(self),
        }
    }
}
