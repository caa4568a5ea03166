//! Wire payloads exchanged with the message backend on `POST /api/chat`.
//!
//! ```text
//! request  → { "message": "hello", "timestamp": "2025-09-01T10:00:00.000Z" }
//! response ← { "response": "hi there" }
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Bot text shown when the backend answers without a usable `response`.
pub const NO_RESPONSE_TEXT: &str = "⚠️ No response from server.";

/// Bot text shown for every failed request (transport, status or body).
pub const CONNECTION_ERROR_TEXT: &str =
    "⚠️ Error connecting to server. Please check your backend configuration.";

// ---------------------------------------------------------------------------
// ChatRequest
// ---------------------------------------------------------------------------

/// Body of `POST /api/chat`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// Trimmed user text.
    pub message: String,
    /// ISO-8601 UTC instant at which the message was submitted.
    pub timestamp: String,
}

impl ChatRequest {
    /// Build a request stamped with the current time.
    pub fn new(message: impl Into<String>) -> Self {
        Self::at(message, Utc::now())
    }

    /// Build a request stamped with `at`.
    ///
    /// The timestamp uses millisecond precision and a `Z` suffix.
    pub fn at(message: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            message: message.into(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

// ---------------------------------------------------------------------------
// ChatReply
// ---------------------------------------------------------------------------

/// Successful reply body.
///
/// Only `response` is read; any other field the backend adds is ignored.
/// The body must be a JSON object: arrays, scalars and `null` are rejected
/// when deserializing.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(try_from = "Value")]
pub struct ChatReply {
    /// Reply text.  Usually a string, but kept loose so that odd backends
    /// still render something.
    pub response: Option<Value>,
}

impl TryFrom<Value> for ChatReply {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(mut map) => Ok(Self {
                response: map.remove("response"),
            }),
            other => Err(format!(
                "reply body must be a JSON object, got {}",
                json_kind(&other)
            )),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl ChatReply {
    /// Build a reply carrying a plain string.
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: Some(Value::String(response.into())),
        }
    }

    /// Text to display for this reply.
    ///
    /// Falls back to [`NO_RESPONSE_TEXT`] when `response` is absent or falsy
    /// (`null`, `false`, `0`, `""`).
    pub fn display_text(&self) -> String {
        match &self.response {
            None | Some(Value::Null | Value::Bool(false)) => NO_RESPONSE_TEXT.to_string(),
            Some(Value::String(s)) if s.is_empty() => NO_RESPONSE_TEXT.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => NO_RESPONSE_TEXT.to_string(),
            Some(other) => other.to_string(),
        }
    }
}
