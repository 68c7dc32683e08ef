//! Uniform view of a collaborator's reply.

use crate::error::WarroomError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// Outcome of a request that reached the server: `{ok, status, data}`.
///
/// `data` is the parsed JSON body, or `{"raw": <text>}` when the body is not JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub ok: bool,
    pub status: u16,
    pub data: Value,
}

impl ApiResponse {
    pub fn from_text(status: u16, text: &str) -> Self {
        let data = serde_json::from_str(text).unwrap_or_else(|_| json!({ "raw": text }));
        Self {
            ok: (200..300).contains(&status),
            status,
            data,
        }
    }

    /// Whether the body could not be parsed and was wrapped as `{raw}`.
    pub fn is_raw(&self) -> bool {
        matches!(&self.data, Value::Object(map) if map.len() == 1 && map.contains_key("raw"))
            && self.data["raw"].is_string()
    }

    /// Converts a non-success reply into a remote error carrying the body verbatim.
    pub fn into_success(self) -> Result<Self, WarroomError> {
        if self.ok {
            Ok(self)
        } else {
            Err(WarroomError::Remote {
                status: self.status,
                body: self.body_text(),
            })
        }
    }

    /// Decodes `data` into a typed value. A `{raw}` body is a malformed response.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, WarroomError> {
        if self.is_raw() {
            return Err(WarroomError::MalformedResponse(format!(
                "expected JSON, got: {}",
                self.body_text()
            )));
        }
        serde_json::from_value(self.data)
            .map_err(|e| WarroomError::MalformedResponse(e.to_string()))
    }

    /// The body as it should be shown to an operator.
    pub fn body_text(&self) -> String {
        match &self.data {
            Value::Object(map) if self.is_raw() => {
                map["raw"].as_str().unwrap_or_default().to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn to_pretty_string(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}
