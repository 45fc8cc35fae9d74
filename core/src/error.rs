//! Error types for the quiz API client.
//!
//! # Design
//! The backend reports every failure the same way, so `Request` carries the
//! already-unwrapped human-readable message rather than the raw body.
//! `Validation` is raised before any request is built. `Transport` is never
//! produced by the core itself; hosts use it when the round-trip fails.

use serde_json::Value;
use thiserror::Error;

/// Errors returned by `QuizClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required argument was missing; no request was built.
    #[error("{0}")]
    Validation(String),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Request { status: u16, message: String },

    /// The host could not complete the HTTP round-trip.
    #[error("{0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The text a screen should show for this error.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status for `Request` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pick the message for a failed response body.
///
/// Order: JSON `detail`, JSON `message`, raw text, then `default`. Falsy JSON
/// values (`null`, `false`, `0`, `""`) are skipped.
pub(crate) fn extract_message(body: &str, default: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(data) => ["detail", "message"]
            .iter()
            .filter_map(|key| data.get(key))
            .find_map(truthy_text)
            .unwrap_or_else(|| default.to_string()),
        Err(_) if !body.is_empty() => body.to_string(),
        Err(_) => default.to_string(),
    }
}

fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: &str = "Request failed";

    #[test]
    fn detail_wins_over_message() {
        let msg = extract_message(r#"{"detail":"Invalid credentials","message":"nope"}"#, DEFAULT);
        assert_eq!(msg, "Invalid credentials");
    }

    #[test]
    fn message_used_when_detail_missing() {
        assert_eq!(extract_message(r#"{"message":"Username taken"}"#, DEFAULT), "Username taken");
    }

    #[test]
    fn empty_detail_falls_through_to_message() {
        assert_eq!(extract_message(r#"{"detail":"","message":"m"}"#, DEFAULT), "m");
        assert_eq!(extract_message(r#"{"detail":null,"message":"m"}"#, DEFAULT), "m");
    }

    #[test]
    fn json_without_known_fields_uses_default() {
        assert_eq!(extract_message(r#"{"error":"x"}"#, DEFAULT), DEFAULT);
        assert_eq!(extract_message("[]", DEFAULT), DEFAULT);
    }

    #[test]
    fn raw_text_used_when_not_json() {
        assert_eq!(extract_message("Internal Server Error", DEFAULT), "Internal Server Error");
    }

    #[test]
    fn empty_body_uses_default() {
        assert_eq!(extract_message("", DEFAULT), DEFAULT);
    }

    #[test]
    fn structured_detail_is_rendered_as_json() {
        let msg = extract_message(r#"{"detail":[{"loc":["body","score"]}]}"#, DEFAULT);
        assert_eq!(msg, r#"[{"loc":["body","score"]}]"#);
    }

    #[test]
    fn request_error_displays_only_the_message() {
        let err = ApiError::Request {
            status: 401,
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn validation_error_has_no_status() {
        let err = ApiError::Validation("Missing required fields for username update".to_string());
        assert_eq!(err.message(), "Missing required fields for username update");
        assert_eq!(err.status(), None);
    }
}
