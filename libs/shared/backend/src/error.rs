use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use shared_models::error::AppError;

/// Express-style HTML error pages carry the message as `Error: <msg><br>`.
static HTML_ERROR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Error: (.*?)<br>").expect("static regex is valid"));

const MAX_RAW_MESSAGE_CHARS: usize = 200;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

impl BackendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            BackendError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Single message suitable for a top-level banner.
    pub fn banner(&self, fallback: &str) -> String {
        match self {
            BackendError::Status { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Maps an upstream failure onto the portal's error, keeping `message`.
    ///
    /// Client errors pass through with their meaning; anything else is a
    /// bad gateway.
    pub fn into_app_error(self, message: String) -> AppError {
        match self.status() {
            Some(400) | Some(422) => AppError::BadRequest(message),
            Some(401) | Some(403) => AppError::Auth(message),
            Some(404) => AppError::NotFound(message),
            Some(409) => AppError::Conflict(message),
            _ => AppError::Backend(message),
        }
    }
}

/// Pulls a human-readable message out of an error response body.
///
/// Order: JSON `message`, JSON `error` (stringified when not a string), an
/// HTML `Error: ...<br>` capture, then the leading part of the raw body.
pub fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        match value {
            Value::Object(map) => {
                if let Some(Value::String(message)) = map.get("message") {
                    if !message.is_empty() {
                        return Some(message.clone());
                    }
                }
                return match map.get("error") {
                    Some(Value::String(error)) if !error.is_empty() => Some(error.clone()),
                    Some(Value::Null) | None => None,
                    Some(other) => Some(other.to_string()),
                };
            }
            Value::String(message) if !message.is_empty() => return Some(message),
            _ => return None,
        }
    }

    if let Some(captures) = HTML_ERROR.captures(trimmed) {
        if let Some(message) = captures.get(1) {
            return Some(message.as_str().to_string());
        }
    }

    Some(trimmed.chars().take(MAX_RAW_MESSAGE_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_json_message_then_error() {
        assert_eq!(
            extract_error_message(r#"{"message":"Email already registered","error":"dup"}"#),
            Some("Email already registered".to_string())
        );
        assert_eq!(
            extract_error_message(r#"{"error":"Invalid credentials"}"#),
            Some("Invalid credentials".to_string())
        );
        assert_eq!(
            extract_error_message(r#"{"error":{"code":11000}}"#),
            Some(r#"{"code":11000}"#.to_string())
        );
        assert_eq!(extract_error_message(r#"{"success":false}"#), None);
    }

    #[test]
    fn extracts_html_error_line() {
        let html = "<html><body><pre>Error: Doctor with this email already exists<br> &nbsp;at register</pre></body></html>";
        assert_eq!(
            extract_error_message(html),
            Some("Doctor with this email already exists".to_string())
        );
    }

    #[test]
    fn truncates_unstructured_bodies() {
        let body = "x".repeat(500);
        let message = extract_error_message(&body).unwrap();
        assert_eq!(message.len(), MAX_RAW_MESSAGE_CHARS);
        assert_eq!(extract_error_message("   "), None);
    }

    #[test]
    fn status_errors_map_to_app_errors() {
        let err = BackendError::Status { status: 404, message: String::new() };
        assert!(err.is_not_found());
        let message = err.banner("Failed to retrieve hospital");
        assert!(matches!(err.into_app_error(message), AppError::NotFound(m) if m == "Failed to retrieve hospital"));

        let err = BackendError::Status { status: 401, message: "Invalid token".into() };
        let message = err.banner("Login failed");
        assert!(matches!(err.into_app_error(message), AppError::Auth(m) if m == "Invalid token"));

        let err = BackendError::Status { status: 400, message: "Email already registered".into() };
        let message = err.banner("Failed to register doctor");
        assert!(matches!(err.into_app_error(message), AppError::BadRequest(m) if m == "Email already registered"));

        let err = BackendError::Status { status: 409, message: "Username taken".into() };
        let message = err.banner("Failed to register hospital");
        assert!(matches!(err.into_app_error(message), AppError::Conflict(m) if m == "Username taken"));

        let err = BackendError::Status { status: 500, message: "boom".into() };
        let message = err.banner("Login failed");
        assert!(matches!(err.into_app_error(message), AppError::Backend(m) if m == "boom"));
    }
}
