//! Error Types
//!
//! Every failed request surfaces as an `ApiError`. Non-2xx responses are
//! terminal for the action that triggered them; the user re-submits.

use serde_json::Value;
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Server answered with a non-2xx status
    #[error("{message} (HTTP {status})")]
    Http { status: u16, message: String, body: Value },

    /// fetch() itself rejected: offline, DNS, CORS
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Browser error: {0}")]
    Browser(String),
}

impl ApiError {
    /// Build from a failed response. `text` is the raw body; JSON bodies are
    /// kept parsed, anything else is kept as a string.
    pub fn from_response(status: u16, status_text: &str, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        };
        let message = extract_message(&body)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if status_text.is_empty() {
                    "Request failed".to_string()
                } else {
                    status_text.to_string()
                }
            });
        ApiError::Http { status, message, body }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

}

/// Longest plain-text body shown as a message
const MAX_TEXT_MESSAGE: usize = 160;

/// Markup (proxy error pages) is dropped; long text is cut on a char boundary
fn text_message(text: &str) -> Option<String> {
    let text = text.trim();
    if text.starts_with('<') {
        return None;
    }
    if text.chars().count() <= MAX_TEXT_MESSAGE {
        return Some(text.to_string());
    }
    let cut: String = text.chars().take(MAX_TEXT_MESSAGE).collect();
    Some(format!("{}...", cut.trim_end()))
}

fn extract_message(body: &Value) -> Option<String> {
    match body {
        Value::String(s) => text_message(s),
        Value::Object(map) => ["message", "error", "detail"].iter().find_map(|key| match map.get(*key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(nested @ Value::Object(_)) => extract_message(nested),
            _ => None,
        }),
        _ => None,
    }
}

/// JS exceptions carry their message in different shapes
pub fn js_message(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = wasm_bindgen::JsCast::dyn_ref::<js_sys::Error>(value) {
        return String::from(err.message());
    }
    format!("{:?}", value)
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_message_is_used() {
        let err = ApiError::from_response(422, "Unprocessable Entity", r#"{"message":"phone already exists"}"#);
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.to_string(), "phone already exists (HTTP 422)");
        match err {
            ApiError::Http { body, .. } => assert_eq!(body, json!({"message": "phone already exists"})),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_nested_error_object() {
        let err = ApiError::from_response(400, "Bad Request", r#"{"error":{"detail":"vin invalid"}}"#);
        assert_eq!(err.to_string(), "vin invalid (HTTP 400)");
    }

    #[test]
    fn test_plain_text_and_empty_bodies() {
        let err = ApiError::from_response(502, "Bad Gateway", "upstream down");
        assert_eq!(err.to_string(), "upstream down (HTTP 502)");

        let err = ApiError::from_response(404, "Not Found", "");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Not Found (HTTP 404)");

        let err = ApiError::from_response(500, "", "{}");
        assert_eq!(err.to_string(), "Request failed (HTTP 500)");
    }

    #[test]
    fn test_html_error_page_uses_status_text() {
        let page = "<html><head><title>502 Bad Gateway</title></head><body><center><h1>502 Bad Gateway</h1></center><hr><center>nginx</center></body></html>";
        let err = ApiError::from_response(502, "Bad Gateway", page);
        assert_eq!(err.to_string(), "Bad Gateway (HTTP 502)");
        match err {
            ApiError::Http { body, .. } => assert_eq!(body, Value::String(page.to_string())),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_long_text_body_is_truncated() {
        let text = "stack trace line ".repeat(40);
        let err = ApiError::from_response(500, "Internal Server Error", &text);
        let ApiError::Http { message, .. } = err else {
            panic!("expected http error");
        };
        assert!(message.ends_with("..."));
        assert!(message.chars().count() <= MAX_TEXT_MESSAGE + 3);
        assert!(message.starts_with("stack trace line"));
    }
}
