//! Response body normalization.

use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;

/// Body of an API response, decided once when the response is read.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The body parsed as JSON.
    Json(Value),
    /// The body was not valid JSON; the raw text is kept as-is.
    Text(String),
    /// The server sent no body.
    Empty,
}

impl ResponseBody {
    /// Parses raw response text, falling back to the text itself when it is not JSON.
    pub fn from_text(text: String) -> Self {
        if text.is_empty() {
            return ResponseBody::Empty;
        }
        match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Looks up a value by JSON pointer (e.g. `/user/id`).
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.as_json().and_then(|v| v.pointer(pointer))
    }

    /// Extracts an identifier at `pointer`.
    /// String identifiers are returned as-is, integer identifiers are formatted.
    pub fn id_at(&self, pointer: &str) -> Option<String> {
        match self.pointer(pointer)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Json(value) => write!(f, "{}", value),
            ResponseBody::Text(text) => write!(f, "{}", text),
            ResponseBody::Empty => write!(f, "<empty>"),
        }
    }
}

/// Status code and body of a completed HTTP exchange, whatever the status.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: ResponseBody) -> Self {
        Self { status, body }
    }

    /// Whether the status is one of `accepted`.
    pub fn is_accepted(&self, accepted: &[StatusCode]) -> bool {
        accepted.contains(&self.status)
    }
}
