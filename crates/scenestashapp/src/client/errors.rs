//! # Error Normalization
//!
//! Every failed call collapses into one human-readable string. The rules are tried in
//! order and the first one that yields a message wins:
//!
//! 1. The response body is a non-empty string: use it verbatim.
//! 2. The response body is an object: use the first non-empty string among
//!    `message`, `error`, `detail`, `msg`.
//! 3. The transport's own error text, then the response's status text.
//! 4. For failures that never reached the transport, the error's own message.
//! 5. [`FALLBACK_MESSAGE`].

use serde_json::{Map, Value};

pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred";

/// Fields checked, in order, when the body is a JSON object.
pub const MESSAGE_FIELDS: [&str; 4] = ["message", "error", "detail", "msg"];

/// A response body as far as error reporting cares.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Empty,
    Text(String),
    Structured(Map<String, Value>),
    /// Valid JSON that is neither a string nor an object.
    Other(Value),
}

impl ResponseBody {
    /// Classify a raw body. JSON strings are unwrapped; text that is not JSON at all is
    /// kept as-is.
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return ResponseBody::Empty;
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::String(s)) => ResponseBody::Text(s),
            Ok(Value::Object(map)) => ResponseBody::Structured(map),
            Ok(Value::Null) => ResponseBody::Empty,
            Ok(other) => ResponseBody::Other(other),
            Err(_) => ResponseBody::Text(raw.to_string()),
        }
    }
}

/// What the server sent back with a non-2xx status.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedResponse {
    pub status: u16,
    pub status_text: Option<String>,
    pub body: ResponseBody,
}

/// Anything that can go wrong during a call.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// The transport reported an error. `response` is `None` when nothing came back.
    Transport {
        message: String,
        response: Option<FailedResponse>,
    },
    /// A client-side error that never reached the transport (e.g. an unparseable
    /// success body).
    Client(String),
    Unknown,
}

type Rule = fn(&Failure) -> Option<String>;

const RULES: [Rule; 5] = [
    body_text,
    body_field,
    transport_text,
    client_text,
    fallback,
];

/// Reduce a failure to the single message shown to the user.
pub fn format_error(failure: &Failure) -> String {
    RULES
        .iter()
        .find_map(|rule| rule(failure))
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}

fn response_body(failure: &Failure) -> Option<&ResponseBody> {
    match failure {
        Failure::Transport {
            response: Some(response),
            ..
        } => Some(&response.body),
        _ => None,
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn body_text(failure: &Failure) -> Option<String> {
    match response_body(failure)? {
        ResponseBody::Text(text) => non_empty(text),
        _ => None,
    }
}

fn body_field(failure: &Failure) -> Option<String> {
    match response_body(failure)? {
        ResponseBody::Structured(map) => MESSAGE_FIELDS
            .iter()
            .filter_map(|field| map.get(*field).and_then(Value::as_str))
            .find_map(non_empty),
        _ => None,
    }
}

fn transport_text(failure: &Failure) -> Option<String> {
    match failure {
        Failure::Transport { message, response } => non_empty(message).or_else(|| {
            response
                .as_ref()
                .and_then(|r| r.status_text.as_deref())
                .and_then(non_empty)
        }),
        _ => None,
    }
}

fn client_text(failure: &Failure) -> Option<String> {
    match failure {
        Failure::Client(message) => non_empty(message),
        _ => None,
    }
}

fn fallback(_: &Failure) -> Option<String> {
    Some(FALLBACK_MESSAGE.to_string())
}
