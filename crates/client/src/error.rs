use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never completed or its body could not be read.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx body that is not the expected JSON.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("invalid backend URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ApiError {
    pub fn rejected(status: StatusCode, body: &[u8]) -> Self {
        ApiError::Rejected {
            status,
            message: rejection_message(status, body),
        }
    }
}

/// Picks the human-readable reason out of an error body.
///
/// Accepts `{"message": ..}`, `{"detail": {"message": ..}}` and `{"detail": ".."}`,
/// falling back to the status line.
pub fn rejection_message(status: StatusCode, body: &[u8]) -> String {
    let found = serde_json::from_slice::<Value>(body).ok().and_then(|value| {
        value
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| value.pointer("/detail/message").and_then(Value::as_str))
            .or_else(|| value.get("detail").and_then(Value::as_str))
            .map(str::to_owned)
    });

    found.unwrap_or_else(|| match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {}", status.as_u16(), reason),
        None => format!("HTTP {}", status.as_u16()),
    })
}
