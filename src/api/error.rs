use http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failures talking to the backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, DNS)
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Non-2xx status; `message` is the backend's `error` field when present
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backend answered but had nothing usable
    #[error("{0}")]
    NoData(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Message for a rejected request: the body's `error` string, or a generic status line
pub fn rejection_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP error: {}", status.as_u16()))
}
