//! Error types for flight lookups.
//!
//! Hard failures of a search. Zero-result responses are not errors; see
//! [`SoftCondition`](crate::normalize::SoftCondition).

use thiserror::Error;

/// Shown when a failure carries no usable text of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while searching. Please try again.";

/// Fallback used when the upstream `error` object has no message.
pub const API_FAILED_MESSAGE: &str = "API request failed";

#[derive(Error, Debug)]
pub enum Error {
    /// User input failed validation; no request was issued.
    #[error("invalid search: {reason}")]
    InvalidIntent { reason: String },

    /// The server answered with a non-success HTTP status.
    #[error("API Error: {status} {reason}")]
    Transport { status: u16, reason: String },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The body was not valid JSON.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The decoded body carried a populated `error` field.
    #[error("{message}")]
    Api { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    #[must_use]
    pub fn invalid_intent(reason: impl Into<String>) -> Self {
        Self::InvalidIntent {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Text suitable for the error panel, never empty.
    pub fn user_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            msg
        }
    }
}
