//! # Request Error Types
//!
//! Error types for remote API operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  HTTP failure (reqwest::Error)        Non-2xx response                  │
//! │       │                                    │                            │
//! │       ▼                                    ▼                            │
//! │  Timeout / Network              body `message` string, falling back    │
//! │       │                         to "HTTP error! status: {n}"           │
//! │       │                                    │                            │
//! │       └──────────────┬─────────────────────┘                            │
//! │                      ▼                                                  │
//! │              ClientError (this module)                                  │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │              SessionError (dukkan-session) ← what the UI shows          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No variant is ever retried automatically: every failure is terminal for
//! the user action that caused it and requires explicit resubmission.

use serde::Deserialize;
use thiserror::Error;

/// Remote API request errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The collaborator answered with a non-success status.
    ///
    /// ## When This Occurs
    /// - Stock changed server-side since the last fetch (over-commitment)
    /// - Referential constraints (deleting a category still in use)
    /// - Resource already gone (second delete of the same sale)
    ///
    /// `message` is the response body's `message` field when present,
    /// otherwise a status-derived fallback.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never completed within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// Transport-level failure (connection refused, DNS, TLS, ...).
    #[error("Request failed: {0}")]
    Network(String),

    /// The collaborator answered 2xx but the body did not decode.
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Configuration could not be loaded or is malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// True when the collaborator rejected the request with 404.
    ///
    /// Session code maps this to its own not-found surface (e.g. the
    /// second delete of an already-deleted sale).
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::InvalidResponse(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

/// Result type for remote API operations.
pub type ClientResult<T> = Result<T, ClientError>;

// =============================================================================
// Error-Message Extraction
// =============================================================================

/// The error body shape the collaborator uses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Builds the user-facing message for a non-success response.
///
/// Prefers the body's `message` string; any unreadable or message-less
/// body falls back to an HTTP-status-derived message.
pub fn extract_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP error! status: {status}"))
}

/// Builds the [`ClientError::Api`] for a non-success response.
pub fn api_error(status: u16, body: &str) -> ClientError {
    ClientError::Api {
        status,
        message: extract_error_message(status, body),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
