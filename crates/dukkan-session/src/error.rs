//! # Session Error Surface
//!
//! The one error type the embedding UI sees. Everything below
//! (validation failures, stock rejections, transport errors) flattens
//! into a code the UI can switch on plus a message it can show verbatim.

use dukkan_client::ClientError;
use dukkan_core::{CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;

/// Machine-readable classification of a session error.
///
/// The UI switches on this to pick presentation (inline field error,
/// toast, banner); `message` is what it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A field failed local validation. No request was issued.
    Validation,
    /// A quantity did not fit in the last-known stock. No request was
    /// issued.
    InsufficientStock,
    /// The referenced entity no longer exists (locally or remotely).
    NotFound,
    /// The collaborator rejected the request (its stock check, a
    /// referential constraint, ...). Server state is unchanged from the
    /// client's perspective except as the rejection implies.
    Rejected,
    /// The request never completed in time.
    Timeout,
    /// Transport failure before any response arrived.
    Network,
    /// The collaborator answered with something undecodable, or local
    /// configuration is broken.
    Internal,
}

/// A session-level failure, ready to show to the user.
///
/// Serializes as `{ "code": ..., "message": ... }` for embedding shells
/// that marshal errors across a boundary.
#[derive(Debug, Clone, Error, Serialize)]
#[error("{message}")]
pub struct SessionError {
    pub code: ErrorCode,
    pub message: String,
}

impl SessionError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        SessionError {
            code,
            message: message.into(),
        }
    }

    /// Shorthand for a not-found failure.
    pub fn not_found(what: impl Into<String>) -> Self {
        SessionError::new(ErrorCode::NotFound, what)
    }

    /// Whether this failure happened before any request was issued.
    pub fn is_local(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::Validation | ErrorCode::InsufficientStock
        )
    }
}

impl From<CoreError> for SessionError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::ProductNotFound(_) | CoreError::SaleNotFound(_) => ErrorCode::NotFound,
            CoreError::Validation(_) => ErrorCode::Validation,
        };
        SessionError::new(code, err.to_string())
    }
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::new(ErrorCode::Validation, err.to_string())
    }
}

impl From<ClientError> for SessionError {
    fn from(err: ClientError) -> Self {
        let code = match &err {
            ClientError::Api { status: 404, .. } => ErrorCode::NotFound,
            ClientError::Api { .. } => ErrorCode::Rejected,
            ClientError::Timeout => ErrorCode::Timeout,
            ClientError::Network(_) => ErrorCode::Network,
            ClientError::InvalidResponse(_) | ClientError::InvalidConfig(_) => ErrorCode::Internal,
        };
        SessionError::new(code, err.to_string())
    }
}

/// Result type for session workflows.
pub type SessionResult<T> = Result<T, SessionError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_local_codes() {
        let err: SessionError = CoreError::InsufficientStock {
            product: "Mug".to_string(),
            available: 2,
            requested: 5,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert!(err.is_local());

        let err: SessionError = CoreError::SaleNotFound(9).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(!err.is_local());
    }

    #[test]
    fn test_client_errors_map_by_status() {
        let err: SessionError = ClientError::Api {
            status: 404,
            message: "Sale not found".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: SessionError = ClientError::Api {
            status: 422,
            message: "Insufficient stock".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::Rejected);
        // The collaborator's message passes through verbatim.
        assert_eq!(err.message, "Insufficient stock");

        let err: SessionError = ClientError::Timeout.into();
        assert_eq!(err.code, ErrorCode::Timeout);
    }

    #[test]
    fn test_serializes_with_code_and_message() {
        let err = SessionError::new(ErrorCode::Validation, "name is required");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION");
        assert_eq!(json["message"], "name is required");
    }
}
