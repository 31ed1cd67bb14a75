//! # Error Types
//!
//! Domain-specific error types for dukkan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dukkan-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations (stock, references)   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  dukkan-client errors (separate crate)                                 │
//! │  └── ClientError      - Remote API request failures                    │
//! │                                                                         │
//! │  dukkan-session errors (orchestration layer)                           │
//! │  └── SessionError     - What the embedding UI sees                     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SessionError → UI                 │
//! │        ClientError ─────────────────┘                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, amounts, etc.)
//! 3. Errors are enum variants, never String
//! 4. A `CoreError` means no request was issued to the collaborator

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They are raised
/// **before** any request leaves the client; when one surfaces, the remote
/// collaborator was never contacted.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Requested units exceed the last-known stock.
    ///
    /// ## When This Occurs
    /// - Creating a sale with `quantity > product.quantity`
    /// - Editing a sale where the quantity *increase* exceeds current stock
    ///
    /// ## User Workflow
    /// ```text
    /// Record sale (qty: 5)
    ///      │
    ///      ▼
    /// Snapshot stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product: "...", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Form shows: "Only 3 in stock"; request never sent
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Product cannot be found in the current snapshot.
    ///
    /// The snapshot only carries products with `quantity > 0`, so this also
    /// fires when a sold-out product is targeted.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Sale cannot be found.
    #[error("Sale not found: {0}")]
    SaleNotFound(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements. Used for early
/// validation before the reconciliation rules run.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., bad reference number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product: "Ceramic Mug".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Ceramic Mug: available 3, requested 5"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
