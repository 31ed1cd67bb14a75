//! # Validation Module
//!
//! Input validation utilities for Dukkan.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Embedding form UI (out of scope)                             │
//! │  ├── Basic format checks, immediate feedback                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE + reconcile rules                                │
//! │  ├── Field-level checks before any request is issued                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote collaborator                                          │
//! │  ├── Referential constraints, authoritative stock check                │
//! │                                                                         │
//! │  Defense in depth: a stale snapshot can slip past layer 2, so          │
//! │  layer 3 remains the final arbiter.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::MAX_SALE_QUANTITY;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_SALE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_SALE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_SALE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: free items)
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

/// Validates a product's stock-on-hand value as entered in a product form.
///
/// Stock may be zero (sold out) but never negative.
pub fn validate_stock(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product or category name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a reference number (typically a scanned barcode).
///
/// ## Rules
/// - May be empty (the field is optional)
/// - At most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
pub fn validate_reference_number(reference: &str) -> ValidationResult<()> {
    let reference = reference.trim();

    if reference.is_empty() {
        return Ok(());
    }

    if reference.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "reference_number".to_string(),
            max: 50,
        });
    }

    if !reference
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "reference_number".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns all/default results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::from_cents(1099)).is_ok());
        assert!(validate_unit_price(Money::zero()).is_ok());
        assert!(validate_unit_price(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(500).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Ceramic Mug 330ml").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_reference_number() {
        assert!(validate_reference_number("MUG-330").is_ok());
        assert!(validate_reference_number("ABC123").is_ok());
        assert!(validate_reference_number("").is_ok()); // optional field
        assert!(validate_reference_number("has space").is_err());
        assert!(validate_reference_number(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_search_query_trims() {
        assert_eq!(validate_search_query("  mug  ").unwrap(), "mug");
        assert!(validate_search_query(&"q".repeat(200)).is_err());
    }
}
