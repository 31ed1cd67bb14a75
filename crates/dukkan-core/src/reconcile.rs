//! # Stock Reconciliation
//!
//! The one piece of business logic in Dukkan with real invariants: keeping
//! a Product's stock consistent as Sales are created, edited, or deleted.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Reconciliation                                 │
//! │                                                                         │
//! │  CREATE                                                                 │
//! │  ──────                                                                 │
//! │  requested quantity must fit in last-known stock:                       │
//! │      quantity <= product.quantity                                       │
//! │                                                                         │
//! │  EDIT                                                                   │
//! │  ────                                                                   │
//! │  only the INCREMENT competes with available stock:                      │
//! │      delta = new_quantity - original.quantity                           │
//! │      delta > 0  →  delta <= current_stock required                      │
//! │      delta <= 0 →  always fine (returns units to stock)                 │
//! │                                                                         │
//! │  Never compare new_quantity against stock directly: the units already  │
//! │  spent by the original sale stay logically reserved until the edit is  │
//! │  confirmed.                                                             │
//! │                                                                         │
//! │  DELETE                                                                 │
//! │  ──────                                                                 │
//! │  no client-side arithmetic at all; the collaborator restores           │
//! │      product.quantity += sale.quantity                                  │
//! │  inside its own deletion transaction.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Staleness
//! Every check here runs against the last *fetched* snapshot of stock. Two
//! concurrent clients can both pass local validation and race; the remote
//! collaborator is the final arbiter and may still reject. Nothing in this
//! module retries or compensates; a rejection is surfaced to the user.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, Sale};
use crate::validation::{validate_quantity, validate_unit_price};
use serde::{Deserialize, Serialize};

// =============================================================================
// Request Payloads
// =============================================================================

/// The body of a create-sale request, produced only by [`validate_sale`].
///
/// `total_price` is exact: `quantity × unit_price` in integer minor units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDraft {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: Money,
    pub total_price: Money,
}

/// The body of an update-sale request, produced only by
/// [`reconcile_sale_edit`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRevision {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: Money,
    pub total_price: Money,
}

// =============================================================================
// Pure Arithmetic
// =============================================================================

/// Computes a sale's total: `quantity × unit_price`, exactly.
#[inline]
pub fn total_price(quantity: i64, unit_price: Money) -> Money {
    unit_price.multiply_quantity(quantity)
}

// =============================================================================
// Sale Creation Validator
// =============================================================================

/// Validates a new sale against the last-known stock of `product`.
///
/// ## Rules
/// - `quantity` must be a positive integer (and within the sanity cap)
/// - `unit_price` must not be negative
/// - `quantity` must not exceed `product.quantity`
///
/// ## On success
/// Returns the [`SaleDraft`] to submit. The client does not touch the
/// Product; the collaborator decrements stock atomically server-side.
///
/// ## On failure
/// Returns a [`CoreError`]; no request is issued.
///
/// ## Example
/// ```rust
/// # use dukkan_core::{money::Money, reconcile::validate_sale};
/// # use dukkan_core::types::Product;
/// # use chrono::Utc;
/// # let product = Product {
/// #     id: 1, name: "Mug".into(), description: None, reference_number: None,
/// #     image_url: None, quantity: 10, price: Money::from_cents(2450),
/// #     created_at: Utc::now(), updated_at: Utc::now(),
/// # };
/// let draft = validate_sale(&product, 5, Money::from_cents(2450)).unwrap();
/// assert_eq!(draft.total_price.cents(), 5 * 2450);
///
/// assert!(validate_sale(&product, 11, Money::from_cents(2450)).is_err());
/// ```
pub fn validate_sale(product: &Product, quantity: i64, unit_price: Money) -> CoreResult<SaleDraft> {
    validate_quantity(quantity)?;
    validate_unit_price(unit_price)?;

    if !product.can_fulfill(quantity) {
        return Err(CoreError::InsufficientStock {
            product: product.name.clone(),
            available: product.quantity,
            requested: quantity,
        });
    }

    Ok(SaleDraft {
        product_id: product.id,
        quantity,
        unit_price,
        total_price: total_price(quantity, unit_price),
    })
}

// =============================================================================
// Sale Edit Reconciliation
// =============================================================================

/// Reconciles an edit of `original` against the product's *current* stock.
///
/// ## The Delta Rule
/// The acceptance decision depends only on
/// `delta = new_quantity - original.quantity` compared to `current_stock`,
/// never on `new_quantity` compared to stock directly. The original sale's
/// units remain reserved until the edit is confirmed:
///
/// ```text
/// initial stock 10, sale of 5  →  stock now 5
/// edit sale to 12: delta = 7, 7 > 5   → rejected
/// edit sale to  3: delta = -2         → accepted (returns 2 to stock)
/// ```
///
/// ## Arguments
/// * `original` - the sale as last fetched (its `quantity` is what the
///   server already subtracted)
/// * `current_stock` - the referenced product's last-known `quantity`
pub fn reconcile_sale_edit(
    original: &Sale,
    new_quantity: i64,
    new_unit_price: Money,
    current_stock: i64,
) -> CoreResult<SaleRevision> {
    validate_quantity(new_quantity)?;
    validate_unit_price(new_unit_price)?;

    let delta = new_quantity - original.quantity;
    if delta > 0 && delta > current_stock {
        // Only the additional units compete with what is on the shelf.
        return Err(CoreError::InsufficientStock {
            product: original
                .product
                .as_ref()
                .map(|p| p.name.clone())
                .unwrap_or_else(|| format!("product #{}", original.product_id)),
            available: current_stock,
            requested: delta,
        });
    }

    Ok(SaleRevision {
        product_id: original.product_id,
        quantity: new_quantity,
        unit_price: new_unit_price,
        total_price: total_price(new_quantity, new_unit_price),
    })
}

// =============================================================================
// Advisory Projections
// =============================================================================
// The collaborator owns the real stock mutation; these helpers only predict
// what it will do, for immediate UI feedback before the refetch lands.

/// Stock the server is expected to report after a create succeeds.
#[inline]
pub fn projected_stock_after_create(current_stock: i64, sold: i64) -> i64 {
    current_stock - sold
}

/// Stock the server is expected to report after an edit succeeds.
#[inline]
pub fn projected_stock_after_edit(current_stock: i64, original_quantity: i64, new_quantity: i64) -> i64 {
    current_stock - (new_quantity - original_quantity)
}

/// Stock the server is expected to report after a delete succeeds.
#[inline]
pub fn projected_stock_after_delete(current_stock: i64, sale_quantity: i64) -> i64 {
    current_stock + sale_quantity
}

// =============================================================================
// Unit Tests
// =============================================================================
