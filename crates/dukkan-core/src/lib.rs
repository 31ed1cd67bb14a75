//! # dukkan-core: Pure Business Logic for Dukkan
//!
//! This crate is the **heart** of Dukkan. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dukkan Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Embedding Front-End (out of scope)             │   │
//! │  │    Product forms ──► Sale forms ──► Reports ──► Dashboard      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    dukkan-session                               │   │
//! │  │    record_sale, revise_sale, delete_sale, product CRUD, ...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dukkan-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ reconcile │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ SaleDraft │  │   rules   │  │   │
//! │  │   │   Sale    │  │  (cents)  │  │  deltas   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            dukkan-client (Remote API boundary)                  │   │
//! │  │        The collaborator owns all persisted state                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, Category, report views)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`reconcile`] - Stock reconciliation for sale create/edit/delete
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//! - [`paging`] - Client-side pagination arithmetic
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in minor units (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use dukkan_core::money::Money;
//! use dukkan_core::reconcile::total_price;
//!
//! // 3 units at 24.50 each
//! let total = total_price(3, Money::from_cents(2450));
//! assert_eq!(total.cents(), 7350);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod paging;
pub mod reconcile;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use dukkan_core::Money` instead of
// `use dukkan_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity accepted for a single sale line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_SALE_QUANTITY: i64 = 999;

/// Stock level at or below which a product counts as "low stock" in
/// dashboard and report aggregations.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Default page size for product and sale listings.
pub const DEFAULT_PAGE_SIZE: u32 = 8;

/// Default page size for category listings.
pub const CATEGORY_PAGE_SIZE: u32 = 10;
