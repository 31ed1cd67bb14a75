//! # Domain Types
//!
//! Core domain types used throughout Dukkan.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    Category     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  name           │   │  product_id(FK) │   │  name           │       │
//! │  │  quantity       │   │  quantity       │   │  products_count │       │
//! │  │  price (Money)  │   │  unit_price     │   └─────────────────┘       │
//! │  └─────────────────┘   │  total_price    │                             │
//! │                        └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Page<T>      │   │ DashboardStats  │   │  ReportSummary  │       │
//! │  │  Laravel page   │   │  home counters  │   │  date-filtered  │       │
//! │  │  envelope       │   │                 │   │  aggregates     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! All ids are server-assigned integers. The client never generates
//! identity; it only echoes ids it previously fetched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// Product
// =============================================================================

/// A stocked item available for sale.
///
/// The `quantity` field is the authoritative stock *as of the last fetch*.
/// It may be stale relative to the server; validation against it is
/// best-effort and the collaborator remains the final arbiter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned identifier.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Optional free-text description.
    pub description: Option<String>,

    /// Optional reference number (filled by hand or by barcode scan).
    pub reference_number: Option<String>,

    /// Optional image URL (the upload collaborator returns this).
    pub image_url: Option<String>,

    /// Stock on hand. Non-negative; mutated server-side only.
    pub quantity: i64,

    /// Unit price in minor units.
    pub price: Money,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Checks whether the last-known stock covers `quantity` units.
    #[inline]
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        quantity <= self.quantity
    }

    /// Whether this product counts as low-stock in dashboard aggregates.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }
}

/// Fields submitted when creating or updating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub reference_number: Option<String>,
    pub image_url: Option<String>,
    pub quantity: i64,
    pub price: Money,
}

// =============================================================================
// Sale
// =============================================================================

/// A record of units of a Product sold at a point in time.
///
/// `total_price` is always `quantity × unit_price`, computed client-side
/// with exact integer arithmetic and submitted as-is; the collaborator is
/// trusted not to recompute it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    pub product_id: i64,
    /// Units sold. Always positive.
    pub quantity: i64,
    /// Unit price at time of sale.
    pub unit_price: Money,
    /// quantity × unit_price, exactly as submitted.
    pub total_price: Money,
    pub created_at: DateTime<Utc>,
    /// Joined product display fields, when the list endpoint includes them.
    /// `None` once the product has been deleted.
    #[serde(default)]
    pub product: Option<SaleProductInfo>,
}

/// Display snapshot of the product a sale references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleProductInfo {
    pub name: String,
    pub reference_number: Option<String>,
    pub image_url: Option<String>,
}

// =============================================================================
// Category
// =============================================================================

/// A tag grouping products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Number of products tagged with this category, when the list
    /// endpoint includes the count.
    #[serde(default)]
    pub products_count: Option<i64>,
}

/// Fields submitted when creating or updating a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
}

// =============================================================================
// Paged Responses
// =============================================================================

/// The paged list envelope the remote API returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    /// Total rows across all pages.
    pub total: i64,
    pub current_page: i64,
    pub last_page: i64,
}

impl<T> Page<T> {
    /// An empty first page.
    pub fn empty() -> Self {
        Page {
            data: Vec::new(),
            total: 0,
            current_page: 1,
            last_page: 1,
        }
    }
}

/// Query parameters for the paged product listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductsQuery {
    pub page: u32,
    pub per_page: u32,
    /// Empty string means no filter.
    pub search: String,
}

impl Default for ProductsQuery {
    fn default() -> Self {
        ProductsQuery {
            page: 1,
            per_page: crate::DEFAULT_PAGE_SIZE,
            search: String::new(),
        }
    }
}

/// Query parameters for the paged sale listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SalesQuery {
    pub page: u32,
    pub per_page: u32,
}

impl Default for SalesQuery {
    fn default() -> Self {
        SalesQuery {
            page: 1,
            per_page: crate::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Query parameters for the paged category listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoriesQuery {
    pub page: u32,
    pub per_page: u32,
    pub search: String,
}

impl Default for CategoriesQuery {
    fn default() -> Self {
        CategoriesQuery {
            page: 1,
            per_page: crate::CATEGORY_PAGE_SIZE,
            search: String::new(),
        }
    }
}

// =============================================================================
// Dashboard & Reports
// =============================================================================

/// Counters shown on the home dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_products: i64,
    pub total_sales: i64,
    pub low_stock_products: i64,
    pub total_revenue: Money,
}

/// Date range filter for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    /// No date filter.
    #[default]
    All,
    /// Trailing seven days.
    Week,
    /// Current calendar month.
    Month,
    /// Current calendar year.
    Year,
}

impl DateRange {
    /// The `date_range` query parameter value, or `None` for no filter.
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            DateRange::All => None,
            DateRange::Week => Some("week"),
            DateRange::Month => Some("month"),
            DateRange::Year => Some("year"),
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateRange::All => write!(f, "all"),
            DateRange::Week => write!(f, "week"),
            DateRange::Month => write!(f, "month"),
            DateRange::Year => write!(f, "year"),
        }
    }
}

impl std::str::FromStr for DateRange {
    type Err = crate::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "" => Ok(DateRange::All),
            "week" => Ok(DateRange::Week),
            "month" => Ok(DateRange::Month),
            "year" => Ok(DateRange::Year),
            other => Err(crate::ValidationError::InvalidFormat {
                field: "date_range".to_string(),
                reason: format!("unknown range '{}'", other),
            }),
        }
    }
}

/// Aggregated report view for a date range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_revenue: Money,
    pub total_sales: i64,
    pub total_products: i64,
    pub low_stock_products: i64,
    #[serde(default)]
    pub top_selling_products: Vec<TopSellingProduct>,
    #[serde(default)]
    pub recent_sales: Vec<RecentSale>,
    #[serde(default)]
    pub monthly_revenue: Vec<MonthlyRevenue>,
}

/// One row of the best-sellers table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopSellingProduct {
    pub name: String,
    pub quantity: i64,
    pub revenue: Money,
}

/// One row of the recent-sales table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentSale {
    pub product_name: Option<String>,
    pub quantity: i64,
    pub total_price: Money,
    pub created_at: DateTime<Utc>,
}

/// Revenue for one calendar month (trailing window).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    /// Month label, e.g. "2026-08".
    pub month: String,
    pub revenue: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
