//! # Mutation → Invalidation Table
//!
//! Every write against the collaborator has knock-on effects on cached
//! reads. This module is the single place that knowledge lives; workflow
//! code reports *what happened* and the table decides *what to drop*.
//!
//! ## The Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Mutation               │  Invalidated families                         │
//! │  ───────────────────────┼──────────────────────────────────────────────│
//! │  product create/update/ │  products, products-for-sales, dashboard     │
//! │  delete/bulk/clear      │                                               │
//! │                         │                                               │
//! │  sale create/update/    │  sales, products, products-for-sales,         │
//! │  delete                 │  dashboard, reports                           │
//! │                         │  (sales move stock AND revenue)               │
//! │                         │                                               │
//! │  category create/update │  categories, categories-for-select            │
//! │  category delete        │  categories, categories-for-select, products  │
//! │                         │  (products display their category)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

/// The cached view families a mutation can clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryFamily {
    /// The paged, searchable product table.
    Products,
    /// The flat catalog the sale form reads stock from.
    ProductsForSales,
    /// The paged sales history.
    Sales,
    /// The paged, searchable category table.
    Categories,
    /// The flat category list for dropdowns.
    CategoriesForSelect,
    /// Date-filtered report aggregates (all ranges at once).
    Reports,
    /// The home dashboard counters.
    Dashboard,
}

/// A successful write, as reported by workflow code.
///
/// Failed writes are never reported: a rejected request changed nothing
/// server-side, so every cached view is still accurate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    ProductCreated,
    ProductUpdated,
    ProductDeleted,
    ProductsBulkDeleted,
    AllProductsDeleted,
    SaleCreated,
    SaleUpdated,
    SaleDeleted,
    CategoryCreated,
    CategoryUpdated,
    CategoryDeleted,
}

impl Mutation {
    /// The view families this mutation invalidates.
    pub fn invalidates(&self) -> &'static [QueryFamily] {
        use QueryFamily::*;
        match self {
            Mutation::ProductCreated
            | Mutation::ProductUpdated
            | Mutation::ProductDeleted
            | Mutation::ProductsBulkDeleted
            | Mutation::AllProductsDeleted => &[Products, ProductsForSales, Dashboard],

            // Sales move stock and revenue at once, so they touch the
            // widest set of views.
            Mutation::SaleCreated | Mutation::SaleUpdated | Mutation::SaleDeleted => {
                &[Sales, Products, ProductsForSales, Dashboard, Reports]
            }

            Mutation::CategoryCreated | Mutation::CategoryUpdated => {
                &[Categories, CategoriesForSelect]
            }

            // Product rows display their category, so removing one must
            // also refresh the product table.
            Mutation::CategoryDeleted => &[Categories, CategoriesForSelect, Products],
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_mutations_invalidate_stock_and_revenue_views() {
        for m in [
            Mutation::SaleCreated,
            Mutation::SaleUpdated,
            Mutation::SaleDeleted,
        ] {
            let families = m.invalidates();
            assert!(families.contains(&QueryFamily::Sales));
            assert!(families.contains(&QueryFamily::Products));
            assert!(families.contains(&QueryFamily::ProductsForSales));
            assert!(families.contains(&QueryFamily::Dashboard));
            assert!(families.contains(&QueryFamily::Reports));
        }
    }

    #[test]
    fn test_product_mutations_leave_sales_history_alone() {
        let families = Mutation::ProductUpdated.invalidates();
        assert!(!families.contains(&QueryFamily::Sales));
        assert!(!families.contains(&QueryFamily::Reports));
        assert!(families.contains(&QueryFamily::ProductsForSales));
    }

    #[test]
    fn test_category_delete_also_refreshes_products() {
        assert!(Mutation::CategoryDeleted
            .invalidates()
            .contains(&QueryFamily::Products));
        assert!(!Mutation::CategoryCreated
            .invalidates()
            .contains(&QueryFamily::Products));
    }
}
