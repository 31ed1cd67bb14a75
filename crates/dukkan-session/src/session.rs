//! # Session Workflows
//!
//! One [`Session`] per running UI. Reads go through the query cache;
//! mutations validate locally, issue exactly one request, and report
//! themselves to the cache on success.
//!
//! ## Stock Reconciliation Workflows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  record_sale                                                            │
//! │    catalog lookup → validate quantity ≤ last-known stock →              │
//! │    POST /sales → invalidate sales/products/dashboard/reports            │
//! │                                                                         │
//! │  revise_sale                                                            │
//! │    catalog lookup → delta rule (increment ≤ current stock) →            │
//! │    PUT /sales/{id} → same invalidation                                  │
//! │                                                                         │
//! │  void_sale                                                              │
//! │    DELETE /sales/{id} (server restores stock) → same invalidation       │
//! │                                                                         │
//! │  Local checks run against the cached catalog snapshot. A stale          │
//! │  snapshot can let a request through; the collaborator re-validates      │
//! │  and its rejection is surfaced unchanged. Nothing retries.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use dukkan_cache::{Mutation, QueryCache};
use dukkan_client::InventoryApi;
use dukkan_core::money::Money;
use dukkan_core::reconcile::{reconcile_sale_edit, validate_sale};
use dukkan_core::types::{
    CategoriesQuery, Category, CategoryInput, DashboardStats, DateRange, Page, Product,
    ProductInput, ProductsQuery, ReportSummary, Sale, SalesQuery,
};
use dukkan_core::validation::{
    validate_name, validate_reference_number, validate_search_query, validate_stock,
    validate_unit_price,
};
use dukkan_core::CoreError;
use tracing::{debug, info, warn};

use crate::error::{SessionError, SessionResult};

/// A running UI session: the query cache plus the API it fronts.
///
/// Generic over [`InventoryApi`] so workflow behavior is testable against
/// an in-memory fake.
#[derive(Debug)]
pub struct Session<A: InventoryApi> {
    api: A,
    cache: QueryCache,
}

impl<A: InventoryApi> Session<A> {
    pub fn new(api: A) -> Self {
        Session {
            api,
            cache: QueryCache::new(),
        }
    }

    /// The cache, for embedding shells that want to force-clear views.
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// One page of the product table, search already settled.
    pub async fn products(&self, page: u32, search: &str) -> SessionResult<Page<Product>> {
        let search = validate_search_query(search)?;
        let query = ProductsQuery {
            page,
            search,
            ..ProductsQuery::default()
        };
        self.cache
            .products(&query, || async {
                self.api
                    .list_products(&query)
                    .await
                    .map_err(SessionError::from)
            })
            .await
    }

    /// The sale form's catalog, with last-known stock per product.
    pub async fn products_for_sales(&self) -> SessionResult<Vec<Product>> {
        self.cache
            .products_for_sales(|| async {
                self.api
                    .list_products_for_sales()
                    .await
                    .map_err(SessionError::from)
            })
            .await
    }

    /// One page of the sales history.
    pub async fn sales(&self, page: u32) -> SessionResult<Page<Sale>> {
        let query = SalesQuery {
            page,
            ..SalesQuery::default()
        };
        self.cache
            .sales(&query, || async {
                self.api.list_sales(&query).await.map_err(SessionError::from)
            })
            .await
    }

    /// One page of the category table, search already settled.
    pub async fn categories(&self, page: u32, search: &str) -> SessionResult<Page<Category>> {
        let search = validate_search_query(search)?;
        let query = CategoriesQuery {
            page,
            search,
            ..CategoriesQuery::default()
        };
        self.cache
            .categories(&query, || async {
                self.api
                    .list_categories(&query)
                    .await
                    .map_err(SessionError::from)
            })
            .await
    }

    /// The category dropdown list.
    pub async fn categories_for_select(&self) -> SessionResult<Vec<Category>> {
        self.cache
            .categories_for_select(|| async {
                self.api
                    .list_categories_for_select()
                    .await
                    .map_err(SessionError::from)
            })
            .await
    }

    /// Report aggregates for `range`.
    pub async fn report(&self, range: DateRange) -> SessionResult<ReportSummary> {
        self.cache
            .report(range, || async {
                self.api.fetch_report(range).await.map_err(SessionError::from)
            })
            .await
    }

    /// The home dashboard counters.
    pub async fn dashboard_stats(&self) -> SessionResult<DashboardStats> {
        self.cache
            .dashboard_stats(|| async {
                self.api
                    .fetch_dashboard_stats()
                    .await
                    .map_err(SessionError::from)
            })
            .await
    }

    // =========================================================================
    // Sale Workflows (the stock-reconciliation core)
    // =========================================================================

    /// Records a sale of `quantity` units of `product_id`.
    ///
    /// Validates against the cached catalog's last-known stock before any
    /// request; on acceptance the collaborator decrements stock
    /// atomically and every stock/revenue view is invalidated.
    pub async fn record_sale(
        &self,
        product_id: i64,
        quantity: i64,
        unit_price: Money,
    ) -> SessionResult<Sale> {
        let catalog = self.products_for_sales().await?;
        let product = catalog
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| SessionError::from(CoreError::ProductNotFound(product_id)))?;

        let draft = validate_sale(product, quantity, unit_price).map_err(|e| {
            warn!(product_id, quantity, error = %e, "Sale rejected locally");
            SessionError::from(e)
        })?;

        let sale = self.api.create_sale(&draft).await?;
        self.cache.apply(Mutation::SaleCreated).await;
        info!(sale_id = sale.id, product_id, quantity, "Sale recorded");
        Ok(sale)
    }

    /// Revises an existing sale's quantity and unit price.
    ///
    /// Acceptance follows the delta rule: only the quantity *increase*
    /// competes with current stock, because the original sale's units
    /// stay reserved until the revision is confirmed.
    pub async fn revise_sale(
        &self,
        original: &Sale,
        new_quantity: i64,
        new_unit_price: Money,
    ) -> SessionResult<Sale> {
        let catalog = self.products_for_sales().await?;
        let product = catalog
            .iter()
            .find(|p| p.id == original.product_id)
            .ok_or_else(|| SessionError::from(CoreError::ProductNotFound(original.product_id)))?;

        let revision = reconcile_sale_edit(original, new_quantity, new_unit_price, product.quantity)
            .map_err(|e| {
                warn!(sale_id = original.id, new_quantity, error = %e, "Sale edit rejected locally");
                SessionError::from(e)
            })?;

        let sale = self.api.update_sale(original.id, &revision).await?;
        self.cache.apply(Mutation::SaleUpdated).await;
        info!(sale_id = sale.id, new_quantity, "Sale revised");
        Ok(sale)
    }

    /// Voids a sale. No local stock arithmetic: the collaborator
    /// restores the sold units inside its deletion transaction. Voiding
    /// an already-deleted sale surfaces its not-found rejection.
    pub async fn void_sale(&self, sale_id: i64) -> SessionResult<()> {
        self.api.delete_sale(sale_id).await?;
        self.cache.apply(Mutation::SaleDeleted).await;
        info!(sale_id, "Sale voided");
        Ok(())
    }

    // =========================================================================
    // Product Workflows
    // =========================================================================

    fn validate_product_input(input: &ProductInput) -> SessionResult<()> {
        validate_name(&input.name)?;
        validate_stock(input.quantity)?;
        validate_unit_price(input.price)?;
        validate_reference_number(input.reference_number.as_deref().unwrap_or(""))?;
        Ok(())
    }

    pub async fn create_product(&self, input: ProductInput) -> SessionResult<Product> {
        Self::validate_product_input(&input)?;
        let product = self.api.create_product(&input).await?;
        self.cache.apply(Mutation::ProductCreated).await;
        Ok(product)
    }

    pub async fn update_product(&self, id: i64, input: ProductInput) -> SessionResult<Product> {
        Self::validate_product_input(&input)?;
        let product = self.api.update_product(id, &input).await?;
        self.cache.apply(Mutation::ProductUpdated).await;
        Ok(product)
    }

    pub async fn delete_product(&self, id: i64) -> SessionResult<()> {
        self.api.delete_product(id).await?;
        self.cache.apply(Mutation::ProductDeleted).await;
        Ok(())
    }

    /// Deletes a selection in one request. An empty selection is a
    /// no-op: no request, no invalidation.
    pub async fn delete_products(&self, ids: &[i64]) -> SessionResult<()> {
        if ids.is_empty() {
            debug!("Empty selection, nothing to delete");
            return Ok(());
        }
        self.api.bulk_delete_products(ids).await?;
        self.cache.apply(Mutation::ProductsBulkDeleted).await;
        Ok(())
    }

    pub async fn delete_all_products(&self) -> SessionResult<()> {
        self.api.delete_all_products().await?;
        self.cache.apply(Mutation::AllProductsDeleted).await;
        Ok(())
    }

    // =========================================================================
    // Category Workflows
    // =========================================================================

    pub async fn create_category(&self, input: CategoryInput) -> SessionResult<Category> {
        validate_name(&input.name)?;
        let category = self.api.create_category(&input).await?;
        self.cache.apply(Mutation::CategoryCreated).await;
        Ok(category)
    }

    pub async fn update_category(&self, id: i64, input: CategoryInput) -> SessionResult<Category> {
        validate_name(&input.name)?;
        let category = self.api.update_category(id, &input).await?;
        self.cache.apply(Mutation::CategoryUpdated).await;
        Ok(category)
    }

    /// Deletes a category. A category still referenced by products is
    /// rejected by the collaborator; the rejection passes through.
    pub async fn delete_category(&self, id: i64) -> SessionResult<()> {
        self.api.delete_category(id).await?;
        self.cache.apply(Mutation::CategoryDeleted).await;
        Ok(())
    }
}
