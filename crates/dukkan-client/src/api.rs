//! # The InventoryApi Seam
//!
//! The trait workflow code depends on instead of [`ApiClient`] directly.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Dependency Seam                                    │
//! │                                                                         │
//! │   dukkan-session  ──►  InventoryApi  ◄──  implemented by               │
//! │                             ▲               • ApiClient (production)    │
//! │                             │               • in-memory fakes (tests)   │
//! │                                                                         │
//! │   Workflow tests exercise validation, invalidation, and call counts    │
//! │   without a network in sight.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use dukkan_core::reconcile::{SaleDraft, SaleRevision};
use dukkan_core::types::{
    CategoriesQuery, Category, CategoryInput, DashboardStats, DateRange, Page, Product,
    ProductInput, ProductsQuery, ReportSummary, Sale, SalesQuery,
};

use crate::error::ClientResult;
use crate::http::ApiClient;

/// Everything the remote collaborator offers, as one trait.
///
/// Implementations must not retry: a returned error is terminal for the
/// user action that triggered the call.
#[allow(async_fn_in_trait)]
pub trait InventoryApi {
    // --- Products ---
    async fn list_products(&self, query: &ProductsQuery) -> ClientResult<Page<Product>>;
    async fn list_products_for_sales(&self) -> ClientResult<Vec<Product>>;
    async fn create_product(&self, input: &ProductInput) -> ClientResult<Product>;
    async fn update_product(&self, id: i64, input: &ProductInput) -> ClientResult<Product>;
    async fn delete_product(&self, id: i64) -> ClientResult<()>;
    async fn bulk_delete_products(&self, ids: &[i64]) -> ClientResult<()>;
    async fn delete_all_products(&self) -> ClientResult<()>;

    // --- Sales ---
    async fn list_sales(&self, query: &SalesQuery) -> ClientResult<Page<Sale>>;
    async fn create_sale(&self, draft: &SaleDraft) -> ClientResult<Sale>;
    async fn update_sale(&self, id: i64, revision: &SaleRevision) -> ClientResult<Sale>;
    async fn delete_sale(&self, id: i64) -> ClientResult<()>;

    // --- Categories ---
    async fn list_categories(&self, query: &CategoriesQuery) -> ClientResult<Page<Category>>;
    async fn list_categories_for_select(&self) -> ClientResult<Vec<Category>>;
    async fn create_category(&self, input: &CategoryInput) -> ClientResult<Category>;
    async fn update_category(&self, id: i64, input: &CategoryInput) -> ClientResult<Category>;
    async fn delete_category(&self, id: i64) -> ClientResult<()>;

    // --- Reports ---
    async fn fetch_report(&self, range: DateRange) -> ClientResult<ReportSummary>;
    async fn fetch_dashboard_stats(&self) -> ClientResult<DashboardStats>;
}

impl InventoryApi for ApiClient {
    async fn list_products(&self, query: &ProductsQuery) -> ClientResult<Page<Product>> {
        ApiClient::list_products(self, query).await
    }

    async fn list_products_for_sales(&self) -> ClientResult<Vec<Product>> {
        ApiClient::list_products_for_sales(self).await
    }

    async fn create_product(&self, input: &ProductInput) -> ClientResult<Product> {
        ApiClient::create_product(self, input).await
    }

    async fn update_product(&self, id: i64, input: &ProductInput) -> ClientResult<Product> {
        ApiClient::update_product(self, id, input).await
    }

    async fn delete_product(&self, id: i64) -> ClientResult<()> {
        ApiClient::delete_product(self, id).await
    }

    async fn bulk_delete_products(&self, ids: &[i64]) -> ClientResult<()> {
        ApiClient::bulk_delete_products(self, ids).await
    }

    async fn delete_all_products(&self) -> ClientResult<()> {
        ApiClient::delete_all_products(self).await
    }

    async fn list_sales(&self, query: &SalesQuery) -> ClientResult<Page<Sale>> {
        ApiClient::list_sales(self, query).await
    }

    async fn create_sale(&self, draft: &SaleDraft) -> ClientResult<Sale> {
        ApiClient::create_sale(self, draft).await
    }

    async fn update_sale(&self, id: i64, revision: &SaleRevision) -> ClientResult<Sale> {
        ApiClient::update_sale(self, id, revision).await
    }

    async fn delete_sale(&self, id: i64) -> ClientResult<()> {
        ApiClient::delete_sale(self, id).await
    }

    async fn list_categories(&self, query: &CategoriesQuery) -> ClientResult<Page<Category>> {
        ApiClient::list_categories(self, query).await
    }

    async fn list_categories_for_select(&self) -> ClientResult<Vec<Category>> {
        ApiClient::list_categories_for_select(self).await
    }

    async fn create_category(&self, input: &CategoryInput) -> ClientResult<Category> {
        ApiClient::create_category(self, input).await
    }

    async fn update_category(&self, id: i64, input: &CategoryInput) -> ClientResult<Category> {
        ApiClient::update_category(self, id, input).await
    }

    async fn delete_category(&self, id: i64) -> ClientResult<()> {
        ApiClient::delete_category(self, id).await
    }

    async fn fetch_report(&self, range: DateRange) -> ClientResult<ReportSummary> {
        ApiClient::fetch_report(self, range).await
    }

    async fn fetch_dashboard_stats(&self) -> ClientResult<DashboardStats> {
        ApiClient::fetch_dashboard_stats(self).await
    }
}
