//! End-to-end workflow tests against an in-memory collaborator.
//!
//! The fake implements the server's documented stock semantics (decrement
//! on sale create, delta on edit, restore on delete, reject on
//! insufficient stock) and counts every call, so these tests can assert
//! both the outcomes and the requests that were (or were not) issued.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use dukkan_client::{ClientError, ClientResult, InventoryApi};
use dukkan_core::money::Money;
use dukkan_core::reconcile::{SaleDraft, SaleRevision};
use dukkan_core::types::{
    CategoriesQuery, Category, CategoryInput, DashboardStats, DateRange, Page, Product,
    ProductInput, ProductsQuery, ReportSummary, Sale, SaleProductInfo, SalesQuery,
};
use dukkan_session::{ErrorCode, Session};

fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

// =============================================================================
// In-Memory Collaborator
// =============================================================================

#[derive(Debug, Default)]
struct Calls {
    list_products: u32,
    list_products_for_sales: u32,
    list_sales: u32,
    create_sale: u32,
    update_sale: u32,
    delete_sale: u32,
    bulk_delete_products: u32,
}

#[derive(Debug, Default)]
struct State {
    products: HashMap<i64, Product>,
    sales: HashMap<i64, Sale>,
    next_sale_id: i64,
    calls: Calls,
}

#[derive(Debug, Clone, Default)]
struct FakeApi {
    state: Arc<Mutex<State>>,
}

fn rejection(status: u16, message: &str) -> ClientError {
    ClientError::Api {
        status,
        message: message.to_string(),
    }
}

impl FakeApi {
    fn with_product(self, id: i64, name: &str, stock: i64, price_cents: i64) -> Self {
        let now = Utc::now();
        self.state.lock().unwrap().products.insert(
            id,
            Product {
                id,
                name: name.to_string(),
                description: None,
                reference_number: None,
                image_url: None,
                quantity: stock,
                price: Money::from_cents(price_cents),
                created_at: now,
                updated_at: now,
            },
        );
        self
    }

    fn stock_of(&self, product_id: i64) -> i64 {
        self.state.lock().unwrap().products[&product_id].quantity
    }

    /// Simulates another client changing stock behind this session's back.
    fn set_stock(&self, product_id: i64, stock: i64) {
        if let Some(p) = self.state.lock().unwrap().products.get_mut(&product_id) {
            p.quantity = stock;
        }
    }

    fn calls<R>(&self, read: impl FnOnce(&Calls) -> R) -> R {
        read(&self.state.lock().unwrap().calls)
    }
}

impl InventoryApi for FakeApi {
    async fn list_products(&self, _query: &ProductsQuery) -> ClientResult<Page<Product>> {
        let mut state = self.state.lock().unwrap();
        state.calls.list_products += 1;
        let mut data: Vec<Product> = state.products.values().cloned().collect();
        data.sort_by_key(|p| p.id);
        let total = data.len() as i64;
        Ok(Page {
            data,
            total,
            current_page: 1,
            last_page: 1,
        })
    }

    async fn list_products_for_sales(&self) -> ClientResult<Vec<Product>> {
        let mut state = self.state.lock().unwrap();
        state.calls.list_products_for_sales += 1;
        let mut data: Vec<Product> = state.products.values().cloned().collect();
        data.sort_by_key(|p| p.id);
        Ok(data)
    }

    async fn create_product(&self, _input: &ProductInput) -> ClientResult<Product> {
        unimplemented!("not exercised by these tests")
    }

    async fn update_product(&self, _id: i64, _input: &ProductInput) -> ClientResult<Product> {
        unimplemented!("not exercised by these tests")
    }

    async fn delete_product(&self, id: i64) -> ClientResult<()> {
        self.state
            .lock()
            .unwrap()
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| rejection(404, "Product not found"))
    }

    async fn bulk_delete_products(&self, ids: &[i64]) -> ClientResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.bulk_delete_products += 1;
        for id in ids {
            state.products.remove(id);
        }
        Ok(())
    }

    async fn delete_all_products(&self) -> ClientResult<()> {
        self.state.lock().unwrap().products.clear();
        Ok(())
    }

    async fn list_sales(&self, _query: &SalesQuery) -> ClientResult<Page<Sale>> {
        let mut state = self.state.lock().unwrap();
        state.calls.list_sales += 1;
        let mut data: Vec<Sale> = state.sales.values().cloned().collect();
        data.sort_by_key(|s| std::cmp::Reverse(s.id));
        let total = data.len() as i64;
        Ok(Page {
            data,
            total,
            current_page: 1,
            last_page: 1,
        })
    }

    async fn create_sale(&self, draft: &SaleDraft) -> ClientResult<Sale> {
        let mut state = self.state.lock().unwrap();
        state.calls.create_sale += 1;

        let product = state
            .products
            .get_mut(&draft.product_id)
            .ok_or_else(|| rejection(404, "Product not found"))?;
        if product.quantity < draft.quantity {
            return Err(rejection(422, "Insufficient stock"));
        }
        product.quantity -= draft.quantity;
        let info = SaleProductInfo {
            name: product.name.clone(),
            reference_number: product.reference_number.clone(),
            image_url: product.image_url.clone(),
        };

        state.next_sale_id += 1;
        let sale = Sale {
            id: state.next_sale_id,
            product_id: draft.product_id,
            quantity: draft.quantity,
            unit_price: draft.unit_price,
            total_price: draft.total_price,
            created_at: Utc::now(),
            product: Some(info),
        };
        state.sales.insert(sale.id, sale.clone());
        Ok(sale)
    }

    async fn update_sale(&self, id: i64, revision: &SaleRevision) -> ClientResult<Sale> {
        let mut state = self.state.lock().unwrap();
        state.calls.update_sale += 1;

        let old_quantity = state
            .sales
            .get(&id)
            .map(|s| s.quantity)
            .ok_or_else(|| rejection(404, "Sale not found"))?;
        let delta = revision.quantity - old_quantity;

        let product = state
            .products
            .get_mut(&revision.product_id)
            .ok_or_else(|| rejection(404, "Product not found"))?;
        if delta > product.quantity {
            return Err(rejection(422, "Insufficient stock"));
        }
        product.quantity -= delta;

        let sale = state.sales.get_mut(&id).expect("checked above");
        sale.quantity = revision.quantity;
        sale.unit_price = revision.unit_price;
        sale.total_price = revision.total_price;
        Ok(sale.clone())
    }

    async fn delete_sale(&self, id: i64) -> ClientResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.delete_sale += 1;

        let sale = state
            .sales
            .remove(&id)
            .ok_or_else(|| rejection(404, "Sale not found"))?;
        if let Some(product) = state.products.get_mut(&sale.product_id) {
            product.quantity += sale.quantity;
        }
        Ok(())
    }

    async fn list_categories(&self, _query: &CategoriesQuery) -> ClientResult<Page<Category>> {
        Ok(Page::empty())
    }

    async fn list_categories_for_select(&self) -> ClientResult<Vec<Category>> {
        Ok(Vec::new())
    }

    async fn create_category(&self, input: &CategoryInput) -> ClientResult<Category> {
        Ok(Category {
            id: 1,
            name: input.name.clone(),
            products_count: None,
        })
    }

    async fn update_category(&self, _id: i64, _input: &CategoryInput) -> ClientResult<Category> {
        unimplemented!("not exercised by these tests")
    }

    async fn delete_category(&self, _id: i64) -> ClientResult<()> {
        unimplemented!("not exercised by these tests")
    }

    async fn fetch_report(&self, _range: DateRange) -> ClientResult<ReportSummary> {
        Ok(ReportSummary::default())
    }

    async fn fetch_dashboard_stats(&self) -> ClientResult<DashboardStats> {
        Ok(DashboardStats::default())
    }
}

// =============================================================================
// Sale Creation
// =============================================================================

#[tokio::test]
async fn sale_within_stock_is_recorded_and_stock_decrements() {
    init_test_tracing();
    let api = FakeApi::default().with_product(1, "Ceramic Mug", 10, 2450);
    let session = Session::new(api.clone());

    let sale = session
        .record_sale(1, 5, Money::from_cents(2450))
        .await
        .unwrap();
    assert_eq!(sale.quantity, 5);
    assert_eq!(sale.total_price, Money::from_cents(5 * 2450));
    assert_eq!(api.stock_of(1), 5);

    // The mutation invalidated the catalog view: the next read refetches
    // and sees the decremented stock.
    let catalog = session.products_for_sales().await.unwrap();
    assert_eq!(catalog[0].quantity, 5);
    assert_eq!(api.calls(|c| c.list_products_for_sales), 2);
}

#[tokio::test]
async fn sale_exceeding_stock_is_rejected_without_a_request() {
    init_test_tracing();
    let api = FakeApi::default().with_product(1, "Ceramic Mug", 10, 2450);
    let session = Session::new(api.clone());

    let err = session
        .record_sale(1, 11, Money::from_cents(2450))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InsufficientStock);
    assert!(err.is_local());

    // No create request went out, stock is untouched, and the cached
    // catalog is still considered accurate (no refetch).
    assert_eq!(api.calls(|c| c.create_sale), 0);
    assert_eq!(api.stock_of(1), 10);
    session.products_for_sales().await.unwrap();
    assert_eq!(api.calls(|c| c.list_products_for_sales), 1);
}

#[tokio::test]
async fn sale_from_empty_stock_is_rejected_locally() {
    init_test_tracing();
    let api = FakeApi::default().with_product(1, "Ceramic Mug", 0, 2450);
    let session = Session::new(api.clone());

    let err = session
        .record_sale(1, 1, Money::from_cents(2450))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InsufficientStock);
    assert_eq!(api.calls(|c| c.create_sale), 0);
}

#[tokio::test]
async fn sale_with_invalid_quantity_is_rejected_locally() {
    init_test_tracing();
    let api = FakeApi::default().with_product(1, "Ceramic Mug", 10, 2450);
    let session = Session::new(api.clone());

    let err = session
        .record_sale(1, 0, Money::from_cents(2450))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Validation);
    assert_eq!(api.calls(|c| c.create_sale), 0);
}

#[tokio::test]
async fn sale_of_unknown_product_is_not_found() {
    init_test_tracing();
    let api = FakeApi::default().with_product(1, "Ceramic Mug", 10, 2450);
    let session = Session::new(api.clone());

    let err = session
        .record_sale(99, 1, Money::from_cents(2450))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
    assert_eq!(api.calls(|c| c.create_sale), 0);
}

// =============================================================================
// Sale Revision (the delta rule)
// =============================================================================

#[tokio::test]
async fn sale_edit_applies_the_delta_rule() {
    // Stock 10; sell 5 → 5 left.
    let api = FakeApi::default().with_product(1, "Ceramic Mug", 10, 2450);
    let session = Session::new(api.clone());
    let sale = session
        .record_sale(1, 5, Money::from_cents(2450))
        .await
        .unwrap();
    assert_eq!(api.stock_of(1), 5);

    // Raising to 12 needs 7 more units; only 5 remain → rejected with no
    // request issued.
    let err = session
        .revise_sale(&sale, 12, Money::from_cents(2450))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InsufficientStock);
    assert_eq!(api.calls(|c| c.update_sale), 0);
    assert_eq!(api.stock_of(1), 5);

    // Raising to 8 needs 3 more; that fits even though 8 > 5 on its own.
    let revised = session
        .revise_sale(&sale, 8, Money::from_cents(2450))
        .await
        .unwrap();
    assert_eq!(revised.quantity, 8);
    assert_eq!(revised.total_price, Money::from_cents(8 * 2450));
    assert_eq!(api.stock_of(1), 2);
}

#[tokio::test]
async fn sale_edit_decrease_returns_units_to_stock() {
    init_test_tracing();
    let api = FakeApi::default().with_product(1, "Ceramic Mug", 10, 2450);
    let session = Session::new(api.clone());
    let sale = session
        .record_sale(1, 5, Money::from_cents(2450))
        .await
        .unwrap();

    let revised = session
        .revise_sale(&sale, 3, Money::from_cents(2450))
        .await
        .unwrap();
    assert_eq!(revised.quantity, 3);
    assert_eq!(api.stock_of(1), 7);
}

// =============================================================================
// Sale Deletion
// =============================================================================

#[tokio::test]
async fn voiding_a_sale_restores_stock_server_side() {
    init_test_tracing();
    let api = FakeApi::default().with_product(1, "Ceramic Mug", 10, 2450);
    let session = Session::new(api.clone());
    let sale = session
        .record_sale(1, 4, Money::from_cents(2450))
        .await
        .unwrap();
    assert_eq!(api.stock_of(1), 6);

    session.void_sale(sale.id).await.unwrap();
    assert_eq!(api.stock_of(1), 10);
}

#[tokio::test]
async fn voiding_a_sale_twice_fails_without_double_restore() {
    init_test_tracing();
    let api = FakeApi::default().with_product(1, "Ceramic Mug", 10, 2450);
    let session = Session::new(api.clone());
    let sale = session
        .record_sale(1, 4, Money::from_cents(2450))
        .await
        .unwrap();

    session.void_sale(sale.id).await.unwrap();
    let err = session.void_sale(sale.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
    // Stock was restored exactly once.
    assert_eq!(api.stock_of(1), 10);
}

// =============================================================================
// Stale Reads & Failed Mutations
// =============================================================================

#[tokio::test]
async fn stale_catalog_lets_the_server_have_the_last_word() {
    init_test_tracing();
    let api = FakeApi::default().with_product(1, "Ceramic Mug", 10, 2450);
    let session = Session::new(api.clone());

    // Warm the catalog cache at stock 10, then another client drains it.
    session.products_for_sales().await.unwrap();
    api.set_stock(1, 2);

    // Local validation passes on the stale snapshot; the collaborator
    // rejects, and the rejection message reaches the user verbatim.
    let err = session
        .record_sale(1, 5, Money::from_cents(2450))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Rejected);
    assert_eq!(err.message, "Insufficient stock");
    assert_eq!(api.calls(|c| c.create_sale), 1);
    assert_eq!(api.stock_of(1), 2);
}

#[tokio::test]
async fn failed_mutations_invalidate_nothing() {
    init_test_tracing();
    let api = FakeApi::default().with_product(1, "Ceramic Mug", 10, 2450);
    let session = Session::new(api.clone());

    session.sales(1).await.unwrap();
    session.products_for_sales().await.unwrap();
    api.set_stock(1, 2);

    // Server-side rejection: nothing changed, so cached views stay.
    session
        .record_sale(1, 5, Money::from_cents(2450))
        .await
        .unwrap_err();

    session.sales(1).await.unwrap();
    session.products_for_sales().await.unwrap();
    assert_eq!(api.calls(|c| c.list_sales), 1);
    assert_eq!(api.calls(|c| c.list_products_for_sales), 1);
}

// =============================================================================
// Reads & Misc Workflows
// =============================================================================

#[tokio::test]
async fn oversized_search_issues_no_request() {
    init_test_tracing();
    let api = FakeApi::default();
    let session = Session::new(api.clone());

    let err = session.products(1, &"q".repeat(200)).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Validation);
    assert_eq!(api.calls(|c| c.list_products), 0);
}

#[tokio::test]
async fn search_term_is_trimmed_before_the_request() {
    init_test_tracing();
    let api = FakeApi::default().with_product(1, "Ceramic Mug", 10, 2450);
    let session = Session::new(api.clone());

    // Same trimmed term twice → one cache key → one request.
    session.products(1, "  mug ").await.unwrap();
    session.products(1, "mug").await.unwrap();
    assert_eq!(api.calls(|c| c.list_products), 1);
}

#[tokio::test]
async fn empty_bulk_delete_is_a_no_op() {
    init_test_tracing();
    let api = FakeApi::default().with_product(1, "Ceramic Mug", 10, 2450);
    let session = Session::new(api.clone());

    session.delete_products(&[]).await.unwrap();
    assert_eq!(api.calls(|c| c.bulk_delete_products), 0);

    session.delete_products(&[1]).await.unwrap();
    assert_eq!(api.calls(|c| c.bulk_delete_products), 1);
}
