//! # Query Store
//!
//! The [`QueryCache`] itself: one slot per view family, each guarded by
//! its own `RwLock` so concurrent readers never contend across families.
//!
//! Callers pass a fetch future to run on a miss; the cache never reaches
//! out to the network itself.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, trace};

use dukkan_core::types::{
    CategoriesQuery, Category, DashboardStats, DateRange, Page, Product, ProductsQuery,
    ReportSummary, Sale, SalesQuery,
};

use crate::invalidation::{Mutation, QueryFamily};

// =============================================================================
// Staleness Windows
// =============================================================================
// Paged tables carry no TTL: they stay fresh until a mutation invalidates
// them. Flat and aggregate views refresh on a clock because background
// drift (another client selling stock) matters more there.

/// How long the sale form's stock snapshot may be served without a refetch.
pub const PRODUCTS_FOR_SALES_TTL: Duration = Duration::from_secs(2 * 60);

/// How long the category dropdown list may be served without a refetch.
pub const CATEGORIES_FOR_SELECT_TTL: Duration = Duration::from_secs(5 * 60);

/// How long report aggregates may be served without a refetch.
pub const REPORTS_TTL: Duration = Duration::from_secs(2 * 60);

/// How long dashboard counters may be served without a refetch.
pub const DASHBOARD_TTL: Duration = Duration::from_secs(2 * 60);

// =============================================================================
// Entries
// =============================================================================

/// One cached response with its fetch timestamp.
#[derive(Debug)]
struct Entry<T> {
    value: T,
    fetched_at: Instant,
}

impl<T: Clone> Entry<T> {
    fn new(value: T) -> Self {
        Entry {
            value,
            fetched_at: Instant::now(),
        }
    }

    /// The cached value, if it is still within `ttl`. `None` as a TTL
    /// means fresh-until-invalidated.
    fn fresh_value(&self, ttl: Option<Duration>) -> Option<T> {
        match ttl {
            None => Some(self.value.clone()),
            Some(ttl) if self.fetched_at.elapsed() < ttl => Some(self.value.clone()),
            Some(_) => None,
        }
    }
}

// =============================================================================
// The Cache
// =============================================================================

/// In-memory query cache for every read endpoint.
///
/// One instance lives for the whole session; all slots start empty.
#[derive(Debug, Default)]
pub struct QueryCache {
    products: RwLock<HashMap<ProductsQuery, Entry<Page<Product>>>>,
    products_for_sales: RwLock<Option<Entry<Vec<Product>>>>,
    sales: RwLock<HashMap<SalesQuery, Entry<Page<Sale>>>>,
    categories: RwLock<HashMap<CategoriesQuery, Entry<Page<Category>>>>,
    categories_for_select: RwLock<Option<Entry<Vec<Category>>>>,
    reports: RwLock<HashMap<DateRange, Entry<ReportSummary>>>,
    dashboard: RwLock<Option<Entry<DashboardStats>>>,
}

/// Hit-or-fetch over a per-key slot.
async fn get_or_fetch_keyed<K, V, E, F, Fut>(
    slot: &RwLock<HashMap<K, Entry<V>>>,
    key: K,
    ttl: Option<Duration>,
    fetch: F,
) -> Result<V, E>
where
    K: Eq + Hash,
    V: Clone,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, E>>,
{
    if let Some(entry) = slot.read().await.get(&key) {
        if let Some(value) = entry.fresh_value(ttl) {
            trace!("Cache hit");
            return Ok(value);
        }
    }
    let value = fetch().await?;
    slot.write().await.insert(key, Entry::new(value.clone()));
    Ok(value)
}

/// Hit-or-fetch over a single-value slot.
async fn get_or_fetch_single<V, E, F, Fut>(
    slot: &RwLock<Option<Entry<V>>>,
    ttl: Option<Duration>,
    fetch: F,
) -> Result<V, E>
where
    V: Clone,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, E>>,
{
    if let Some(entry) = slot.read().await.as_ref() {
        if let Some(value) = entry.fresh_value(ttl) {
            trace!("Cache hit");
            return Ok(value);
        }
    }
    let value = fetch().await?;
    *slot.write().await = Some(Entry::new(value.clone()));
    Ok(value)
}

impl QueryCache {
    /// A cache with every slot empty.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// One page of the product table. Fresh until invalidated.
    pub async fn products<E, F, Fut>(
        &self,
        query: &ProductsQuery,
        fetch: F,
    ) -> Result<Page<Product>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Page<Product>, E>>,
    {
        get_or_fetch_keyed(&self.products, query.clone(), None, fetch).await
    }

    /// The sale form's full catalog. TTL-bounded: stock drifts while the
    /// form sits open, so this snapshot expires on a clock.
    pub async fn products_for_sales<E, F, Fut>(&self, fetch: F) -> Result<Vec<Product>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Product>, E>>,
    {
        get_or_fetch_single(&self.products_for_sales, Some(PRODUCTS_FOR_SALES_TTL), fetch).await
    }

    /// One page of the sales history. Fresh until invalidated.
    pub async fn sales<E, F, Fut>(&self, query: &SalesQuery, fetch: F) -> Result<Page<Sale>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Page<Sale>, E>>,
    {
        get_or_fetch_keyed(&self.sales, query.clone(), None, fetch).await
    }

    /// One page of the category table. Fresh until invalidated.
    pub async fn categories<E, F, Fut>(
        &self,
        query: &CategoriesQuery,
        fetch: F,
    ) -> Result<Page<Category>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Page<Category>, E>>,
    {
        get_or_fetch_keyed(&self.categories, query.clone(), None, fetch).await
    }

    /// The dropdown category list. TTL-bounded.
    pub async fn categories_for_select<E, F, Fut>(&self, fetch: F) -> Result<Vec<Category>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Category>, E>>,
    {
        get_or_fetch_single(
            &self.categories_for_select,
            Some(CATEGORIES_FOR_SELECT_TTL),
            fetch,
        )
        .await
    }

    /// Report aggregates for one date range. TTL-bounded per range.
    pub async fn report<E, F, Fut>(&self, range: DateRange, fetch: F) -> Result<ReportSummary, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ReportSummary, E>>,
    {
        get_or_fetch_keyed(&self.reports, range, Some(REPORTS_TTL), fetch).await
    }

    /// The home dashboard counters. TTL-bounded.
    pub async fn dashboard_stats<E, F, Fut>(&self, fetch: F) -> Result<DashboardStats, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<DashboardStats, E>>,
    {
        get_or_fetch_single(&self.dashboard, Some(DASHBOARD_TTL), fetch).await
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    /// Reports a successful mutation, clearing every view it touches.
    pub async fn apply(&self, mutation: Mutation) {
        let families = mutation.invalidates();
        debug!(?mutation, count = families.len(), "Invalidating cached views");
        for family in families {
            self.invalidate(*family).await;
        }
    }

    /// Clears one view family (every page/range of it).
    pub async fn invalidate(&self, family: QueryFamily) {
        match family {
            QueryFamily::Products => self.products.write().await.clear(),
            QueryFamily::ProductsForSales => *self.products_for_sales.write().await = None,
            QueryFamily::Sales => self.sales.write().await.clear(),
            QueryFamily::Categories => self.categories.write().await.clear(),
            QueryFamily::CategoriesForSelect => *self.categories_for_select.write().await = None,
            QueryFamily::Reports => self.reports.write().await.clear(),
            QueryFamily::Dashboard => *self.dashboard.write().await = None,
        }
    }

    /// Drops everything. Used when the session's backing data changed out
    /// from under it wholesale (e.g. switching servers).
    pub async fn clear(&self) {
        for family in [
            QueryFamily::Products,
            QueryFamily::ProductsForSales,
            QueryFamily::Sales,
            QueryFamily::Categories,
            QueryFamily::CategoriesForSelect,
            QueryFamily::Reports,
            QueryFamily::Dashboard,
        ] {
            self.invalidate(family).await;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn page_of(names: &[&str]) -> Page<Product> {
        use chrono::Utc;
        use dukkan_core::money::Money;
        Page {
            data: names
                .iter()
                .enumerate()
                .map(|(i, name)| Product {
                    id: i as i64 + 1,
                    name: name.to_string(),
                    description: None,
                    reference_number: None,
                    image_url: None,
                    quantity: 10,
                    price: Money::from_cents(100),
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
                .collect(),
            total: names.len() as i64,
            current_page: 1,
            last_page: 1,
        }
    }

    #[tokio::test]
    async fn test_paged_view_served_from_cache_until_invalidated() {
        let cache = QueryCache::new();
        let query = ProductsQuery::default();
        let fetches = AtomicU32::new(0);

        for _ in 0..3 {
            let page = cache
                .products(&query, || async {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(page_of(&["Mug"]))
                })
                .await
                .unwrap();
            assert_eq!(page.data[0].name, "Mug");
        }
        // First call fetched; the other two were hits.
        assert_eq!(fetches.load(Ordering::SeqCst), 1);

        cache.apply(Mutation::ProductCreated).await;
        cache
            .products(&query, || async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ()>(page_of(&["Mug", "Bowl"]))
            })
            .await
            .unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_distinct_page_keys_cached_independently() {
        let cache = QueryCache::new();
        let page1 = ProductsQuery::default();
        let page2 = ProductsQuery {
            page: 2,
            ..ProductsQuery::default()
        };
        let fetches = AtomicU32::new(0);

        for query in [&page1, &page2, &page1, &page2] {
            cache
                .products(query, || async {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(page_of(&["Mug"]))
                })
                .await
                .unwrap();
        }
        // One fetch per distinct key; revisits are hits.
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_view_expires_on_the_clock() {
        let cache = QueryCache::new();
        let fetches = AtomicU32::new(0);

        let fetch_catalog = || async {
            fetches.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>(page_of(&["Mug"]).data)
        };

        cache.products_for_sales(fetch_catalog).await.unwrap();
        cache.products_for_sales(fetch_catalog).await.unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 1);

        // Just shy of the window: still a hit.
        tokio::time::advance(PRODUCTS_FOR_SALES_TTL - Duration::from_secs(1)).await;
        cache.products_for_sales(fetch_catalog).await.unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 1);

        // Past the window: refetched.
        tokio::time::advance(Duration::from_secs(2)).await;
        cache.products_for_sales(fetch_catalog).await.unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_report_ranges_cached_per_key() {
        let cache = QueryCache::new();
        let fetches = AtomicU32::new(0);

        for range in [DateRange::All, DateRange::Week, DateRange::All] {
            cache
                .report(range, || async {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(ReportSummary::default())
                })
                .await
                .unwrap();
        }
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fetch_error_leaves_slot_empty() {
        let cache = QueryCache::new();
        let fetches = AtomicU32::new(0);

        let result = cache
            .dashboard_stats(|| async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Err::<DashboardStats, &str>("boom")
            })
            .await;
        assert!(result.is_err());

        // The failure was not cached; the next read fetches again.
        cache
            .dashboard_stats(|| async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok::<_, &str>(DashboardStats::default())
            })
            .await
            .unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_sale_mutation_clears_stock_views_but_not_categories() {
        let cache = QueryCache::new();
        let fetches = AtomicU32::new(0);

        let count_fetch = || async {
            fetches.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>(Vec::<Category>::new())
        };

        cache.categories_for_select(count_fetch).await.unwrap();
        cache
            .products_for_sales(|| async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ()>(page_of(&["Mug"]).data)
            })
            .await
            .unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 2);

        cache.apply(Mutation::SaleCreated).await;

        // Stock view refetches, category dropdown does not.
        cache
            .products_for_sales(|| async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ()>(page_of(&["Mug"]).data)
            })
            .await
            .unwrap();
        cache.categories_for_select(count_fetch).await.unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 3);
    }
}
