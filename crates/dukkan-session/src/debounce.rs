//! # Search Debouncing
//!
//! Search boxes fire on every keystroke; the paged list endpoints should
//! only see the value once typing settles. Each keystroke submits here;
//! only the submission still newest after the quiet window survives.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::sleep;
use tracing::trace;

/// Default quiet window before a search term is considered settled.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Keystroke debouncer for search inputs.
///
/// ## Example
/// ```rust,no_run
/// # use dukkan_session::SearchDebouncer;
/// # async fn demo() {
/// let debouncer = SearchDebouncer::default();
/// // Fires on every keystroke; only the last value survives the window.
/// if let Some(settled) = debouncer.settle("mug".to_string()).await {
///     // issue the search with `settled`
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct SearchDebouncer {
    window: Duration,
    generation: AtomicU64,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        SearchDebouncer::new(DEFAULT_DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub fn new(window: Duration) -> Self {
        SearchDebouncer {
            window,
            generation: AtomicU64::new(0),
        }
    }

    /// Submits one keystroke's value.
    ///
    /// Resolves to `Some(value)` when no newer submission arrived during
    /// the quiet window, `None` when this value was superseded.
    pub async fn settle(&self, value: String) -> Option<String> {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        sleep(self.window).await;
        if self.generation.load(Ordering::SeqCst) == my_generation {
            trace!(query = %value, "Search term settled");
            Some(value)
        } else {
            trace!(query = %value, "Search term superseded");
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
