//! # dukkan-cache: Query Cache & Invalidation
//!
//! In-memory cache over the remote API's read endpoints. Callers never
//! fetch directly; they ask the cache, passing a fetch future to run on a
//! miss.
//!
//! ## Freshness Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Freshness Model                                    │
//! │                                                                         │
//! │  Paged tables (products, sales, categories)                             │
//! │      fresh until a mutation invalidates them; page flips and           │
//! │      repeat visits reuse the cached page                                │
//! │                                                                         │
//! │  Flat/aggregate views                            TTL                    │
//! │      products-for-sales (sale form stock)        2 min                  │
//! │      categories-for-select (dropdown)            5 min                  │
//! │      reports (per date range)                    2 min                  │
//! │      dashboard counters                          2 min                  │
//! │                                                                         │
//! │  Either way, any mutation that touches a view clears it immediately;   │
//! │  TTLs only bound how long an UNtouched view may be served.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Staleness is a UI-freshness concern only. Correctness of stock checks
//! never depends on it: the remote collaborator re-validates every write.

pub mod invalidation;
pub mod store;

pub use invalidation::{Mutation, QueryFamily};
pub use store::QueryCache;
