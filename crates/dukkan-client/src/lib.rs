//! # dukkan-client: Remote API Boundary
//!
//! HTTP client for the external collaborator: the remote API that owns
//! all persisted Product/Sale/Category state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     dukkan-client                                       │
//! │                                                                         │
//! │  dukkan-session ──► InventoryApi (trait) ──► ApiClient (reqwest)       │
//! │                           │                                             │
//! │                           └──► in-memory fake in tests                  │
//! │                                                                         │
//! │  The collaborator is the sole authority for persisted state:           │
//! │  • POST /sales decrements product stock atomically server-side         │
//! │  • DELETE /sales/{id} restores it in the deletion transaction          │
//! │  • This crate issues requests; it never mutates stock itself           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Base URL / timeout configuration (TOML file + env)
//! - [`error`] - Request error taxonomy and message extraction
//! - [`http`] - The [`ApiClient`] and its JSON helpers
//! - [`api`] - The [`InventoryApi`] trait, the seam workflows depend on
//! - [`products`] / [`sales`] / [`categories`] / [`reports`] - endpoints
//! - [`media`] - black-box barcode/image collaborator contracts

pub mod api;
pub mod categories;
pub mod config;
pub mod error;
pub mod http;
pub mod media;
pub mod products;
pub mod reports;
pub mod sales;

pub use api::InventoryApi;
pub use config::ApiConfig;
pub use error::{ClientError, ClientResult};
pub use http::ApiClient;
