//! # dukkan-session: Workflow Orchestration
//!
//! The layer an embedding UI talks to. It owns no state of its own beyond
//! the query cache; it sequences the other crates:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     A Mutation Workflow                                 │
//! │                                                                         │
//! │   user action                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   1. validate locally (dukkan-core)   ── reject? → no request at all   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   2. issue ONE request (dukkan-client) ── fail?  → surface error,      │
//! │       │                                            invalidate nothing  │
//! │       ▼                                                                 │
//! │   3. invalidate touched views (dukkan-cache)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   4. return the stored entity                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads go through the cache; mutations report themselves to it. Nothing
//! here retries: the remote collaborator is the final arbiter and its
//! rejections are shown to the user as-is.

pub mod debounce;
pub mod error;
pub mod session;

pub use debounce::SearchDebouncer;
pub use error::{ErrorCode, SessionError, SessionResult};
pub use session::Session;

// Media collaborator contracts pass through unchanged; embedding shells
// wire concrete engines to the same surface they get workflows from.
pub use dukkan_client::media::{BarcodeDecoder, ImageUploader};
