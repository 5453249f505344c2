#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Property resolution and upsert engine for the Confhub configuration store.
//!
//! Layout: `model.rs` (row types and validation), `resolve.rs` (pure lookup
//! over candidate sets), `upsert.rs` (atomic create-or-update), `query.rs`
//! (read-only facade), `store.rs` (persistence seam).

pub mod error;
pub mod model;
pub mod query;
pub mod resolve;
pub mod store;
pub mod upsert;

pub use error::{PropertyError, PropertyResult, StoreError};
pub use model::{ConfigProperty, NewProperty};
pub use query::QueryService;
pub use resolve::resolve;
pub use store::PropertyStore;
pub use upsert::{UpsertEngine, UpsertRequest};
