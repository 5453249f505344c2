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

//! Postgres-backed property store for Confhub: migrations, the
//! [`confhub_core::PropertyStore`] implementation, and opt-in sample seeding.

pub mod error;
pub mod postgres;
pub mod seed;

pub use error::{Result as StoreSetupResult, SetupError};
pub use postgres::PgPropertyStore;
