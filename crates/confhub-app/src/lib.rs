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
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Confhub application bootstrap wiring.
//!
//! Layout: `bootstrap.rs` (environment loading and boot sequence),
//! `telemetry.rs` (tracing subscriber setup), `error.rs` (typed boot errors).

/// Application bootstrap and environment loading.
pub mod bootstrap;
/// Application-level error types.
pub mod error;
/// Tracing subscriber configuration.
pub mod telemetry;

pub use bootstrap::run_app;
pub use error::{AppError, AppResult};
