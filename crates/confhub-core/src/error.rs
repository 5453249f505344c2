//! Error types for the property engine.
//!
//! # Design
//!
//! - Keep error messages constant; carry operational context in structured fields.
//! - Preserve sources for diagnostics without logging at the failure site.
//! - "Not found" is never an error: reads return `Option`/empty collections.

use thiserror::Error;
use uuid::Uuid;

/// Result alias for property engine operations.
pub type PropertyResult<T> = Result<T, PropertyError>;

/// Errors surfaced by the resolution/upsert engines.
#[derive(Debug, Error)]
pub enum PropertyError {
    /// A required field was missing or empty after trimming.
    #[error("required field is empty")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A storage operation failed; no partial write is visible.
    #[error("storage operation failed")]
    Storage {
        /// Operation identifier.
        operation: &'static str,
        /// Source store error.
        source: StoreError,
    },
}

impl PropertyError {
    pub(crate) const fn storage(operation: &'static str, source: StoreError) -> Self {
        Self::Storage { operation, source }
    }
}

/// Errors raised by [`crate::store::PropertyStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Insert collided with an existing row for the same tuple.
    #[error("property tuple already exists")]
    Conflict,
    /// Update targeted a row id that no longer exists.
    #[error("row missing for update")]
    RowVanished {
        /// Id the update targeted.
        id: Uuid,
    },
    /// The storage backend failed or was unreachable.
    #[error("storage backend failed")]
    Backend {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying backend error.
        #[source]
        source: anyhow::Error,
    },
}
