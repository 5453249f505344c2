//! Persistence seam consumed by the engines.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{ConfigProperty, NewProperty};

/// Durable home of configuration rows.
///
/// Implementations must enforce at-most-one-row-per-tuple as a hard
/// constraint and report a collision as [`StoreError::Conflict`]; the upsert
/// engine treats its own pre-check as an optimisation and relies on the
/// constraint for correctness under concurrent writers.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// All rows for an (application, profile) pair, in stable store order.
    async fn find_by_application_and_profile(
        &self,
        application: &str,
        profile: &str,
    ) -> Result<Vec<ConfigProperty>, StoreError>;

    /// Persist a new row, assigning `id` and `created_at`.
    async fn insert(&self, draft: NewProperty) -> Result<ConfigProperty, StoreError>;

    /// Replace the value of the row with the given id; all other fields
    /// stay untouched.
    async fn update_value(&self, id: Uuid, value: &str) -> Result<ConfigProperty, StoreError>;

    /// Administrative delete scoped to application+profile+label; returns
    /// the number of rows removed. Not used by the hot path.
    async fn delete_by_application_profile_label(
        &self,
        application: &str,
        profile: &str,
        label: Option<&str>,
    ) -> Result<u64, StoreError>;
}
