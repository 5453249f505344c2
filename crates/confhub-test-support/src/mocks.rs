//! In-memory [`PropertyStore`] double for unit and handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use confhub_core::{ConfigProperty, NewProperty, PropertyStore, StoreError};
use uuid::Uuid;

/// In-memory store enforcing the same tuple-uniqueness contract as the
/// Postgres implementation, with an unavailability toggle for error-path
/// tests.
#[derive(Default)]
pub struct MemoryPropertyStore {
    rows: Mutex<Vec<ConfigProperty>>,
    unavailable: Mutex<bool>,
}

impl MemoryPropertyStore {
    /// Fresh, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail as a backend error.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().expect("unavailable lock") = unavailable;
    }

    /// Snapshot of all rows in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ConfigProperty> {
        self.rows.lock().expect("rows lock").clone()
    }

    fn check_available(&self, operation: &'static str) -> Result<(), StoreError> {
        if *self.unavailable.lock().expect("unavailable lock") {
            return Err(StoreError::Backend {
                operation,
                source: anyhow::anyhow!("store marked unavailable"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PropertyStore for MemoryPropertyStore {
    async fn find_by_application_and_profile(
        &self,
        application: &str,
        profile: &str,
    ) -> Result<Vec<ConfigProperty>, StoreError> {
        self.check_available("find_by_application_and_profile")?;
        Ok(self
            .rows
            .lock()
            .expect("rows lock")
            .iter()
            .filter(|row| row.application == application && row.profile == profile)
            .cloned()
            .collect())
    }

    async fn insert(&self, draft: NewProperty) -> Result<ConfigProperty, StoreError> {
        self.check_available("insert")?;
        let mut rows = self.rows.lock().expect("rows lock");
        let collision = rows.iter().any(|row| {
            row.application == draft.application
                && row.profile == draft.profile
                && row.label == draft.label
                && row.key == draft.key
        });
        if collision {
            return Err(StoreError::Conflict);
        }
        let row = ConfigProperty {
            id: Uuid::new_v4(),
            application: draft.application,
            profile: draft.profile,
            label: draft.label,
            key: draft.key,
            value: draft.value,
            created_at: Utc::now(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn update_value(&self, id: Uuid, value: &str) -> Result<ConfigProperty, StoreError> {
        self.check_available("update_value")?;
        let mut rows = self.rows.lock().expect("rows lock");
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(StoreError::RowVanished { id })?;
        row.value = value.to_string();
        Ok(row.clone())
    }

    async fn delete_by_application_profile_label(
        &self,
        application: &str,
        profile: &str,
        label: Option<&str>,
    ) -> Result<u64, StoreError> {
        self.check_available("delete_by_application_profile_label")?;
        let mut rows = self.rows.lock().expect("rows lock");
        let before = rows.len();
        rows.retain(|row| {
            !(row.application == application
                && row.profile == profile
                && row.label.as_deref() == label)
        });
        Ok(u64::try_from(before - rows.len()).unwrap_or(u64::MAX))
    }
}
