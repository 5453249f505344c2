//! Atomic create-or-update of a single configuration row.

use std::sync::Arc;

use crate::error::{PropertyError, PropertyResult, StoreError};
use crate::model::{ConfigProperty, NewProperty};
use crate::resolve::resolve;
use crate::store::PropertyStore;

/// An unvalidated write request, as it arrives from the transport layer.
#[derive(Debug, Clone)]
pub struct UpsertRequest {
    /// Owning client system.
    pub application: String,
    /// Deployment environment.
    pub profile: String,
    /// Optional version/branch qualifier.
    pub label: Option<String>,
    /// Dotted setting name.
    pub key: String,
    /// Payload; may be empty but not absent.
    pub value: String,
}

impl UpsertRequest {
    /// Validate and normalise the request into a row draft.
    ///
    /// Application, profile and key must be non-empty after trimming and are
    /// stored trimmed. An empty or whitespace-only label collapses to `None`
    /// so the optional dimension stays a real sum type. The value passes
    /// through untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Validation`] naming the first empty field.
    pub fn into_draft(self) -> PropertyResult<NewProperty> {
        let application = required(&self.application, "application")?;
        let profile = required(&self.profile, "profile")?;
        let key = required(&self.key, "key")?;
        let label = self
            .label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(str::to_string);
        Ok(NewProperty {
            application,
            profile,
            label,
            key,
            value: self.value,
        })
    }
}

fn required(value: &str, field: &'static str) -> PropertyResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PropertyError::Validation { field });
    }
    Ok(trimmed.to_string())
}

/// Create-or-update engine; stateless between calls.
#[derive(Clone)]
pub struct UpsertEngine {
    store: Arc<dyn PropertyStore>,
}

impl UpsertEngine {
    /// Build an engine over the given store.
    #[must_use]
    pub const fn new(store: Arc<dyn PropertyStore>) -> Self {
        Self { store }
    }

    /// Create the row for the request's tuple, or replace its value in place.
    ///
    /// An existing row keeps its `id`, `label` and `created_at`; only the
    /// value changes. When a concurrent writer wins the insert race, the
    /// store's uniqueness constraint rejects our insert and the write is
    /// retried as an update exactly once. Returns the post-write row.
    ///
    /// # Errors
    ///
    /// [`PropertyError::Validation`] for empty required fields (no row is
    /// touched); [`PropertyError::Storage`] when the store fails, with no
    /// partial write visible.
    pub async fn upsert(&self, request: UpsertRequest) -> PropertyResult<ConfigProperty> {
        let draft = request.into_draft()?;
        let candidates = self
            .store
            .find_by_application_and_profile(&draft.application, &draft.profile)
            .await
            .map_err(|source| PropertyError::storage("upsert.find", source))?;

        if let Some(existing) = resolve(&candidates, &draft.key, draft.label.as_deref()) {
            return self
                .store
                .update_value(existing.id, &draft.value)
                .await
                .map_err(|source| PropertyError::storage("upsert.update", source));
        }

        match self.store.insert(draft.clone()).await {
            Ok(row) => Ok(row),
            Err(StoreError::Conflict) => self.retry_as_update(draft).await,
            Err(source) => Err(PropertyError::storage("upsert.insert", source)),
        }
    }

    /// A concurrent writer inserted the tuple first; its row must be
    /// visible now, so re-read and update it.
    async fn retry_as_update(&self, draft: NewProperty) -> PropertyResult<ConfigProperty> {
        let candidates = self
            .store
            .find_by_application_and_profile(&draft.application, &draft.profile)
            .await
            .map_err(|source| PropertyError::storage("upsert.retry_find", source))?;
        match resolve(&candidates, &draft.key, draft.label.as_deref()) {
            Some(existing) => self
                .store
                .update_value(existing.id, &draft.value)
                .await
                .map_err(|source| PropertyError::storage("upsert.retry_update", source)),
            // The winner's row vanished between the conflict and the
            // re-read; give up rather than loop.
            None => Err(PropertyError::storage(
                "upsert.retry_find",
                StoreError::Conflict,
            )),
        }
    }
}
