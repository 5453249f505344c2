//! Read-only facade over a [`PropertyStore`].

use std::sync::Arc;

use crate::error::{PropertyError, PropertyResult};
use crate::model::ConfigProperty;
use crate::resolve::resolve;
use crate::store::PropertyStore;

/// Read-side service: listing and point resolution. Holds no state between
/// calls; every read goes back to the store.
#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn PropertyStore>,
}

impl QueryService {
    /// Build a query service over the given store.
    #[must_use]
    pub const fn new(store: Arc<dyn PropertyStore>) -> Self {
        Self { store }
    }

    /// All rows for an (application, profile) pair, unfiltered by label.
    ///
    /// List views show the full override set; point lookups go through
    /// [`Self::resolve`]. An empty collection is a legitimate result.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Storage`] when the store fails.
    pub async fn list(
        &self,
        application: &str,
        profile: &str,
    ) -> PropertyResult<Vec<ConfigProperty>> {
        self.store
            .find_by_application_and_profile(application, profile)
            .await
            .map_err(|source| PropertyError::storage("list.find", source))
    }

    /// Resolve the single row answering a (label, key) lookup.
    ///
    /// `Ok(None)` is a clean miss, distinguished from failure.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Storage`] when the store fails.
    pub async fn resolve(
        &self,
        application: &str,
        profile: &str,
        label: Option<&str>,
        key: &str,
    ) -> PropertyResult<Option<ConfigProperty>> {
        let candidates = self
            .store
            .find_by_application_and_profile(application, profile)
            .await
            .map_err(|source| PropertyError::storage("resolve.find", source))?;
        Ok(resolve(&candidates, key, label).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::model::{NewProperty, fixtures::row};
    use async_trait::async_trait;
    use uuid::Uuid;

    struct FixedStore {
        rows: Vec<ConfigProperty>,
    }

    #[async_trait]
    impl PropertyStore for FixedStore {
        async fn find_by_application_and_profile(
            &self,
            application: &str,
            profile: &str,
        ) -> Result<Vec<ConfigProperty>, StoreError> {
            Ok(self
                .rows
                .iter()
                .filter(|row| row.application == application && row.profile == profile)
                .cloned()
                .collect())
        }

        async fn insert(&self, _draft: NewProperty) -> Result<ConfigProperty, StoreError> {
            unimplemented!("read-only fixture")
        }

        async fn update_value(
            &self,
            id: Uuid,
            _value: &str,
        ) -> Result<ConfigProperty, StoreError> {
            Err(StoreError::RowVanished { id })
        }

        async fn delete_by_application_profile_label(
            &self,
            _application: &str,
            _profile: &str,
            _label: Option<&str>,
        ) -> Result<u64, StoreError> {
            Ok(0)
        }
    }

    fn service(rows: Vec<ConfigProperty>) -> QueryService {
        QueryService::new(Arc::new(FixedStore { rows }))
    }

    #[tokio::test]
    async fn list_returns_full_override_set() {
        let service = service(vec![
            row("myapp", "dev", None, "server.port", "8080"),
            row("myapp", "dev", Some("v1"), "server.port", "9090"),
            row("myapp", "prod", None, "server.port", "8080"),
        ]);

        let rows = service.list("myapp", "dev").await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn list_for_unknown_profile_is_empty_not_an_error() {
        let service = service(vec![row("myapp", "dev", None, "server.port", "8080")]);
        let rows = service.list("myapp", "missing-profile").await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn resolve_prefers_exact_label_and_falls_back_to_wildcard() {
        let service = service(vec![
            row("myapp", "dev", None, "server.port", "8080"),
            row("myapp", "dev", Some("v1"), "server.port", "9090"),
        ]);

        let labelled = service
            .resolve("myapp", "dev", Some("v1"), "server.port")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(labelled.value, "9090");

        let unlabelled = service
            .resolve("myapp", "dev", None, "server.port")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unlabelled.value, "8080");
    }

    #[tokio::test]
    async fn resolve_miss_is_ok_none() {
        let service = service(Vec::new());
        let resolved = service
            .resolve("myapp", "dev", None, "server.port")
            .await
            .unwrap();
        assert!(resolved.is_none());
    }
}
