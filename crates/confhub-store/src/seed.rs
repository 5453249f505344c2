//! Opt-in sample catalog seeding.
//!
//! Seeding is an explicit routine invoked by deployment tooling (or the
//! binary when `CONFHUB_SEED_SAMPLE=1`), never implicit startup behavior.
//! Entries go through the upsert engine, so applying the catalog twice is
//! idempotent and never wipes live data.

use std::sync::Arc;

use confhub_core::{PropertyResult, PropertyStore, UpsertEngine, UpsertRequest};
use tracing::info;

/// One row of a seed catalog.
#[derive(Debug, Clone, Copy)]
pub struct SeedEntry {
    /// Owning client system.
    pub application: &'static str,
    /// Deployment environment.
    pub profile: &'static str,
    /// Optional version/branch qualifier.
    pub label: Option<&'static str>,
    /// Dotted setting name.
    pub key: &'static str,
    /// Payload; `{cipher}` prefixes mark externally-encrypted values.
    pub value: &'static str,
}

const fn entry(
    application: &'static str,
    profile: &'static str,
    key: &'static str,
    value: &'static str,
) -> SeedEntry {
    SeedEntry {
        application,
        profile,
        label: Some("master"),
        key,
        value,
    }
}

/// Demo catalog covering two applications across dev and prod.
pub const SAMPLE_CATALOG: &[SeedEntry] = &[
    entry("myapp", "dev", "server.port", "8080"),
    entry("myapp", "dev", "spring.datasource.url", "jdbc:h2:mem:devdb"),
    entry("myapp", "dev", "spring.datasource.username", "sa"),
    entry(
        "myapp",
        "dev",
        "spring.datasource.password",
        "{cipher}e2b6a6482bb9d05e2c0746dc5a2275ffa13f6e85070f308bbe32884dafc3d6f3",
    ),
    entry("myapp", "dev", "logging.level.com.example", "DEBUG"),
    entry("myapp", "dev", "app.name", "My Application - Development"),
    entry("myapp", "dev", "app.version", "1.0.0-SNAPSHOT"),
    entry("myapp", "dev", "app.features.feature1", "enabled"),
    entry("myapp", "dev", "app.features.feature2", "disabled"),
    entry(
        "myapp",
        "dev",
        "app.api.secret",
        "{cipher}3e8df3df39cee3697e5862bb1537e04f903e59330588a00602d2c8c8ad10e29a922f83200cdb62bb883448f480f6492e",
    ),
    entry("myapp", "prod", "server.port", "8080"),
    entry(
        "myapp",
        "prod",
        "spring.datasource.url",
        "jdbc:postgresql://prod-db:5432/myapp",
    ),
    entry("myapp", "prod", "spring.datasource.username", "myapp_user"),
    entry(
        "myapp",
        "prod",
        "spring.datasource.password",
        "{cipher}0a64ae6e3713f2c878b6b83af8e2c7e71ec6970ed7e6101be2e31baf3c77cb15",
    ),
    entry("myapp", "prod", "logging.level.com.example", "INFO"),
    entry("myapp", "prod", "app.name", "My Application - Production"),
    entry("myapp", "prod", "app.version", "1.0.0"),
    entry("myapp", "prod", "app.features.feature1", "enabled"),
    entry("myapp", "prod", "app.features.feature2", "enabled"),
    entry(
        "myapp",
        "prod",
        "app.api.secret",
        "{cipher}98014c40753887516390f560c8026ab28a4f476a5164a30e9ec1a0732d5b13dc0f9bdb4b2dfdbcfd056f60889acd8115",
    ),
    entry("userservice", "dev", "server.port", "8081"),
    entry("userservice", "dev", "spring.datasource.url", "jdbc:h2:mem:userdb"),
    entry("userservice", "dev", "app.name", "User Service"),
    entry("userservice", "dev", "app.cache.enabled", "false"),
    entry(
        "userservice",
        "dev",
        "app.jwt.secret",
        "{cipher}ddd3b614711b18798e40afc585656c48b2222e402c02fd1fe6cc9f4ad89c979abec4218a4a18be26dd1704fc0ed35963",
    ),
    entry("userservice", "prod", "server.port", "8081"),
    entry(
        "userservice",
        "prod",
        "spring.datasource.url",
        "jdbc:postgresql://prod-db:5432/userservice",
    ),
    entry("userservice", "prod", "app.name", "User Service"),
    entry("userservice", "prod", "app.cache.enabled", "true"),
    entry(
        "userservice",
        "prod",
        "app.jwt.secret",
        "{cipher}508b8d0abea72be4f3ed946e0dafe3ff6d0a8d54a03d2b700c1343ffd947062fc6e78d79730b92976cbe84dc5ba55663",
    ),
];

/// Upsert every entry of the catalog through the given store.
///
/// Returns the number of entries applied.
///
/// # Errors
///
/// Stops at the first failing upsert and returns its error; entries already
/// applied stay in place (each upsert is individually atomic).
pub async fn apply(
    store: Arc<dyn PropertyStore>,
    entries: &[SeedEntry],
) -> PropertyResult<usize> {
    let engine = UpsertEngine::new(store);
    for seed in entries {
        engine
            .upsert(UpsertRequest {
                application: seed.application.to_string(),
                profile: seed.profile.to_string(),
                label: seed.label.map(str::to_string),
                key: seed.key.to_string(),
                value: seed.value.to_string(),
            })
            .await?;
    }
    info!(entries = entries.len(), "seed catalog applied");
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use confhub_test_support::mocks::MemoryPropertyStore;

    #[tokio::test]
    async fn applying_the_catalog_twice_is_idempotent() {
        let store = Arc::new(MemoryPropertyStore::new());

        let first = apply(store.clone(), SAMPLE_CATALOG).await.unwrap();
        let rows_after_first = store.snapshot();
        let second = apply(store.clone(), SAMPLE_CATALOG).await.unwrap();
        let rows_after_second = store.snapshot();

        assert_eq!(first, SAMPLE_CATALOG.len());
        assert_eq!(second, SAMPLE_CATALOG.len());
        assert_eq!(rows_after_first.len(), rows_after_second.len());
        let ids_first: Vec<_> = rows_after_first.iter().map(|row| row.id).collect();
        let ids_second: Vec<_> = rows_after_second.iter().map(|row| row.id).collect();
        assert_eq!(ids_first, ids_second);
    }

    #[tokio::test]
    async fn catalog_rows_carry_the_master_label() {
        let store = Arc::new(MemoryPropertyStore::new());
        apply(store.clone(), SAMPLE_CATALOG).await.unwrap();
        assert!(store
            .snapshot()
            .iter()
            .all(|row| row.label.as_deref() == Some("master")));
    }
}
