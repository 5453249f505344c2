//! Postgres implementation of the property store seam.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use confhub_core::{ConfigProperty, NewProperty, PropertyStore, StoreError};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{Result, SetupError};

const SELECT_BY_APPLICATION_PROFILE: &str = r"
    SELECT id, application, profile, label, prop_key, prop_value, created_at
    FROM properties
    WHERE application = $1 AND profile = $2
    ORDER BY created_at, id
";

const INSERT_PROPERTY: &str = r"
    INSERT INTO properties (id, application, profile, label, prop_key, prop_value)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING id, application, profile, label, prop_key, prop_value, created_at
";

const UPDATE_PROPERTY_VALUE: &str = r"
    UPDATE properties
    SET prop_value = $2
    WHERE id = $1
    RETURNING id, application, profile, label, prop_key, prop_value, created_at
";

const DELETE_BY_APPLICATION_PROFILE_LABEL: &str = r"
    DELETE FROM properties
    WHERE application = $1 AND profile = $2 AND label IS NOT DISTINCT FROM $3
";

/// Database-backed repository for configuration rows.
#[derive(Clone)]
pub struct PgPropertyStore {
    pool: PgPool,
}

/// Raw projection of the `properties` table.
#[derive(Debug, Clone, FromRow)]
struct PropertyRow {
    id: Uuid,
    application: String,
    profile: String,
    label: Option<String>,
    prop_key: String,
    prop_value: String,
    created_at: DateTime<Utc>,
}

impl From<PropertyRow> for ConfigProperty {
    fn from(row: PropertyRow) -> Self {
        Self {
            id: row.id,
            application: row.application,
            profile: row.profile,
            label: row.label,
            key: row.prop_key,
            value: row.prop_value,
            created_at: row.created_at,
        }
    }
}

fn map_store_err(operation: &'static str) -> impl FnOnce(sqlx::Error) -> StoreError {
    move |source| {
        if let sqlx::Error::Database(db) = &source
            && db.is_unique_violation()
        {
            return StoreError::Conflict;
        }
        StoreError::Backend {
            operation,
            source: anyhow::Error::new(source),
        }
    }
}

impl PgPropertyStore {
    /// Initialise the store, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if migrations fail or the database is unreachable.
    pub async fn new(pool: PgPool) -> Result<Self> {
        let mut migrator = sqlx::migrate!("./migrations");
        migrator.set_ignore_missing(true);
        migrator
            .run(&pool)
            .await
            .map_err(|source| SetupError::MigrationFailed { source })?;
        Ok(Self { pool })
    }

    /// Access the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PropertyStore for PgPropertyStore {
    async fn find_by_application_and_profile(
        &self,
        application: &str,
        profile: &str,
    ) -> std::result::Result<Vec<ConfigProperty>, StoreError> {
        let rows: Vec<PropertyRow> = sqlx::query_as(SELECT_BY_APPLICATION_PROFILE)
            .bind(application)
            .bind(profile)
            .fetch_all(&self.pool)
            .await
            .map_err(map_store_err("find_by_application_and_profile"))?;
        Ok(rows.into_iter().map(ConfigProperty::from).collect())
    }

    async fn insert(
        &self,
        draft: NewProperty,
    ) -> std::result::Result<ConfigProperty, StoreError> {
        let row: PropertyRow = sqlx::query_as(INSERT_PROPERTY)
            .bind(Uuid::new_v4())
            .bind(&draft.application)
            .bind(&draft.profile)
            .bind(draft.label.as_deref())
            .bind(&draft.key)
            .bind(&draft.value)
            .fetch_one(&self.pool)
            .await
            .map_err(map_store_err("insert"))?;
        Ok(row.into())
    }

    async fn update_value(
        &self,
        id: Uuid,
        value: &str,
    ) -> std::result::Result<ConfigProperty, StoreError> {
        let row: Option<PropertyRow> = sqlx::query_as(UPDATE_PROPERTY_VALUE)
            .bind(id)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_store_err("update_value"))?;
        row.map(ConfigProperty::from)
            .ok_or(StoreError::RowVanished { id })
    }

    async fn delete_by_application_profile_label(
        &self,
        application: &str,
        profile: &str,
        label: Option<&str>,
    ) -> std::result::Result<u64, StoreError> {
        let result = sqlx::query(DELETE_BY_APPLICATION_PROFILE_LABEL)
            .bind(application)
            .bind(profile)
            .bind(label)
            .execute(&self.pool)
            .await
            .map_err(map_store_err("delete_by_application_profile_label"))?;
        Ok(result.rows_affected())
    }
}
