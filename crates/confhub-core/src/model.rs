//! Row types for the configuration store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single stored configuration row.
///
/// Uniqueness is guaranteed per `(application, profile, label, key)` tuple,
/// with two labels equal when both are absent or both are the same string.
/// The constraint lives at the store boundary; engine-side checks are an
/// optimisation only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigProperty {
    /// Store-assigned identity; immutable, never used for lookup.
    pub id: Uuid,
    /// Owning client system.
    pub application: String,
    /// Deployment environment (e.g. `dev`, `prod`).
    pub profile: String,
    /// Optional version/branch qualifier; `None` means "no label constraint".
    pub label: Option<String>,
    /// Dotted setting name.
    pub key: String,
    /// Opaque payload; may carry an externally-encrypted marker.
    pub value: String,
    /// Assigned once on insert, never mutated by updates.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A validated draft for a row that does not exist yet.
///
/// Produced by [`crate::upsert::UpsertRequest::into_draft`]; fields are
/// already trimmed and the label normalised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProperty {
    /// Owning client system.
    pub application: String,
    /// Deployment environment.
    pub profile: String,
    /// Optional version/branch qualifier.
    pub label: Option<String>,
    /// Dotted setting name.
    pub key: String,
    /// Opaque payload; may be empty.
    pub value: String,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn row(
        application: &str,
        profile: &str,
        label: Option<&str>,
        key: &str,
        value: &str,
    ) -> ConfigProperty {
        ConfigProperty {
            id: Uuid::new_v4(),
            application: application.to_string(),
            profile: profile.to_string(),
            label: label.map(str::to_string),
            key: key.to_string(),
            value: value.to_string(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::row;

    #[test]
    fn config_property_serializes_created_at_with_wire_name() {
        let property = row("myapp", "dev", None, "server.port", "8080");
        let json = serde_json::to_value(&property).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
        assert!(json.get("label").unwrap().is_null());
        assert_eq!(json.get("key").unwrap(), "server.port");
    }
}
