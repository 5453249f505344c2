//! HTTP DTOs for the property API.
//!
//! Field names are fixed for compatibility with existing clients of the
//! update endpoint; do not rename without a protocol bump.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/properties/update`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyUpdateRequest {
    /// Owning client system.
    pub application: String,
    /// Deployment environment.
    pub profile: String,
    /// Optional version/branch qualifier.
    #[serde(default)]
    pub label: Option<String>,
    /// Dotted setting name.
    pub key: String,
    /// Payload; may be empty.
    pub value: String,
}

/// Response of `POST /api/properties/update`; `value` is `null` on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyUpdateResponse {
    /// Whether the write took effect.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Echo of the targeted key.
    pub key: String,
    /// Canonical post-write value, or `null` on failure.
    pub value: Option<String>,
}

/// Response of `DELETE /api/properties`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDeleteResponse {
    /// Whether the delete executed.
    pub success: bool,
    /// Human-readable outcome including the removed-row count.
    pub message: String,
}

/// Query string of `GET /api/properties`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
    /// Owning client system.
    pub application: String,
    /// Deployment environment.
    pub profile: String,
}

/// Query string of `GET /api/properties/resolve`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveParams {
    /// Owning client system.
    pub application: String,
    /// Deployment environment.
    pub profile: String,
    /// Optional version/branch qualifier.
    #[serde(default)]
    pub label: Option<String>,
    /// Dotted setting name.
    pub key: String,
}

/// Query string of `DELETE /api/properties`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteParams {
    /// Owning client system.
    pub application: String,
    /// Deployment environment.
    pub profile: String,
    /// Optional version/branch qualifier; absent targets unlabelled rows.
    #[serde(default)]
    pub label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_label_defaults_to_none() {
        let request: PropertyUpdateRequest = serde_json::from_str(
            r#"{"application":"myapp","profile":"dev","key":"server.port","value":"8080"}"#,
        )
        .unwrap();
        assert!(request.label.is_none());
    }

    #[test]
    fn failure_response_serializes_null_value() {
        let response = PropertyUpdateResponse {
            success: false,
            message: "validation failed: application is required".to_string(),
            key: "server.port".to_string(),
            value: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["value"].is_null());
    }
}
