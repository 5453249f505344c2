//! HTTP boundary for the Confhub property store.
//!
//! Thin request/response mapping over the core engines: handlers validate
//! nothing themselves beyond deserialization, delegate to the upsert/query
//! services, and translate engine results into the wire convention (200 with
//! a success flag, 400 with the flag cleared on validation or storage
//! failure). Secret masking, if a deployment needs it, layers on top of this
//! crate; stored values pass through untouched here.

pub mod error;
pub mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use confhub_core::{
    ConfigProperty, PropertyError, PropertyStore, QueryService, UpsertEngine, UpsertRequest,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use error::{ApiServerError, ApiServerResult};
use models::{
    DeleteParams, ListParams, PropertyDeleteResponse, PropertyUpdateRequest,
    PropertyUpdateResponse, ResolveParams,
};

struct ApiState {
    upserts: UpsertEngine,
    queries: QueryService,
    store: Arc<dyn PropertyStore>,
}

/// Configured API server, ready to serve or hand out its router.
pub struct ApiServer {
    router: Router,
}

impl ApiServer {
    /// Build the router over the given store.
    ///
    /// `cors_origin` pins the browser origin allowed to call the API; `None`
    /// allows any origin (suitable behind a trusted proxy).
    #[must_use]
    pub fn new(store: Arc<dyn PropertyStore>, cors_origin: Option<HeaderValue>) -> Self {
        let state = Arc::new(ApiState {
            upserts: UpsertEngine::new(store.clone()),
            queries: QueryService::new(store.clone()),
            store,
        });

        let cors = cors_origin.map_or_else(
            || {
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any)
            },
            |origin| {
                CorsLayer::new()
                    .allow_origin(origin)
                    .allow_methods(Any)
                    .allow_headers(Any)
            },
        );

        let router = Router::new()
            .route("/health", get(health))
            .route("/api/properties/update", post(update_property))
            .route(
                "/api/properties",
                get(list_properties).delete(delete_properties),
            )
            .route("/api/properties/resolve", get(resolve_property))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        Self { router }
    }

    /// Consume the server and return its router, mainly for tests.
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Bind the listener and serve until shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or serving fails.
    pub async fn serve(self, addr: SocketAddr) -> ApiServerResult<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ApiServerError::Bind { addr, source })?;
        info!(%addr, "property api listening");
        axum::serve(listener, self.router)
            .await
            .map_err(|source| ApiServerError::Serve { source })
    }
}

/// Engine failure translated to the wire convention: 400 with the success
/// flag cleared. Storage details are logged here, not leaked to clients.
struct ApiFailure(PropertyError);

impl From<PropertyError> for ApiFailure {
    fn from(err: PropertyError) -> Self {
        Self(err)
    }
}

impl ApiFailure {
    fn message(&self) -> String {
        match &self.0 {
            PropertyError::Validation { field } => {
                format!("validation failed: {field} is required")
            }
            PropertyError::Storage { operation, .. } => {
                error!(error = %self.0, operation, "property store operation failed");
                "storage failure".to_string()
            }
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let message = self.message();
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn update_property(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<PropertyUpdateRequest>,
) -> Response {
    let echoed_key = request.key.clone();
    let outcome = state
        .upserts
        .upsert(UpsertRequest {
            application: request.application,
            profile: request.profile,
            label: request.label,
            key: request.key,
            value: request.value,
        })
        .await;

    match outcome {
        Ok(row) => (
            StatusCode::OK,
            Json(PropertyUpdateResponse {
                success: true,
                message: "property updated".to_string(),
                key: row.key,
                value: Some(row.value),
            }),
        )
            .into_response(),
        Err(err) => {
            let failure = ApiFailure::from(err);
            (
                StatusCode::BAD_REQUEST,
                Json(PropertyUpdateResponse {
                    success: false,
                    message: failure.message(),
                    key: echoed_key,
                    value: None,
                }),
            )
                .into_response()
        }
    }
}

async fn list_properties(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ConfigProperty>>, ApiFailure> {
    let rows = state
        .queries
        .list(&params.application, &params.profile)
        .await?;
    Ok(Json(rows))
}

async fn resolve_property(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<ResolveParams>,
) -> Result<Response, ApiFailure> {
    let resolved = state
        .queries
        .resolve(
            &params.application,
            &params.profile,
            params.label.as_deref(),
            &params.key,
        )
        .await?;
    Ok(resolved.map_or_else(
        || StatusCode::NOT_FOUND.into_response(),
        |row| Json(row).into_response(),
    ))
}

async fn delete_properties(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<PropertyDeleteResponse>, ApiFailure> {
    let deleted = state
        .store
        .delete_by_application_profile_label(
            &params.application,
            &params.profile,
            params.label.as_deref(),
        )
        .await
        .map_err(|source| PropertyError::Storage {
            operation: "delete_by_application_profile_label",
            source,
        })?;
    Ok(Json(PropertyDeleteResponse {
        success: true,
        message: format!("deleted {deleted} properties"),
    }))
}
