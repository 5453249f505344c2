//! # Design
//!
//! - Centralize application-level errors for the boot sequence.
//! - Keep error messages constant while carrying context fields for debugging.
//! - Preserve source errors without re-logging at call sites.

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Environment configuration was missing.
    #[error("missing environment configuration")]
    MissingEnv {
        /// Name of the missing environment variable.
        name: &'static str,
    },
    /// Configuration values were invalid.
    #[error("invalid configuration")]
    InvalidConfig {
        /// Environment variable that failed parsing.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// Database connection failed.
    #[error("database connection failed")]
    Database {
        /// Operation identifier.
        operation: &'static str,
        /// Source database error.
        source: sqlx::Error,
    },
    /// Store setup (migrations) failed.
    #[error("store setup failed")]
    StoreSetup {
        /// Source setup error.
        source: confhub_store::SetupError,
    },
    /// Sample seeding failed.
    #[error("sample seeding failed")]
    Seed {
        /// Source property engine error.
        source: confhub_core::PropertyError,
    },
    /// Telemetry initialisation failed.
    #[error("telemetry initialisation failed")]
    Telemetry {
        /// Source subscriber error.
        source: anyhow::Error,
    },
    /// API server operations failed.
    #[error("api server operation failed")]
    ApiServer {
        /// Source API server error.
        source: confhub_api::error::ApiServerError,
    },
}
