//! Environment loading and the application boot sequence.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use confhub_api::ApiServer;
use confhub_core::PropertyStore;
use confhub_store::{PgPropertyStore, seed};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::telemetry::{self, LogFormat, LoggingConfig};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:7080";
const MAX_POOL_CONNECTIONS: u32 = 10;

/// Everything the boot sequence needs, resolved from the environment.
#[derive(Debug)]
pub(crate) struct BootstrapConfig {
    pub(crate) database_url: String,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) cors_origin: Option<HeaderValue>,
    pub(crate) seed_sample: bool,
    pub(crate) logging: LoggingConfig,
}

impl BootstrapConfig {
    /// Resolve configuration from process environment variables.
    pub(crate) fn from_env() -> AppResult<Self> {
        Self::from_lookup(&|name| std::env::var(name).ok())
    }

    /// Resolve configuration through an injectable lookup, for tests.
    pub(crate) fn from_lookup(
        lookup: &dyn Fn(&'static str) -> Option<String>,
    ) -> AppResult<Self> {
        let database_url = lookup("DATABASE_URL").ok_or(AppError::MissingEnv {
            name: "DATABASE_URL",
        })?;

        let bind_raw =
            lookup("CONFHUB_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw.parse().map_err(|_| AppError::InvalidConfig {
            field: "CONFHUB_BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let cors_origin = lookup("CONFHUB_CORS_ORIGIN")
            .map(|origin| {
                HeaderValue::from_str(&origin).map_err(|_| AppError::InvalidConfig {
                    field: "CONFHUB_CORS_ORIGIN",
                    value: origin,
                })
            })
            .transpose()?;

        let seed_sample = lookup("CONFHUB_SEED_SAMPLE")
            .is_some_and(|flag| matches!(flag.as_str(), "1" | "true" | "yes"));

        let logging = LoggingConfig {
            level: lookup("CONFHUB_LOG_LEVEL")
                .unwrap_or_else(|| telemetry::DEFAULT_LOG_LEVEL.to_string()),
            format: lookup("CONFHUB_LOG_FORMAT")
                .map_or_else(LogFormat::infer, |value| LogFormat::parse(&value)),
        };

        Ok(Self {
            database_url,
            bind_addr,
            cors_origin,
            seed_sample,
            logging,
        })
    }
}

/// Entry point for the Confhub boot sequence.
///
/// # Errors
///
/// Returns an error if environment resolution, telemetry setup, store
/// initialisation, seeding, or serving fails.
pub async fn run_app() -> AppResult<()> {
    let config = BootstrapConfig::from_env()?;
    telemetry::init_logging(&config.logging)
        .map_err(|source| AppError::Telemetry { source })?;

    info!("confhub bootstrap starting");

    let pool = PgPoolOptions::new()
        .max_connections(MAX_POOL_CONNECTIONS)
        .connect(&config.database_url)
        .await
        .map_err(|source| AppError::Database {
            operation: "pool.connect",
            source,
        })?;

    let store = PgPropertyStore::new(pool)
        .await
        .map_err(|source| AppError::StoreSetup { source })?;
    let store: Arc<dyn PropertyStore> = Arc::new(store);

    // Seeding never runs implicitly; deployments opt in per boot.
    if config.seed_sample {
        let applied = seed::apply(store.clone(), seed::SAMPLE_CATALOG)
            .await
            .map_err(|source| AppError::Seed { source })?;
        info!(applied, "sample catalog seeded");
    }

    ApiServer::new(store, config.cors_origin)
        .serve(config.bind_addr)
        .await
        .map_err(|source| AppError::ApiServer { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&'static str, &str)]) -> HashMap<&'static str, String> {
        vars.iter()
            .map(|(name, value)| (*name, (*value).to_string()))
            .collect()
    }

    #[test]
    fn minimal_environment_uses_defaults() {
        let vars = lookup(&[("DATABASE_URL", "postgres://localhost/confhub")]);
        let config = BootstrapConfig::from_lookup(&|name| vars.get(name).cloned()).unwrap();

        assert_eq!(config.database_url, "postgres://localhost/confhub");
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert!(config.cors_origin.is_none());
        assert!(!config.seed_sample);
        assert_eq!(config.logging.level, telemetry::DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn missing_database_url_is_a_typed_error() {
        let vars = lookup(&[]);
        let err = BootstrapConfig::from_lookup(&|name| vars.get(name).cloned()).unwrap_err();
        assert!(matches!(
            err,
            AppError::MissingEnv {
                name: "DATABASE_URL"
            }
        ));
    }

    #[test]
    fn invalid_bind_addr_is_rejected() {
        let vars = lookup(&[
            ("DATABASE_URL", "postgres://localhost/confhub"),
            ("CONFHUB_BIND_ADDR", "not-an-addr"),
        ]);
        let err = BootstrapConfig::from_lookup(&|name| vars.get(name).cloned()).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidConfig {
                field: "CONFHUB_BIND_ADDR",
                ..
            }
        ));
    }

    #[test]
    fn full_environment_round_trips() {
        let vars = lookup(&[
            ("DATABASE_URL", "postgres://localhost/confhub"),
            ("CONFHUB_BIND_ADDR", "0.0.0.0:9000"),
            ("CONFHUB_CORS_ORIGIN", "http://localhost:3000"),
            ("CONFHUB_SEED_SAMPLE", "1"),
            ("CONFHUB_LOG_LEVEL", "debug"),
            ("CONFHUB_LOG_FORMAT", "json"),
        ]);
        let config = BootstrapConfig::from_lookup(&|name| vars.get(name).cloned()).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(
            config.cors_origin,
            Some(HeaderValue::from_static("http://localhost:3000"))
        );
        assert!(config.seed_sample);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }
}
