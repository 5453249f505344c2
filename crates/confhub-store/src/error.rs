//! Setup errors for the Postgres store.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Result alias for store setup operations.
pub type Result<T> = std::result::Result<T, SetupError>;

/// Errors raised while preparing the store for use.
#[derive(Debug)]
pub enum SetupError {
    /// Migration execution failed.
    MigrationFailed {
        /// Underlying migration error.
        source: sqlx::migrate::MigrateError,
    },
}

impl Display for SetupError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MigrationFailed { .. } => formatter.write_str("migration failed"),
        }
    }
}

impl Error for SetupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MigrationFailed { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_error_display_and_source() {
        let migration = SetupError::MigrationFailed {
            source: sqlx::migrate::MigrateError::VersionMissing(1),
        };
        assert_eq!(migration.to_string(), "migration failed");
        assert!(migration.source().is_some());
    }
}
