//! Database error types for tally-db.

use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned malformed data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., an entry that breaks a stream invariant).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A core lookup or parse failed.
    #[error(transparent)]
    Core(#[from] tally_core::errors::CoreError),

    /// The service could not be built from configuration.
    #[error(transparent)]
    Config(#[from] tally_config::ConfigError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
