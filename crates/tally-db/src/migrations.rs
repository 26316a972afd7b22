//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent re-running.

use crate::AuditDb;
use crate::error::DatabaseError;

/// Audit table, 6 indexes, 2 append-only triggers, actor identity tables.
const MIGRATION_001: &str = include_str!("../migrations/001_audit.sql");

impl AuditDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_audit: {e}")))?;
        Ok(())
    }
}
