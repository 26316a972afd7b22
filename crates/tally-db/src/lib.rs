//! # tally-db
//!
//! libSQL storage and services for the Tally audit trail.
//!
//! - [`service::AuditService`] owns the database handle and the checksum
//!   generator; the writer, query, actor and integrity repos add methods to it
//! - [`context`] resolves the caller's IP and user agent from the current
//!   request scope
//! - [`kyc`] wraps outbound KYC provider calls with timing and sanitized logging
//! - [`non_critical`] is the single place where failures are swallowed
//!
//! Uses the `libsql` crate (C `SQLite` fork) for local database files.

pub mod context;
pub mod error;
pub mod helpers;
pub mod kyc;
mod migrations;
pub mod non_critical;
pub mod params;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for audit storage.
pub struct AuditDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl AuditDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let audit_db = Self { db, conn };
        audit_db.run_migrations().await?;
        Ok(audit_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"alg-3fa85f6457174562"`.
    ///
    /// Uses `randomblob(8)` in SQL to produce 16-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(8)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
