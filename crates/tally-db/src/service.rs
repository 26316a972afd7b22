//! Service layer for the audit trail.
//!
//! `AuditService` wraps `AuditDb` (raw database access) and the
//! `ChecksumGenerator` holding the server-side salt. All repo methods are
//! implemented as `impl AuditService` in `repos/` and `kyc.rs`.

use tally_config::TallyConfig;
use tally_core::checksum::ChecksumGenerator;

use crate::AuditDb;
use crate::error::DatabaseError;

/// Owns the audit database and the checksum salt.
///
/// Every write follows this pipeline:
/// 1. Resolve request context
/// 2. Classify severity
/// 3. Freeze `created_at` and compute the checksum
/// 4. Generate the id and INSERT
pub struct AuditService {
    db: AuditDb,
    checksum: ChecksumGenerator,
}

impl AuditService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `checksum` - Generator carrying the salt for freeze checksums.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(
        db_path: &str,
        checksum: ChecksumGenerator,
    ) -> Result<Self, DatabaseError> {
        let db = AuditDb::open_local(db_path).await?;
        if checksum.is_insecure() {
            tracing::warn!("audit salt not configured; checksums use the insecure development salt");
        }
        Ok(Self { db, checksum })
    }

    /// Create a service from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Config` if `audit.require_salt` is set and no
    /// salt is configured, or `DatabaseError` if the database cannot be opened.
    pub async fn from_config(config: &TallyConfig) -> Result<Self, DatabaseError> {
        let checksum = config.audit.checksum_generator()?;
        Self::new_local(&config.database.path, checksum).await
    }

    /// Create from an existing `AuditDb` (for testing).
    #[must_use]
    pub const fn from_db(db: AuditDb, checksum: ChecksumGenerator) -> Self {
        Self { db, checksum }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &AuditDb {
        &self.db
    }

    /// Access the checksum generator.
    #[must_use]
    pub const fn checksum(&self) -> &ChecksumGenerator {
        &self.checksum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_config::{AuditConfig, ConfigError};

    #[tokio::test]
    async fn new_local_in_memory() {
        let svc = AuditService::new_local(":memory:", ChecksumGenerator::new("pepper"))
            .await
            .unwrap();
        assert!(!svc.checksum().is_insecure());
    }

    #[tokio::test]
    async fn from_config_falls_back_to_insecure_salt() {
        let mut config = TallyConfig::default();
        config.database.path = ":memory:".into();
        let svc = AuditService::from_config(&config).await.unwrap();
        assert!(svc.checksum().is_insecure());
    }

    #[tokio::test]
    async fn from_config_strict_without_salt_fails() {
        let mut config = TallyConfig::default();
        config.database.path = ":memory:".into();
        config.audit = AuditConfig {
            salt: String::new(),
            require_salt: true,
        };
        let err = AuditService::from_config(&config).await.err().unwrap();
        assert!(matches!(
            err,
            DatabaseError::Config(ConfigError::NotConfigured { .. })
        ));
    }

    #[tokio::test]
    async fn from_config_uses_configured_salt() {
        let mut config = TallyConfig::default();
        config.database.path = ":memory:".into();
        config.audit.salt = "pepper".into();
        let svc = AuditService::from_config(&config).await.unwrap();
        assert!(!svc.checksum().is_insecure());
    }
}
