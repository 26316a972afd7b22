//! Freeze checksum verification.
//!
//! Recomputes each entry's checksum from its stored fields and stored
//! `created_at`, with the service's salt. A mismatch means the row was
//! altered after it was written (or the salt changed).

use tally_core::entities::AuditLogEntry;
use tally_core::errors::CoreError;
use tally_core::responses::{IntegrityReport, IntegrityStatus};

use crate::error::DatabaseError;
use crate::repos::query::ENTRY_COLUMNS;
use crate::service::AuditService;

const VERIFY_PAGE_SIZE: u32 = 500;

impl AuditService {
    /// Check one entry against its stored checksum.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` if no entry has this id, or
    /// `DatabaseError` if the query fails.
    pub async fn verify_entry(&self, id: &str) -> Result<IntegrityStatus, DatabaseError> {
        let entry = self
            .get_audit_entry(id)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "AuditLogEntry".into(),
                id: id.to_string(),
            })?;
        Ok(self.integrity_of(&entry))
    }

    /// Check every entry in the log, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn verify_all(&self) -> Result<IntegrityReport, DatabaseError> {
        let mut report = IntegrityReport::default();
        let mut offset = 0u32;

        loop {
            let sql = format!(
                "SELECT {ENTRY_COLUMNS} FROM audit_logs ORDER BY created_at ASC, rowid ASC
                 LIMIT {VERIFY_PAGE_SIZE} OFFSET {offset}"
            );
            let entries = self.query_entries(&sql, Vec::new()).await?;
            if entries.is_empty() {
                break;
            }

            for entry in entries {
                report.checked += 1;
                if self.integrity_of(&entry) == IntegrityStatus::Tampered {
                    tracing::warn!(id = %entry.id, action = %entry.action, "audit entry checksum mismatch");
                    report.tampered.push(entry.id);
                }
            }
            offset += VERIFY_PAGE_SIZE;
        }

        Ok(report)
    }

    fn integrity_of(&self, entry: &AuditLogEntry) -> IntegrityStatus {
        if self
            .checksum()
            .verify(&entry.checksum_fields(), &entry.freeze_checksum)
        {
            IntegrityStatus::Intact
        } else {
            IntegrityStatus::Tampered
        }
    }
}
