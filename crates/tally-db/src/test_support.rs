//! Shared test utilities for tally-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use tally_core::checksum::ChecksumGenerator;

    use crate::AuditDb;
    use crate::service::AuditService;

    /// Salt used by in-crate tests.
    pub const TEST_SALT: &str = "test-salt";

    /// Create an in-memory `AuditService` with a fixed salt.
    pub async fn test_service() -> AuditService {
        let db = AuditDb::open_local(":memory:").await.unwrap();
        AuditService::from_db(db, ChecksumGenerator::new(TEST_SALT))
    }
}
