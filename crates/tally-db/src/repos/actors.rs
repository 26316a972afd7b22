//! Actor identity lookups.
//!
//! Audit entries store a snapshot of the actor's email and role taken at
//! write time. These tables are the minimal identity records the snapshot
//! is read from; the exchange's account system writes them.

use tally_core::entities::ActorSnapshot;
use tally_core::enums::ActorType;

use crate::error::DatabaseError;
use crate::non_critical::best_effort;
use crate::service::AuditService;

/// Display identity for system-initiated entries.
pub const SYSTEM_DISPLAY: &str = "system";

impl AuditService {
    /// Insert or replace an admin identity record.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn register_admin(
        &self,
        id: &str,
        work_email: &str,
        role: &str,
    ) -> Result<(), DatabaseError> {
        self.db()
            .conn()
            .execute(
                "INSERT INTO admins (id, work_email, role) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET work_email = excluded.work_email, role = excluded.role",
                libsql::params![id, work_email, role],
            )
            .await?;
        Ok(())
    }

    /// Insert or replace a user identity record.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn register_user(
        &self,
        id: &str,
        email: &str,
        role: &str,
    ) -> Result<(), DatabaseError> {
        self.db()
            .conn()
            .execute(
                "INSERT INTO users (id, email, role) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET email = excluded.email, role = excluded.role",
                libsql::params![id, email, role],
            )
            .await?;
        Ok(())
    }

    /// Look up an admin's current work email and role.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_admin(&self, id: &str) -> Result<Option<ActorSnapshot>, DatabaseError> {
        self.find_identity("SELECT work_email, role FROM admins WHERE id = ?1", id)
            .await
    }

    /// Look up a user's current email and role.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_user(&self, id: &str) -> Result<Option<ActorSnapshot>, DatabaseError> {
        self.find_identity("SELECT email, role FROM users WHERE id = ?1", id)
            .await
    }

    /// Snapshot of an admin for a new audit entry.
    ///
    /// A missing record or a failed lookup yields the `"unknown"` snapshot;
    /// the write that needs it proceeds either way.
    pub async fn admin_snapshot(&self, id: &str) -> ActorSnapshot {
        self.snapshot_or_unknown(ActorType::Admin, id).await
    }

    /// Snapshot of a user for a new audit entry. Never fails.
    pub async fn user_snapshot(&self, id: &str) -> ActorSnapshot {
        self.snapshot_or_unknown(ActorType::User, id).await
    }

    /// Human-readable identity for dashboards: the actor's current email,
    /// `"system"` for system entries, `"unknown"` when the record is gone.
    pub async fn display_identity(&self, actor_type: ActorType, actor_id: Option<&str>) -> String {
        let Some(id) = actor_id else {
            return SYSTEM_DISPLAY.to_string();
        };
        match actor_type {
            ActorType::System => SYSTEM_DISPLAY.to_string(),
            ActorType::Admin | ActorType::User => {
                self.snapshot_or_unknown(actor_type, id).await.email
            }
        }
    }

    async fn snapshot_or_unknown(&self, actor_type: ActorType, id: &str) -> ActorSnapshot {
        let lookup = async {
            match actor_type {
                ActorType::Admin => self.find_admin(id).await,
                ActorType::User => self.find_user(id).await,
                ActorType::System => Ok(None),
            }
        };
        match best_effort("actor snapshot lookup", lookup).await.flatten() {
            Some(snapshot) => snapshot,
            None => {
                tracing::warn!(%actor_type, actor_id = id, "actor not found; using unknown snapshot");
                ActorSnapshot::unknown(actor_type)
            }
        }
    }

    async fn find_identity(
        &self,
        sql: &str,
        id: &str,
    ) -> Result<Option<ActorSnapshot>, DatabaseError> {
        let mut rows = self.db().conn().query(sql, [id]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(ActorSnapshot::new(
                row.get::<String>(0)?,
                row.get::<String>(1)?,
            ))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::helpers::test_service;
    use pretty_assertions::assert_eq;
    use tally_core::entities::ActorSnapshot;
    use tally_core::enums::ActorType;

    #[tokio::test]
    async fn register_and_find_admin() {
        let svc = test_service().await;
        svc.register_admin("adm-1", "ops@exchange.test", "SUPER_ADMIN")
            .await
            .unwrap();

        let found = svc.find_admin("adm-1").await.unwrap();
        assert_eq!(found, Some(ActorSnapshot::new("ops@exchange.test", "SUPER_ADMIN")));
        assert_eq!(svc.find_admin("adm-2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn register_is_an_upsert() {
        let svc = test_service().await;
        svc.register_user("usr-1", "old@mail.test", "USER").await.unwrap();
        svc.register_user("usr-1", "new@mail.test", "VIP").await.unwrap();

        let snapshot = svc.user_snapshot("usr-1").await;
        assert_eq!(snapshot, ActorSnapshot::new("new@mail.test", "VIP"));
    }

    #[tokio::test]
    async fn missing_actor_yields_unknown_snapshot() {
        let svc = test_service().await;
        let admin = svc.admin_snapshot("adm-ghost").await;
        assert_eq!(admin, ActorSnapshot::new("unknown", "ADMIN"));
        let user = svc.user_snapshot("usr-ghost").await;
        assert_eq!(user, ActorSnapshot::new("unknown", "USER"));
    }

    #[tokio::test]
    async fn failed_lookup_yields_unknown_snapshot() {
        let svc = test_service().await;
        svc.db().conn().execute("DROP TABLE admins", ()).await.unwrap();

        let admin = svc.admin_snapshot("adm-1").await;
        assert!(admin.is_unknown());
    }

    #[tokio::test]
    async fn display_identity_variants() {
        let svc = test_service().await;
        svc.register_admin("adm-1", "ops@exchange.test", "ADMIN")
            .await
            .unwrap();

        assert_eq!(
            svc.display_identity(ActorType::Admin, Some("adm-1")).await,
            "ops@exchange.test"
        );
        assert_eq!(
            svc.display_identity(ActorType::User, Some("usr-gone")).await,
            "unknown"
        );
        assert_eq!(svc.display_identity(ActorType::System, None).await, "system");
    }
}
