//! Audit query repository.
//!
//! Read-only access to the audit log. Every method reads live from the
//! store; results are newest first (`created_at DESC, rowid DESC`).

use chrono::{DateTime, Utc};
use tally_core::entities::{AuditLogEntry, MfaMetadata};
use tally_core::enums::{ActorType, AuditStream, Severity};
use tally_core::responses::{AuditPage, AuditStatistics, GroupCount, TopActor};
use tally_core::timestamp;

use crate::error::DatabaseError;
use crate::helpers::{
    escape_like, get_bool, get_count, get_opt_string, parse_datetime, parse_enum,
    parse_optional_datetime, parse_optional_json,
};
use crate::service::AuditService;

/// Page size used when a filter does not set one.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Number of actors reported by [`AuditService::get_audit_statistics`].
pub const TOP_ACTORS: u32 = 10;

pub(crate) const ENTRY_COLUMNS: &str = "id, stream, actor_type, actor_id, actor_email, actor_role, \
     entity_type, entity_id, action, diff_before, diff_after, reason, context, ip_address, \
     user_agent, severity, is_reviewable, mfa_required, mfa_method, mfa_verified_at, \
     mfa_event_id, freeze_checksum, created_at";

const ORDER_NEWEST_FIRST: &str = "ORDER BY created_at DESC, rowid DESC";

/// Filter criteria for audit queries. `from` and `to` are inclusive.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub actor_id: Option<String>,
    pub actor_type: Option<ActorType>,
    pub stream: Option<AuditStream>,
    pub action: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub severity: Option<Severity>,
    pub reviewable: Option<bool>,
    /// Substring match on the client IP.
    pub ip_contains: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl AuditFilter {
    /// Build the WHERE clause and its positional parameters.
    fn where_clause(&self) -> (String, Vec<libsql::Value>) {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        let mut eq = |column: &str, value: String| {
            params.push(libsql::Value::Text(value));
            conditions.push(format!("{column} = ?{}", params.len()));
        };

        if let Some(ref v) = self.actor_id {
            eq("actor_id", v.clone());
        }
        if let Some(v) = self.actor_type {
            eq("actor_type", v.as_str().to_string());
        }
        if let Some(v) = self.stream {
            eq("stream", v.as_str().to_string());
        }
        if let Some(ref v) = self.action {
            eq("action", v.clone());
        }
        if let Some(ref v) = self.entity_type {
            eq("entity_type", v.clone());
        }
        if let Some(ref v) = self.entity_id {
            eq("entity_id", v.clone());
        }
        if let Some(v) = self.severity {
            eq("severity", v.as_str().to_string());
        }
        if let Some(v) = self.reviewable {
            params.push(libsql::Value::Integer(i64::from(v)));
            conditions.push(format!("is_reviewable = ?{}", params.len()));
        }
        if let Some(ref v) = self.ip_contains {
            params.push(libsql::Value::Text(format!("%{}%", escape_like(v))));
            conditions.push(format!("ip_address LIKE ?{} ESCAPE '\\'", params.len()));
        }
        if let Some(ref v) = self.from {
            params.push(libsql::Value::Text(timestamp::canonical(v)));
            conditions.push(format!("created_at >= ?{}", params.len()));
        }
        if let Some(ref v) = self.to {
            params.push(libsql::Value::Text(timestamp::canonical(v)));
            conditions.push(format!("created_at <= ?{}", params.len()));
        }

        let clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        (clause, params)
    }
}

/// Map a row selected with `ENTRY_COLUMNS` to an entry.
fn row_to_entry(row: &libsql::Row) -> Result<AuditLogEntry, DatabaseError> {
    Ok(AuditLogEntry {
        id: row.get::<String>(0)?,
        stream: parse_enum(&row.get::<String>(1)?)?,
        actor_type: parse_enum(&row.get::<String>(2)?)?,
        actor_id: get_opt_string(row, 3)?,
        actor_email: get_opt_string(row, 4)?,
        actor_role: get_opt_string(row, 5)?,
        entity_type: row.get::<String>(6)?,
        entity_id: row.get::<String>(7)?,
        action: row.get::<String>(8)?,
        diff_before: parse_optional_json(get_opt_string(row, 9)?.as_deref())?,
        diff_after: parse_optional_json(get_opt_string(row, 10)?.as_deref())?,
        reason: get_opt_string(row, 11)?,
        context: parse_optional_json(get_opt_string(row, 12)?.as_deref())?,
        ip_address: row.get::<String>(13)?,
        user_agent: get_opt_string(row, 14)?,
        severity: parse_enum(&row.get::<String>(15)?)?,
        is_reviewable: get_bool(row, 16)?,
        mfa: MfaMetadata {
            required: get_bool(row, 17)?,
            method: get_opt_string(row, 18)?,
            verified_at: parse_optional_datetime(get_opt_string(row, 19)?.as_deref())?,
            event_id: get_opt_string(row, 20)?,
        },
        freeze_checksum: row.get::<String>(21)?,
        created_at: parse_datetime(&row.get::<String>(22)?)?,
    })
}

impl AuditService {
    /// Get a single entry by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_audit_entry(&self, id: &str) -> Result<Option<AuditLogEntry>, DatabaseError> {
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM audit_logs WHERE id = ?1");
        let mut rows = self.db().conn().query(&sql, [id]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_entry(&row)?)),
            None => Ok(None),
        }
    }

    /// Filtered, paginated entries plus the total number of matches.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if either query fails.
    pub async fn get_audit_logs(&self, filter: &AuditFilter) -> Result<AuditPage, DatabaseError> {
        let (where_clause, params) = filter.where_clause();

        let count_sql = format!("SELECT COUNT(*) FROM audit_logs {where_clause}");
        let mut rows = self
            .db()
            .conn()
            .query(&count_sql, libsql::params_from_iter(params.clone()))
            .await?;
        let total_count = match rows.next().await? {
            Some(row) => get_count(&row, 0)?,
            None => 0,
        };

        let limit = filter.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        let offset = filter.offset.unwrap_or(0);
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM audit_logs {where_clause}
             {ORDER_NEWEST_FIRST} LIMIT {limit} OFFSET {offset}"
        );
        let entries = self.query_entries(&sql, params).await?;

        Ok(AuditPage {
            entries,
            total_count,
        })
    }

    /// Full history of one entity, unpaginated.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_entity_audit_trail(
        &self,
        entity_type: &str,
        entity_id: &str,
    ) -> Result<Vec<AuditLogEntry>, DatabaseError> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM audit_logs
             WHERE entity_type = ?1 AND entity_id = ?2 {ORDER_NEWEST_FIRST}"
        );
        self.query_entries(
            &sql,
            vec![
                libsql::Value::Text(entity_type.to_string()),
                libsql::Value::Text(entity_id.to_string()),
            ],
        )
        .await
    }

    /// Most recent entries recorded for one actor.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_user_activity(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<AuditLogEntry>, DatabaseError> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM audit_logs
             WHERE actor_id = ?1 {ORDER_NEWEST_FIRST} LIMIT {limit}"
        );
        self.query_entries(&sql, vec![libsql::Value::Text(user_id.to_string())])
            .await
    }

    /// Most recent entries performed by admins, on any stream.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_recent_admin_actions(
        &self,
        limit: u32,
    ) -> Result<Vec<AuditLogEntry>, DatabaseError> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM audit_logs
             WHERE actor_type = 'ADMIN' {ORDER_NEWEST_FIRST} LIMIT {limit}"
        );
        self.query_entries(&sql, Vec::new()).await
    }

    /// Most recent entries flagged for compliance review.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_reviewable_entries(
        &self,
        limit: u32,
    ) -> Result<Vec<AuditLogEntry>, DatabaseError> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM audit_logs
             WHERE is_reviewable = 1 {ORDER_NEWEST_FIRST} LIMIT {limit}"
        );
        self.query_entries(&sql, Vec::new()).await
    }

    /// Counts by action and entity type plus the ten most active actors in
    /// the window. Both bounds are optional and inclusive.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any query fails.
    pub async fn get_audit_statistics(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<AuditStatistics, DatabaseError> {
        let filter = AuditFilter {
            from,
            to,
            ..AuditFilter::default()
        };
        let (where_clause, params) = filter.where_clause();

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT COUNT(*) FROM audit_logs {where_clause}"),
                libsql::params_from_iter(params.clone()),
            )
            .await?;
        let total_actions = match rows.next().await? {
            Some(row) => get_count(&row, 0)?,
            None => 0,
        };

        let actions_by_type = self
            .group_counts("action", &where_clause, params.clone())
            .await?;
        let actions_by_entity = self
            .group_counts("entity_type", &where_clause, params.clone())
            .await?;

        let actor_condition = if where_clause.is_empty() {
            "WHERE actor_id IS NOT NULL".to_string()
        } else {
            format!("{where_clause} AND actor_id IS NOT NULL")
        };
        let sql = format!(
            "SELECT actor_id, actor_type, COUNT(*) AS n FROM audit_logs {actor_condition}
             GROUP BY actor_id, actor_type ORDER BY n DESC, actor_id ASC LIMIT {TOP_ACTORS}"
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut ranked = Vec::new();
        while let Some(row) = rows.next().await? {
            let actor_id = row.get::<String>(0)?;
            let actor_type: ActorType = parse_enum(&row.get::<String>(1)?)?;
            ranked.push((actor_id, actor_type, get_count(&row, 2)?));
        }

        let mut top_actors = Vec::with_capacity(ranked.len());
        for (actor_id, actor_type, count) in ranked {
            let display = self.display_identity(actor_type, Some(&actor_id)).await;
            top_actors.push(TopActor {
                actor_id,
                actor_type,
                display,
                count,
            });
        }

        Ok(AuditStatistics {
            total_actions,
            actions_by_type,
            actions_by_entity,
            top_actors,
        })
    }

    async fn group_counts(
        &self,
        column: &str,
        where_clause: &str,
        params: Vec<libsql::Value>,
    ) -> Result<Vec<GroupCount>, DatabaseError> {
        let sql = format!(
            "SELECT {column}, COUNT(*) AS n FROM audit_logs {where_clause}
             GROUP BY {column} ORDER BY n DESC, {column} ASC"
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut groups = Vec::new();
        while let Some(row) = rows.next().await? {
            groups.push(GroupCount {
                key: row.get::<String>(0)?,
                count: get_count(&row, 1)?,
            });
        }
        Ok(groups)
    }

    pub(crate) async fn query_entries(
        &self,
        sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<Vec<AuditLogEntry>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_entry(&row)?);
        }
        Ok(entries)
    }
}
