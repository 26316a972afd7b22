//! Audit log writer.
//!
//! Every entry point funnels into [`AuditService::log`], which runs one
//! pipeline: request context, severity, frozen timestamp, checksum, id,
//! INSERT. Exactly one row per call; persistence errors propagate.

use serde_json::{Map, Value};
use tally_core::checksum::ChecksumFields;
use tally_core::entities::{ActorSnapshot, AuditDiff, AuditLogEntry};
use tally_core::enums::{ActorType, AuditStream};
use tally_core::ids::PREFIX_AUDIT_LOG;
use tally_core::{severity, timestamp};

use crate::context::resolve_context;
use crate::error::DatabaseError;
use crate::helpers::{json_param, opt_text_param};
use crate::params::{LogParams, LogParamsBuilder};
use crate::service::AuditService;

impl AuditService {
    /// Generic write path on the unified stream.
    ///
    /// The actor is an admin when `actor_id` is present, otherwise the system.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn log_action(
        &self,
        action: &str,
        entity_type: &str,
        entity_id: &str,
        diff: Option<AuditDiff>,
        actor_id: Option<&str>,
        metadata: Option<Value>,
    ) -> Result<AuditLogEntry, DatabaseError> {
        let mut builder = LogParamsBuilder::new(action, entity_type, entity_id);
        if let Some(id) = actor_id {
            builder = builder.admin(id);
        }
        if let Some(diff) = diff {
            builder = builder.diff(diff.before, diff.after);
        }
        if let Some(metadata) = metadata {
            builder = builder.context(metadata);
        }
        self.log(builder.build()).await
    }

    /// Record an action taken by an end user. User entries never carry a diff.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn log_user_action(
        &self,
        user_id: &str,
        action: &str,
        entity_type: &str,
        entity_id: &str,
        metadata: Option<Value>,
    ) -> Result<AuditLogEntry, DatabaseError> {
        let mut builder = LogParamsBuilder::new(action, entity_type, entity_id)
            .user(user_id)
            .stream(AuditStream::User);
        if let Some(metadata) = metadata {
            builder = builder.context(metadata);
        }
        self.log(builder.build()).await
    }

    /// Record an admin mutation. Both sides of the diff are required; empty
    /// objects are valid.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    #[allow(clippy::too_many_arguments)]
    pub async fn log_admin_action(
        &self,
        admin_id: &str,
        action: &str,
        entity_type: &str,
        entity_id: &str,
        old_value: Value,
        new_value: Value,
        metadata: Option<Value>,
    ) -> Result<AuditLogEntry, DatabaseError> {
        let mut builder = LogParamsBuilder::new(action, entity_type, entity_id)
            .admin(admin_id)
            .stream(AuditStream::Admin)
            .diff(old_value, new_value);
        if let Some(metadata) = metadata {
            builder = builder.context(metadata);
        }
        self.log(builder.build()).await
    }

    /// Record an action with no human actor. `"system": true` is merged into
    /// the metadata.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn log_system_action(
        &self,
        action: &str,
        entity_type: &str,
        entity_id: &str,
        metadata: Option<Value>,
    ) -> Result<AuditLogEntry, DatabaseError> {
        let params = LogParamsBuilder::new(action, entity_type, entity_id)
            .context(mark_system(metadata))
            .build();
        self.log(params).await
    }

    /// Write one audit entry with the full field set.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if the parameters break a stream
    /// invariant, or `DatabaseError` if the INSERT fails.
    pub async fn log(&self, params: LogParams) -> Result<AuditLogEntry, DatabaseError> {
        validate(&params)?;

        let request = params.request.unwrap_or_else(resolve_context);
        let severity = params
            .severity
            .unwrap_or_else(|| severity::classify(&params.action));
        let snapshot = match (params.actor, params.actor_id.as_deref()) {
            (Some(snapshot), _) => Some(snapshot),
            (None, Some(id)) => Some(self.snapshot_for(params.actor_type, id).await),
            (None, None) => None,
        };

        let created_at = timestamp::now();
        let freeze_checksum = self.checksum().compute(&ChecksumFields {
            actor_type: params.actor_type,
            actor_id: params.actor_id.as_deref(),
            action: &params.action,
            entity_type: &params.entity_type,
            entity_id: &params.entity_id,
            created_at: &created_at,
        });
        let id = self.db().generate_id(PREFIX_AUDIT_LOG).await?;

        let (diff_before, diff_after) = params
            .diff
            .map_or((None, None), |d| (Some(d.before), Some(d.after)));
        let (actor_email, actor_role) =
            snapshot.map_or((None, None), |s| (Some(s.email), Some(s.role)));

        let entry = AuditLogEntry {
            id,
            stream: params.stream,
            actor_type: params.actor_type,
            actor_id: params.actor_id,
            actor_email,
            actor_role,
            entity_type: params.entity_type,
            entity_id: params.entity_id,
            action: params.action,
            diff_before,
            diff_after,
            reason: params.reason,
            context: params.context,
            ip_address: request.ip_address,
            user_agent: request.user_agent,
            severity,
            is_reviewable: params.is_reviewable,
            mfa: params.mfa,
            freeze_checksum,
            created_at,
        };

        self.insert_entry(&entry).await?;
        tracing::debug!(
            id = %entry.id,
            action = %entry.action,
            stream = %entry.stream,
            severity = %entry.severity,
            "audit entry written"
        );
        Ok(entry)
    }

    async fn snapshot_for(&self, actor_type: ActorType, id: &str) -> ActorSnapshot {
        match actor_type {
            ActorType::User => self.user_snapshot(id).await,
            ActorType::Admin | ActorType::System => self.admin_snapshot(id).await,
        }
    }

    async fn insert_entry(&self, entry: &AuditLogEntry) -> Result<(), DatabaseError> {
        let params: Vec<libsql::Value> = vec![
            text(&entry.id),
            text(entry.stream.as_str()),
            text(entry.actor_type.as_str()),
            opt_text_param(entry.actor_id.as_deref()),
            opt_text_param(entry.actor_email.as_deref()),
            opt_text_param(entry.actor_role.as_deref()),
            text(&entry.entity_type),
            text(&entry.entity_id),
            text(&entry.action),
            json_param(entry.diff_before.as_ref()),
            json_param(entry.diff_after.as_ref()),
            opt_text_param(entry.reason.as_deref()),
            json_param(entry.context.as_ref()),
            text(&entry.ip_address),
            opt_text_param(entry.user_agent.as_deref()),
            text(entry.severity.as_str()),
            libsql::Value::Integer(i64::from(entry.is_reviewable)),
            libsql::Value::Integer(i64::from(entry.mfa.required)),
            opt_text_param(entry.mfa.method.as_deref()),
            opt_text_param(
                entry
                    .mfa
                    .verified_at
                    .as_ref()
                    .map(timestamp::canonical)
                    .as_deref(),
            ),
            opt_text_param(entry.mfa.event_id.as_deref()),
            text(&entry.freeze_checksum),
            libsql::Value::Text(timestamp::canonical(&entry.created_at)),
        ];

        self.db()
            .conn()
            .execute(
                "INSERT INTO audit_logs (id, stream, actor_type, actor_id, actor_email, actor_role,
                    entity_type, entity_id, action, diff_before, diff_after, reason, context,
                    ip_address, user_agent, severity, is_reviewable, mfa_required, mfa_method,
                    mfa_verified_at, mfa_event_id, freeze_checksum, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                    ?17, ?18, ?19, ?20, ?21, ?22, ?23)",
                libsql::params_from_iter(params),
            )
            .await?;
        Ok(())
    }
}

fn validate(params: &LogParams) -> Result<(), DatabaseError> {
    match (params.actor_type, params.actor_id.is_some()) {
        (ActorType::System, true) => {
            return Err(DatabaseError::InvalidState(
                "system entries cannot carry an actor id".into(),
            ));
        }
        (ActorType::Admin | ActorType::User, false) => {
            return Err(DatabaseError::InvalidState(format!(
                "{} entries require an actor id",
                params.actor_type
            )));
        }
        _ => {}
    }

    let expected_actor = match params.stream {
        AuditStream::Admin => Some(ActorType::Admin),
        AuditStream::User => Some(ActorType::User),
        AuditStream::Unified => None,
    };
    if expected_actor.is_some_and(|expected| expected != params.actor_type) {
        return Err(DatabaseError::InvalidState(format!(
            "{} stream does not accept {} actors",
            params.stream, params.actor_type
        )));
    }

    if params.stream.requires_diff() && params.diff.is_none() {
        return Err(DatabaseError::InvalidState(format!(
            "{} stream entries require a before/after diff",
            params.stream
        )));
    }
    if params.stream.forbids_diff() && params.diff.is_some() {
        return Err(DatabaseError::InvalidState(format!(
            "{} stream entries cannot carry a diff",
            params.stream
        )));
    }
    Ok(())
}

fn text(s: &str) -> libsql::Value {
    libsql::Value::Text(s.to_string())
}

fn mark_system(metadata: Option<Value>) -> Value {
    let mut map = match metadata {
        Some(Value::Object(map)) => map,
        Some(other) => {
            let mut map = Map::new();
            map.insert("metadata".into(), other);
            map
        }
        None => Map::new(),
    };
    map.insert("system".into(), Value::Bool(true));
    Value::Object(map)
}
