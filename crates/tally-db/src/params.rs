//! Parameters for the general audit write path.
//!
//! [`LogParams`] carries the full field set accepted by
//! [`AuditService::log`](crate::service::AuditService::log). Call sites build
//! it with [`LogParamsBuilder`]; only the fields they set differ from the
//! defaults (SYSTEM actor, UNIFIED stream, classifier severity).

use serde_json::Value;
use tally_core::entities::{ActorSnapshot, AuditDiff, MfaMetadata};
use tally_core::enums::{ActorType, AuditStream, Severity};

use crate::context::RequestContext;

#[derive(Debug, Clone, PartialEq)]
pub struct LogParams {
    pub stream: AuditStream,
    pub actor_type: ActorType,
    pub actor_id: Option<String>,
    /// Explicit actor snapshot. When `None`, it is looked up by `actor_id`.
    pub actor: Option<ActorSnapshot>,
    pub entity_type: String,
    pub entity_id: String,
    pub action: String,
    pub diff: Option<AuditDiff>,
    pub reason: Option<String>,
    pub context: Option<Value>,
    /// Overrides the severity classifier.
    pub severity: Option<Severity>,
    pub is_reviewable: bool,
    pub mfa: MfaMetadata,
    /// Overrides the task-local request context.
    pub request: Option<RequestContext>,
}

pub struct LogParamsBuilder(LogParams);

impl LogParamsBuilder {
    pub fn new(
        action: impl Into<String>,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        Self(LogParams {
            stream: AuditStream::Unified,
            actor_type: ActorType::System,
            actor_id: None,
            actor: None,
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            action: action.into(),
            diff: None,
            reason: None,
            context: None,
            severity: None,
            is_reviewable: false,
            mfa: MfaMetadata::default(),
            request: None,
        })
    }

    /// Attribute the entry to an admin.
    pub fn admin(mut self, admin_id: impl Into<String>) -> Self {
        self.0.actor_type = ActorType::Admin;
        self.0.actor_id = Some(admin_id.into());
        self
    }

    /// Attribute the entry to a user.
    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.0.actor_type = ActorType::User;
        self.0.actor_id = Some(user_id.into());
        self
    }

    pub fn stream(mut self, val: AuditStream) -> Self {
        self.0.stream = val;
        self
    }

    pub fn snapshot(mut self, val: ActorSnapshot) -> Self {
        self.0.actor = Some(val);
        self
    }

    pub fn diff(mut self, before: Value, after: Value) -> Self {
        self.0.diff = Some(AuditDiff::new(before, after));
        self
    }

    pub fn reason(mut self, val: impl Into<String>) -> Self {
        self.0.reason = Some(val.into());
        self
    }

    pub fn context(mut self, val: Value) -> Self {
        self.0.context = Some(val);
        self
    }

    pub fn severity(mut self, val: Severity) -> Self {
        self.0.severity = Some(val);
        self
    }

    pub fn reviewable(mut self, val: bool) -> Self {
        self.0.is_reviewable = val;
        self
    }

    pub fn mfa(mut self, val: MfaMetadata) -> Self {
        self.0.mfa = val;
        self
    }

    pub fn request_context(mut self, val: RequestContext) -> Self {
        self.0.request = Some(val);
        self
    }

    pub fn build(self) -> LogParams {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_to_system_unified() {
        let params = LogParamsBuilder::new("ORDER_EXPIRED", "Order", "ord-1").build();
        assert_eq!(params.actor_type, ActorType::System);
        assert_eq!(params.stream, AuditStream::Unified);
        assert_eq!(params.actor_id, None);
        assert_eq!(params.severity, None);
        assert!(!params.is_reviewable);
    }

    #[test]
    fn admin_sets_actor_type_and_id() {
        let params = LogParamsBuilder::new("LIMITS_CHANGED", "Tenant", "tnt-1")
            .admin("adm-1")
            .stream(AuditStream::Admin)
            .diff(json!({"daily": 10}), json!({"daily": 20}))
            .reason("quarterly review")
            .reviewable(true)
            .build();
        assert_eq!(params.actor_type, ActorType::Admin);
        assert_eq!(params.actor_id.as_deref(), Some("adm-1"));
        assert_eq!(params.diff.unwrap().after, json!({"daily": 20}));
        assert_eq!(params.reason.as_deref(), Some("quarterly review"));
        assert!(params.is_reviewable);
    }
}
