use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::checksum::ChecksumFields;
use crate::enums::{ActorType, AuditStream, Severity};

/// One immutable audit trail entry.
///
/// Written once, never updated. `freeze_checksum` covers the identifying
/// fields returned by [`AuditLogEntry::checksum_fields`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: String,
    pub stream: AuditStream,
    pub actor_type: ActorType,
    pub actor_id: Option<String>,
    pub actor_email: Option<String>,
    pub actor_role: Option<String>,
    pub entity_type: String,
    pub entity_id: String,
    pub action: String,
    pub diff_before: Option<serde_json::Value>,
    pub diff_after: Option<serde_json::Value>,
    pub reason: Option<String>,
    pub context: Option<serde_json::Value>,
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub severity: Severity,
    pub is_reviewable: bool,
    #[serde(default)]
    pub mfa: MfaMetadata,
    pub freeze_checksum: String,
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    /// The fields the freeze checksum is computed over.
    #[must_use]
    pub fn checksum_fields(&self) -> ChecksumFields<'_> {
        ChecksumFields {
            actor_type: self.actor_type,
            actor_id: self.actor_id.as_deref(),
            action: &self.action,
            entity_type: &self.entity_type,
            entity_id: &self.entity_id,
            created_at: &self.created_at,
        }
    }

    /// Whether both sides of the before/after diff are present.
    #[must_use]
    pub const fn has_diff(&self) -> bool {
        self.diff_before.is_some() && self.diff_after.is_some()
    }
}

/// Step-up authentication metadata for actions that required re-auth.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MfaMetadata {
    pub required: bool,
    pub method: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub event_id: Option<String>,
}

/// Before/after snapshots of the fields a mutation touched.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AuditDiff {
    pub before: serde_json::Value,
    pub after: serde_json::Value,
}

impl AuditDiff {
    #[must_use]
    pub const fn new(before: serde_json::Value, after: serde_json::Value) -> Self {
        Self { before, after }
    }
}
