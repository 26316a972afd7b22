//! Response types returned by the audit query service and the `tally` CLI.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::AuditLogEntry;
use crate::enums::ActorType;

/// One page of filtered audit entries.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditPage {
    pub entries: Vec<AuditLogEntry>,
    /// Matches for the filter, ignoring offset and limit.
    pub total_count: u64,
}

/// Number of entries sharing a grouping key (action tag or entity type).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GroupCount {
    pub key: String,
    pub count: u64,
}

/// An actor ranked by number of logged actions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TopActor {
    pub actor_id: String,
    pub actor_type: ActorType,
    /// Current email of the actor, or `"unknown"` if the record is gone.
    pub display: String,
    pub count: u64,
}

/// Aggregate view over a time window.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditStatistics {
    pub total_actions: u64,
    pub actions_by_type: Vec<GroupCount>,
    pub actions_by_entity: Vec<GroupCount>,
    pub top_actors: Vec<TopActor>,
}

/// Result of re-checking one entry's freeze checksum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IntegrityStatus {
    Intact,
    Tampered,
}

/// Result of re-checking every entry in the log.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IntegrityReport {
    pub checked: u64,
    pub tampered: Vec<String>,
}

impl IntegrityReport {
    #[must_use]
    pub fn is_intact(&self) -> bool {
        self.tampered.is_empty()
    }
}
