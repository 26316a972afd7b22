use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ActorType;

/// Email and role of an actor, copied into each entry at write time so
/// later renames or role changes do not rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ActorSnapshot {
    pub email: String,
    pub role: String,
}

impl ActorSnapshot {
    /// Placeholder identity used when the actor record cannot be resolved.
    pub const UNKNOWN_EMAIL: &'static str = "unknown";

    #[must_use]
    pub fn new(email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            role: role.into(),
        }
    }

    /// Snapshot for an actor that no longer exists (or never did).
    #[must_use]
    pub fn unknown(actor_type: ActorType) -> Self {
        Self::new(Self::UNKNOWN_EMAIL, actor_type.default_role())
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.email == Self::UNKNOWN_EMAIL
    }
}
