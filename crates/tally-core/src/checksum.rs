//! Freeze checksums for audit log entries.
//!
//! `checksum = sha256(canonical_json(fields) || salt)`, lowercase hex.
//!
//! The canonical JSON is an object with sorted keys built only from fields
//! fixed before the row is inserted. The database-generated `id` is never
//! part of it. Verification must use the stored `created_at`.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::enums::ActorType;
use crate::timestamp;

/// Well-known development salt. Any deployment that relies on it has
/// checksums anyone can forge.
pub const INSECURE_DEFAULT_SALT: &str = "tally-development-salt-do-not-use-in-production";

/// The identifying fields covered by the checksum.
#[derive(Debug, Clone, Copy)]
pub struct ChecksumFields<'a> {
    pub actor_type: ActorType,
    pub actor_id: Option<&'a str>,
    pub action: &'a str,
    pub entity_type: &'a str,
    pub entity_id: &'a str,
    pub created_at: &'a DateTime<Utc>,
}

impl ChecksumFields<'_> {
    /// Deterministic serialization: sorted keys, no whitespace.
    #[must_use]
    pub fn canonical_json(&self) -> String {
        let mut map: BTreeMap<&str, Value> = BTreeMap::new();
        map.insert("action", Value::from(self.action));
        map.insert("actorId", self.actor_id.map_or(Value::Null, Value::from));
        map.insert("actorType", Value::from(self.actor_type.as_str()));
        map.insert("createdAt", Value::from(timestamp::canonical(self.created_at)));
        map.insert("entityId", Value::from(self.entity_id));
        map.insert("entityType", Value::from(self.entity_type));
        // A map of strings and nulls always serializes.
        serde_json::to_string(&map).unwrap_or_default()
    }
}

/// Computes and verifies freeze checksums with a server-side salt.
#[derive(Clone)]
pub struct ChecksumGenerator {
    salt: String,
    insecure: bool,
}

impl ChecksumGenerator {
    /// Create a generator with an explicit salt.
    ///
    /// An empty salt falls back to [`INSECURE_DEFAULT_SALT`].
    #[must_use]
    pub fn new(salt: impl Into<String>) -> Self {
        let salt = salt.into();
        if salt.is_empty() {
            return Self::insecure_default();
        }
        Self {
            salt,
            insecure: false,
        }
    }

    /// Generator using the well-known development salt.
    #[must_use]
    pub fn insecure_default() -> Self {
        Self {
            salt: INSECURE_DEFAULT_SALT.to_string(),
            insecure: true,
        }
    }

    /// Whether this generator is running on the development salt.
    #[must_use]
    pub const fn is_insecure(&self) -> bool {
        self.insecure
    }

    /// Compute the checksum for `fields`. 64 lowercase hex characters.
    #[must_use]
    pub fn compute(&self, fields: &ChecksumFields<'_>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(fields.canonical_json().as_bytes());
        hasher.update(self.salt.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Recompute and compare against a stored checksum.
    #[must_use]
    pub fn verify(&self, fields: &ChecksumFields<'_>, stored: &str) -> bool {
        self.compute(fields) == stored
    }
}

impl fmt::Debug for ChecksumGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChecksumGenerator")
            .field("salt", &"[REDACTED]")
            .field("insecure", &self.insecure)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn fields(created_at: &DateTime<Utc>) -> ChecksumFields<'_> {
        ChecksumFields {
            actor_type: ActorType::Admin,
            actor_id: Some("adm-1"),
            action: "ORDER_STATUS_CHANGED",
            entity_type: "Order",
            entity_id: "ord-42",
            created_at,
        }
    }

    #[test]
    fn canonical_json_has_sorted_keys() {
        let created_at = ts();
        assert_eq!(
            fields(&created_at).canonical_json(),
            r#"{"action":"ORDER_STATUS_CHANGED","actorId":"adm-1","actorType":"ADMIN","createdAt":"2026-03-01T12:00:00.000000Z","entityId":"ord-42","entityType":"Order"}"#
        );
    }

    #[test]
    fn checksum_is_deterministic() {
        let generator = ChecksumGenerator::new("pepper");
        let created_at = ts();
        let first = generator.compute(&fields(&created_at));
        for _ in 0..10 {
            assert_eq!(generator.compute(&fields(&created_at)), first);
        }
    }

    #[test]
    fn checksum_is_lowercase_hex_sha256() {
        let created_at = ts();
        let sum = ChecksumGenerator::new("pepper").compute(&fields(&created_at));
        assert_eq!(sum.len(), 64);
        assert!(sum.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn checksum_changes_with_each_identifying_field() {
        let generator = ChecksumGenerator::new("pepper");
        let created_at = ts();
        let base = generator.compute(&fields(&created_at));

        let other_actor = ChecksumFields {
            actor_id: Some("adm-2"),
            ..fields(&created_at)
        };
        let other_action = ChecksumFields {
            action: "ORDER_CANCELLED",
            ..fields(&created_at)
        };
        let other_entity = ChecksumFields {
            entity_id: "ord-43",
            ..fields(&created_at)
        };
        let later = created_at + chrono::Duration::microseconds(1);
        let other_time = fields(&later);
        let no_actor = ChecksumFields {
            actor_type: ActorType::System,
            actor_id: None,
            ..fields(&created_at)
        };

        for variant in [other_actor, other_action, other_entity, other_time, no_actor] {
            assert_ne!(generator.compute(&variant), base);
        }
    }

    #[test]
    fn checksum_depends_on_salt() {
        let created_at = ts();
        let a = ChecksumGenerator::new("salt-a").compute(&fields(&created_at));
        let b = ChecksumGenerator::new("salt-b").compute(&fields(&created_at));
        assert_ne!(a, b);
    }

    #[test]
    fn empty_salt_falls_back_to_insecure_default() {
        let generator = ChecksumGenerator::new("");
        assert!(generator.is_insecure());
        let created_at = ts();
        assert_eq!(
            generator.compute(&fields(&created_at)),
            ChecksumGenerator::insecure_default().compute(&fields(&created_at))
        );
        assert!(!ChecksumGenerator::new("pepper").is_insecure());
    }

    #[test]
    fn verify_detects_mismatch() {
        let generator = ChecksumGenerator::new("pepper");
        let created_at = ts();
        let stored = generator.compute(&fields(&created_at));
        assert!(generator.verify(&fields(&created_at), &stored));

        let tampered = ChecksumFields {
            entity_id: "ord-99",
            ..fields(&created_at)
        };
        assert!(!generator.verify(&tampered, &stored));
    }

    #[test]
    fn debug_does_not_leak_salt() {
        let rendered = format!("{:?}", ChecksumGenerator::new("pepper"));
        assert!(!rendered.contains("pepper"));
    }
}
