//! Actor types, log streams, and severity levels for Tally.
//!
//! All enums use `SCREAMING_SNAKE_CASE` serialization, matching the values
//! stored in the audit table and exposed to compliance dashboards.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// ActorType
// ---------------------------------------------------------------------------

/// Who performed an audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorType {
    Admin,
    User,
    System,
}

impl ActorType {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
            Self::System => "SYSTEM",
        }
    }

    /// Role recorded in the actor snapshot when the actor record cannot be found.
    #[must_use]
    pub const fn default_role(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ActorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActorType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            "SYSTEM" => Ok(Self::System),
            _ => Err(CoreError::UnknownVariant {
                kind: "actor type",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// AuditStream
// ---------------------------------------------------------------------------

/// Logical log stream an entry was written to.
///
/// ```text
/// UNIFIED  generic and system writes (log_action, log_system_action, log)
/// ADMIN    admin mutations, always with a before/after diff
/// USER     end-user actions, never with a diff
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditStream {
    Unified,
    Admin,
    User,
}

impl AuditStream {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unified => "UNIFIED",
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }

    /// Whether entries in this stream must carry both diff sides.
    #[must_use]
    pub const fn requires_diff(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether entries in this stream must not carry a diff.
    #[must_use]
    pub const fn forbids_diff(self) -> bool {
        matches!(self, Self::User)
    }
}

impl fmt::Display for AuditStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditStream {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UNIFIED" => Ok(Self::Unified),
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            _ => Err(CoreError::UnknownVariant {
                kind: "audit stream",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Severity of an audited action. See [`crate::severity::classify`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INFO" => Ok(Self::Info),
            "WARNING" => Ok(Self::Warning),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(CoreError::UnknownVariant {
                kind: "severity",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(actor_admin, ActorType, ActorType::Admin, "ADMIN");
    test_serde_roundtrip!(actor_system, ActorType, ActorType::System, "SYSTEM");
    test_serde_roundtrip!(stream_unified, AuditStream, AuditStream::Unified, "UNIFIED");
    test_serde_roundtrip!(stream_user, AuditStream, AuditStream::User, "USER");
    test_serde_roundtrip!(severity_warning, Severity, Severity::Warning, "WARNING");
    test_serde_roundtrip!(severity_critical, Severity, Severity::Critical, "CRITICAL");

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", ActorType::User), "USER");
        assert_eq!(format!("{}", AuditStream::Admin), "ADMIN");
        assert_eq!(format!("{}", Severity::Info), "INFO");
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("admin".parse::<ActorType>().unwrap(), ActorType::Admin);
        assert_eq!("Unified".parse::<AuditStream>().unwrap(), AuditStream::Unified);
        assert_eq!("critical".parse::<Severity>().unwrap(), Severity::Critical);
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = "ROOT".parse::<ActorType>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownVariant { kind: "actor type", .. }));
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
    }

    #[test]
    fn only_admin_stream_requires_diff() {
        assert!(AuditStream::Admin.requires_diff());
        assert!(!AuditStream::User.requires_diff());
        assert!(!AuditStream::Unified.requires_diff());
    }

    #[test]
    fn only_user_stream_forbids_diff() {
        assert!(AuditStream::User.forbids_diff());
        assert!(!AuditStream::Admin.forbids_diff());
        assert!(!AuditStream::Unified.forbids_diff());
    }
}
