//! Entity structs for the audit domain.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema export (`tally schema`).

mod actor;
mod audit_log;

pub use actor::ActorSnapshot;
pub use audit_log::{AuditDiff, AuditLogEntry, MfaMetadata};
