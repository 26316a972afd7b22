//! Repository modules for the audit trail.
//!
//! Each module adds methods to `AuditService` via `impl AuditService` blocks.

pub mod actors;
pub mod integrity;
pub mod query;
pub mod writer;
