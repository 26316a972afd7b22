//! ID prefix constants.
//!
//! IDs are generated by the database layer as `{prefix}-{16 hex chars}`.

/// Audit log entry.
pub const PREFIX_AUDIT_LOG: &str = "alg";

/// Every prefix the database layer is expected to mint.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_AUDIT_LOG];

/// Check whether `id` has the shape `{prefix}-{hex}`.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
