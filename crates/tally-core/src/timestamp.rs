//! Audit timestamps.
//!
//! `created_at` is part of the checksummed material, so the value written,
//! the value hashed, and the value read back must be identical. Timestamps
//! are truncated to microseconds and always rendered the same way.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Current time truncated to the precision stored in the audit table.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Canonical text form: RFC 3339, microseconds, `Z` suffix.
///
/// Fixed-width, so lexicographic order equals chronological order in SQL.
#[must_use]
pub fn canonical(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
