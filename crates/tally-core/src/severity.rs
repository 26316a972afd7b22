//! Severity classification for action tags.
//!
//! Three tiers, checked in order:
//! 1. exact membership in [`CRITICAL_ACTIONS`] is `CRITICAL`
//! 2. any of [`WARNING_KEYWORDS`] as a substring is `WARNING`
//! 3. everything else is `INFO`
//!
//! The substring tier lets new tags such as `ADMIN_TERMINATED` classify
//! themselves. Incidental matches (`REJECT_REASON_UPDATED` is `WARNING`) are
//! accepted behavior.

use crate::actions;
use crate::enums::Severity;

/// Actions that are always `CRITICAL`.
pub const CRITICAL_ACTIONS: &[&str] = &[
    actions::ADMIN_ROLE_CHANGED,
    actions::USER_ROLE_CHANGED,
    actions::ADMIN_CREATED,
    actions::ADMIN_DELETED,
    actions::ADMIN_SUSPENDED,
    actions::API_KEY_CREATED,
    actions::API_KEY_REVOKED,
    actions::API_KEY_ROTATED,
    actions::PAYOUT_APPROVED,
    actions::IMPERSONATION_STARTED,
    actions::MFA_DISABLED,
    actions::LIMITS_CHANGED,
    actions::TENANT_DELETED,
    actions::PII_BULK_EXPORT,
    actions::AML_REPORT_FILED,
];

/// Substrings that make an action at least `WARNING`.
pub const WARNING_KEYWORDS: &[&str] = &["DELETE", "SUSPEND", "REJECT", "TERMINATE"];

/// Classify an action tag. Total over all inputs; unknown tags are `INFO`.
#[must_use]
pub fn classify(action: &str) -> Severity {
    if CRITICAL_ACTIONS.contains(&action) {
        return Severity::Critical;
    }
    if WARNING_KEYWORDS.iter().any(|kw| action.contains(kw)) {
        return Severity::Warning;
    }
    Severity::Info
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("TENANT_DELETED", Severity::Critical)]
    #[case("ADMIN_SUSPENDED", Severity::Critical)]
    #[case("PAYOUT_APPROVED", Severity::Critical)]
    #[case("MFA_DISABLED", Severity::Critical)]
    #[case("USER_DELETED", Severity::Warning)]
    #[case("ADMIN_TERMINATED", Severity::Warning)]
    #[case("KYC_REJECTED", Severity::Warning)]
    #[case("ORDER_SUSPENDED", Severity::Warning)]
    #[case("REJECT_REASON_UPDATED", Severity::Warning)]
    #[case("ORDER_STATUS_CHANGED", Severity::Info)]
    #[case("KYC_SUBMITTED", Severity::Info)]
    #[case("", Severity::Info)]
    fn classifies(#[case] action: &str, #[case] expected: Severity) {
        assert_eq!(classify(action), expected);
    }

    #[test]
    fn critical_set_wins_over_keywords() {
        for action in CRITICAL_ACTIONS {
            assert_eq!(classify(action), Severity::Critical, "{action}");
        }
        // Contains DELETE but is decided by the exact set.
        assert!(actions::TENANT_DELETED.contains("DELETE"));
        assert_eq!(classify(actions::TENANT_DELETED), Severity::Critical);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(classify("tenant_deleted"), Severity::Info);
    }
}
