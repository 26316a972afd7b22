//! Action tags and entity type names used by the exchange's audit callers.
//!
//! The action vocabulary is open: any string is a valid action and new tags
//! need no migration. The constants here are the tags the exchange emits
//! today, kept in one place so call sites and the severity classifier agree.

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

pub const ORDER_CREATED: &str = "ORDER_CREATED";
pub const ORDER_STATUS_CHANGED: &str = "ORDER_STATUS_CHANGED";
pub const ORDER_CANCELLED: &str = "ORDER_CANCELLED";
pub const ORDER_DELETED: &str = "ORDER_DELETED";

// ---------------------------------------------------------------------------
// KYC
// ---------------------------------------------------------------------------

pub const KYC_SUBMITTED: &str = "KYC_SUBMITTED";
pub const KYC_APPROVED: &str = "KYC_APPROVED";
pub const KYC_REJECTED: &str = "KYC_REJECTED";
pub const KYC_API_REQUEST: &str = "KYC_API_REQUEST";
pub const KYC_API_ERROR: &str = "KYC_API_ERROR";

// ---------------------------------------------------------------------------
// Users and admins
// ---------------------------------------------------------------------------

pub const USER_LOGIN: &str = "USER_LOGIN";
pub const USER_SUSPENDED: &str = "USER_SUSPENDED";
pub const USER_DELETED: &str = "USER_DELETED";
pub const USER_ROLE_CHANGED: &str = "USER_ROLE_CHANGED";
pub const ADMIN_CREATED: &str = "ADMIN_CREATED";
pub const ADMIN_DELETED: &str = "ADMIN_DELETED";
pub const ADMIN_SUSPENDED: &str = "ADMIN_SUSPENDED";
pub const ADMIN_ROLE_CHANGED: &str = "ADMIN_ROLE_CHANGED";
pub const IMPERSONATION_STARTED: &str = "IMPERSONATION_STARTED";
pub const MFA_DISABLED: &str = "MFA_DISABLED";

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

pub const API_KEY_CREATED: &str = "API_KEY_CREATED";
pub const API_KEY_REVOKED: &str = "API_KEY_REVOKED";
pub const API_KEY_ROTATED: &str = "API_KEY_ROTATED";
pub const PAYOUT_APPROVED: &str = "PAYOUT_APPROVED";
pub const LIMITS_CHANGED: &str = "LIMITS_CHANGED";
pub const TENANT_DELETED: &str = "TENANT_DELETED";
pub const PII_BULK_EXPORT: &str = "PII_BULK_EXPORT";
pub const AML_REPORT_FILED: &str = "AML_REPORT_FILED";
pub const CURRENCY_UPDATED: &str = "CURRENCY_UPDATED";
pub const WALLET_UPDATED: &str = "WALLET_UPDATED";

// ---------------------------------------------------------------------------
// Entity types
// ---------------------------------------------------------------------------

pub const ENTITY_ORDER: &str = "Order";
pub const ENTITY_KYC_SESSION: &str = "KycSession";
pub const ENTITY_USER: &str = "User";
pub const ENTITY_ADMIN: &str = "Admin";
pub const ENTITY_API_KEY: &str = "ApiKey";
pub const ENTITY_PAYOUT: &str = "Payout";
pub const ENTITY_TENANT: &str = "Tenant";
