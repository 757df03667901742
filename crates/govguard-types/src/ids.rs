//! Stable identifiers for rule kinds and dashboard log prefixes.
//!
//! Rule kind IDs are the `id` values accepted in the rules file. Log prefixes are parsed
//! line-by-line by the compliance dashboard and must not change.

// Rule kinds
pub const RULE_CONSENT_REQUIRED: &str = "consent_required";
pub const RULE_PII_NOT_NULL_CHECK: &str = "pii_not_null_check";
pub const RULE_ACCESS_POLICY_VIOLATION: &str = "access_policy_violation";
pub const RULE_GPA_OUTLIER_CHECK: &str = "gpa_outlier_check";
pub const RULE_DUPLICATE_STUDENT_CHECK: &str = "duplicate_student_check";
pub const RULE_CONSENT_LOG_INTEGRITY: &str = "consent_log_integrity";

/// All recognized rule kinds, in documentation order.
pub const ALL_RULE_KINDS: &[&str] = &[
    RULE_CONSENT_REQUIRED,
    RULE_PII_NOT_NULL_CHECK,
    RULE_ACCESS_POLICY_VIOLATION,
    RULE_GPA_OUTLIER_CHECK,
    RULE_DUPLICATE_STUDENT_CHECK,
    RULE_CONSENT_LOG_INTEGRITY,
];

// Log prefixes
pub const PREFIX_QUERY: &str = "[QUERY]";
pub const PREFIX_ERROR: &str = "[ERROR]";
pub const PREFIX_TIMEOUT: &str = "[TIMEOUT]";
pub const PREFIX_INFO: &str = "[INFO]";
pub const PREFIX_DQ: &str = "[DQ]";
pub const PREFIX_ALERT: &str = "[ALERT]";
pub const PREFIX_SUMMARY: &str = "[SUMMARY]";
