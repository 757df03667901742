//! Explain registry for rule kinds.
//!
//! Maps rule kind IDs to human-readable explanations with the parameters each kind accepts.

use crate::ids;

/// Explanation entry for a rule kind.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the rule kind.
    pub title: &'static str,
    /// What the rule checks and which query it issues.
    pub description: &'static str,
    /// Rule fields the kind reads, with defaults.
    pub parameters: &'static str,
    /// Example rules-file entry.
    pub example: &'static str,
}

/// Look up an explanation by rule kind ID.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::RULE_CONSENT_REQUIRED => Some(explain_consent_required()),
        ids::RULE_PII_NOT_NULL_CHECK => Some(explain_pii_not_null()),
        ids::RULE_ACCESS_POLICY_VIOLATION => Some(explain_access_policy()),
        ids::RULE_GPA_OUTLIER_CHECK => Some(explain_gpa_outlier()),
        ids::RULE_DUPLICATE_STUDENT_CHECK => Some(explain_duplicate_student()),
        ids::RULE_CONSENT_LOG_INTEGRITY => Some(explain_consent_log_integrity()),
        _ => None,
    }
}

/// List all known rule kind IDs.
pub fn all_rule_kinds() -> &'static [&'static str] {
    ids::ALL_RULE_KINDS
}

fn explain_consent_required() -> Explanation {
    Explanation {
        title: "Consent Required",
        description: "\
Selects rows of `table` whose consent flag is not true.

Any returned row is a record processed without the data subject's consent,
reported as one violation carrying the row count.",
        parameters: "\
- table: target table
- condition.column: boolean consent column (default `consent_given`)",
        example: r#"- id: consent_required
  name: Student Consent
  table: students"#,
    }
}

fn explain_pii_not_null() -> Explanation {
    Explanation {
        title: "PII Not Null",
        description: "\
Counts NULL values per listed field in `table`, one query per field.

Each field with a positive NULL count is reported as its own violation naming the
field, the table and the count. Fields whose query fails are skipped while the
remaining fields are still checked.",
        parameters: "\
- table: target table
- fields: non-empty list of columns that must never be NULL",
        example: r#"- id: pii_not_null_check
  name: PII Completeness
  table: dim_student
  fields: [email, id_number]"#,
    }
}

fn explain_access_policy() -> Explanation {
    Explanation {
        title: "Access Policy",
        description: "\
Selects entries of the access log `table` against `condition.filter_table` whose role is not in
`condition.allowed_values`.

A violation is reported only when the number of such entries is strictly greater
than `violation_threshold.max_violations_per_day`; hitting the limit exactly passes.",
        parameters: "\
- table: access log table (columns `table_name`, `role`)
- condition.filter_table: table whose access is audited
- condition.allowed_values: non-empty list of permitted roles
- violation_threshold.max_violations_per_day: tolerated unauthorized accesses",
        example: r#"- id: access_policy_violation
  name: Restricted Grade Access
  table: access_logs
  condition:
    filter_table: grades
    allowed_values: [admin, data_engineer]
  violation_threshold:
    max_violations_per_day: 5"#,
    }
}

fn explain_gpa_outlier() -> Explanation {
    Explanation {
        title: "GPA Outlier",
        description: "\
Selects rows of `table` whose grade column falls outside the valid range.

Any returned row is reported as one violation carrying the outlier count.",
        parameters: "\
- table: target table
- condition.column: numeric grade column (default `GPA`)
- condition.min / condition.max: inclusive bounds (default 0.0 and 4.0)",
        example: r#"- id: gpa_outlier_check
  name: GPA Range
  table: grades"#,
    }
}

fn explain_duplicate_student() -> Explanation {
    Explanation {
        title: "Duplicate Student",
        description: "\
Groups `table` by the student key and keeps groups with more than one row.

Any returned group is reported as one violation carrying the number of duplicate
groups.",
        parameters: "\
- table: target table
- condition.key_column: student identifier column (default `student_id`)",
        example: r#"- id: duplicate_student_check
  name: Unique Students
  table: dim_student"#,
    }
}

fn explain_consent_log_integrity() -> Explanation {
    Explanation {
        title: "Consent Log Integrity",
        description: "\
Left-anti-joins `table` against the consent log on the student key.

Every student without a matching consent log row counts towards a single
violation.",
        parameters: "\
- table: student table
- condition.log_table: consent log table (default `consent_logs`)
- condition.key_column: join key (default `student_id`)",
        example: r#"- id: consent_log_integrity
  name: Consent Log Coverage
  table: students"#,
    }
}
