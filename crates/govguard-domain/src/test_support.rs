use crate::model::{
    AccessPolicy, ConsentLogIntegrity, ConsentRequired, DuplicateStudent, GpaOutlier, PiiNotNull,
    QueryResult, RuleCheck, RuleDefinition,
};

pub fn consent_rule(table: &str) -> RuleDefinition {
    RuleDefinition {
        name: "Student Consent".to_string(),
        table: table.to_string(),
        check: RuleCheck::ConsentRequired(ConsentRequired {
            column: "consent_given".to_string(),
        }),
    }
}

pub fn pii_rule(table: &str, fields: &[&str]) -> RuleDefinition {
    RuleDefinition {
        name: "PII Completeness".to_string(),
        table: table.to_string(),
        check: RuleCheck::PiiNotNull(PiiNotNull {
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }),
    }
}

pub fn access_rule(filter_table: &str, allowed: &[&str], max: u64) -> RuleDefinition {
    RuleDefinition {
        name: "Restricted Grade Access".to_string(),
        table: "access_logs".to_string(),
        check: RuleCheck::AccessPolicy(AccessPolicy {
            filter_table: filter_table.to_string(),
            allowed_values: allowed.iter().map(|v| v.to_string()).collect(),
            max_violations_per_day: max,
        }),
    }
}

pub fn gpa_rule(table: &str) -> RuleDefinition {
    RuleDefinition {
        name: "GPA Range".to_string(),
        table: table.to_string(),
        check: RuleCheck::GpaOutlier(GpaOutlier {
            column: "GPA".to_string(),
            min: 0.0,
            max: 4.0,
        }),
    }
}

pub fn duplicate_rule(table: &str) -> RuleDefinition {
    RuleDefinition {
        name: "Unique Students".to_string(),
        table: table.to_string(),
        check: RuleCheck::DuplicateStudent(DuplicateStudent {
            key_column: "student_id".to_string(),
        }),
    }
}

pub fn consent_log_rule(table: &str) -> RuleDefinition {
    RuleDefinition {
        name: "Consent Log Coverage".to_string(),
        table: table.to_string(),
        check: RuleCheck::ConsentLogIntegrity(ConsentLogIntegrity {
            log_table: "consent_logs".to_string(),
            key_column: "student_id".to_string(),
        }),
    }
}

pub fn all_kinds() -> Vec<RuleDefinition> {
    vec![
        consent_rule("students"),
        pii_rule("dim_student", &["email", "id_number"]),
        access_rule("grades", &["admin", "data_engineer"], 5),
        gpa_rule("grades"),
        duplicate_rule("dim_student"),
        consent_log_rule("students"),
    ]
}

/// Result with the given header; the literal `NULL` becomes a null cell.
pub fn rows(columns: &[&str], data: &[&[&str]]) -> QueryResult {
    QueryResult::from_cells(
        columns.iter().map(|c| c.to_string()).collect(),
        data.iter()
            .map(|row| {
                row.iter()
                    .map(|cell| (*cell != "NULL").then(|| cell.to_string()))
                    .collect()
            })
            .collect(),
    )
}

/// `n` single-column rows.
pub fn n_rows(column: &str, n: usize) -> QueryResult {
    QueryResult::from_cells(
        vec![column.to_string()],
        (0..n).map(|i| vec![Some(format!("row{i}"))]).collect(),
    )
}
