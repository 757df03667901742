//! Rule registry: parse and validate the rules file into an ordered [`RuleSet`].
//!
//! Malformed rules abort the run here, before any query is issued; nothing downstream ever sees
//! an unknown kind or a missing kind-specific field.

use govguard_domain::model::{
    AccessPolicy, ConsentLogIntegrity, ConsentRequired, DuplicateStudent, GpaOutlier, PiiNotNull,
    RuleCheck, RuleDefinition, RuleKind, RuleSet, is_valid_identifier, is_valid_table_name,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DEFAULT_CONSENT_COLUMN: &str = "consent_given";
const DEFAULT_GPA_COLUMN: &str = "GPA";
const DEFAULT_GPA_MIN: f64 = 0.0;
const DEFAULT_GPA_MAX: f64 = 4.0;
const DEFAULT_KEY_COLUMN: &str = "student_id";
const DEFAULT_CONSENT_LOG_TABLE: &str = "consent_logs";

/// Rules file schema v1 (`rules.yaml`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RulesFileV1 {
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

/// A rule as written in the file. Kind-specific requirements are checked during resolution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violation_threshold: Option<ThresholdEntry>,

    /// Legacy placement of `condition.filter_table`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_table: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ConditionEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ThresholdEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_violations_per_day: Option<u64>,
}

/// Load-time rule errors. Positions are 1-based, in file order.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to parse rules file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("rule #{position}: unknown rule kind {id:?}")]
    UnknownKind { position: usize, id: String },

    #[error("rule #{position} ({id}): missing required field `{field}`")]
    MissingField {
        position: usize,
        id: String,
        field: &'static str,
    },

    #[error("rule #{position} ({id}): `{field}` is not a valid identifier: {value:?}")]
    InvalidIdentifier {
        position: usize,
        id: String,
        field: &'static str,
        value: String,
    },

    #[error("rule #{position} ({id}): {reason}")]
    InvalidValue {
        position: usize,
        id: String,
        reason: String,
    },

    #[error("rule #{position}: duplicate rule id {id:?} (first defined by rule #{first})")]
    DuplicateId {
        position: usize,
        first: usize,
        id: String,
    },
}

/// Parse and validate `rules.yaml`, preserving file order.
pub fn parse_rules_yaml(input: &str) -> Result<RuleSet, RegistryError> {
    let file: RulesFileV1 = if input.trim().is_empty() {
        RulesFileV1::default()
    } else {
        serde_yaml::from_str(input)?
    };
    resolve_rules(file)
}

fn resolve_rules(file: RulesFileV1) -> Result<RuleSet, RegistryError> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    let mut rules = Vec::with_capacity(file.rules.len());

    for (idx, entry) in file.rules.into_iter().enumerate() {
        let position = idx + 1;
        if let Some(&first) = seen.get(&entry.id) {
            return Err(RegistryError::DuplicateId {
                position,
                first,
                id: entry.id,
            });
        }
        seen.insert(entry.id.clone(), position);
        rules.push(resolve_rule(position, entry)?);
    }

    Ok(RuleSet::new(rules))
}

/// Validation context for one entry.
struct Ctx<'a> {
    position: usize,
    id: &'a str,
}

impl Ctx<'_> {
    fn missing(&self, field: &'static str) -> RegistryError {
        RegistryError::MissingField {
            position: self.position,
            id: self.id.to_string(),
            field,
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> RegistryError {
        RegistryError::InvalidValue {
            position: self.position,
            id: self.id.to_string(),
            reason: reason.into(),
        }
    }

    fn identifier(&self, field: &'static str, value: String) -> Result<String, RegistryError> {
        if is_valid_identifier(&value) {
            Ok(value)
        } else {
            Err(self.bad_identifier(field, value))
        }
    }

    fn table(&self, field: &'static str, value: String) -> Result<String, RegistryError> {
        if is_valid_table_name(&value) {
            Ok(value)
        } else {
            Err(self.bad_identifier(field, value))
        }
    }

    fn bad_identifier(&self, field: &'static str, value: String) -> RegistryError {
        RegistryError::InvalidIdentifier {
            position: self.position,
            id: self.id.to_string(),
            field,
            value,
        }
    }
}

fn resolve_rule(position: usize, entry: RuleEntry) -> Result<RuleDefinition, RegistryError> {
    let Some(kind) = RuleKind::parse(&entry.id) else {
        return Err(RegistryError::UnknownKind {
            position,
            id: entry.id,
        });
    };
    let ctx = Ctx {
        position,
        id: &entry.id,
    };

    let name = entry
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ctx.missing("name"))?;
    let table = entry
        .table
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ctx.missing("table"))?;
    let table = ctx.table("table", table)?;

    let condition = entry.condition.unwrap_or_default();

    let check = match kind {
        RuleKind::ConsentRequired => RuleCheck::ConsentRequired(ConsentRequired {
            column: ctx.identifier(
                "condition.column",
                condition
                    .column
                    .unwrap_or_else(|| DEFAULT_CONSENT_COLUMN.to_string()),
            )?,
        }),
        RuleKind::PiiNotNullCheck => {
            let fields = entry
                .fields
                .filter(|f| !f.is_empty())
                .ok_or_else(|| ctx.missing("fields"))?;
            let fields = fields
                .into_iter()
                .map(|f| ctx.identifier("fields", f))
                .collect::<Result<Vec<_>, _>>()?;
            RuleCheck::PiiNotNull(PiiNotNull { fields })
        }
        RuleKind::AccessPolicyViolation => {
            let filter_table = condition
                .filter_table
                .or(entry.filter_table)
                .filter(|t| !t.trim().is_empty())
                .ok_or_else(|| ctx.missing("condition.filter_table"))?;
            let allowed_values = condition
                .allowed_values
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ctx.missing("condition.allowed_values"))?;
            let max_violations_per_day = entry
                .violation_threshold
                .and_then(|t| t.max_violations_per_day)
                .ok_or_else(|| ctx.missing("violation_threshold.max_violations_per_day"))?;
            RuleCheck::AccessPolicy(AccessPolicy {
                filter_table,
                allowed_values,
                max_violations_per_day,
            })
        }
        RuleKind::GpaOutlierCheck => {
            let min = condition.min.unwrap_or(DEFAULT_GPA_MIN);
            let max = condition.max.unwrap_or(DEFAULT_GPA_MAX);
            if !min.is_finite() || !max.is_finite() || min > max {
                return Err(ctx.invalid(format!(
                    "condition.min/max must be finite with min <= max (got {min}..{max})"
                )));
            }
            RuleCheck::GpaOutlier(GpaOutlier {
                column: ctx.identifier(
                    "condition.column",
                    condition
                        .column
                        .unwrap_or_else(|| DEFAULT_GPA_COLUMN.to_string()),
                )?,
                min,
                max,
            })
        }
        RuleKind::DuplicateStudentCheck => RuleCheck::DuplicateStudent(DuplicateStudent {
            key_column: ctx.identifier(
                "condition.key_column",
                condition
                    .key_column
                    .unwrap_or_else(|| DEFAULT_KEY_COLUMN.to_string()),
            )?,
        }),
        RuleKind::ConsentLogIntegrity => RuleCheck::ConsentLogIntegrity(ConsentLogIntegrity {
            log_table: ctx.table(
                "condition.log_table",
                condition
                    .log_table
                    .unwrap_or_else(|| DEFAULT_CONSENT_LOG_TABLE.to_string()),
            )?,
            key_column: ctx.identifier(
                "condition.key_column",
                condition
                    .key_column
                    .unwrap_or_else(|| DEFAULT_KEY_COLUMN.to_string()),
            )?,
        }),
    };

    Ok(RuleDefinition { name, table, check })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
rules:
  - id: consent_required
    name: Student Consent
    table: students
  - id: pii_not_null_check
    name: PII Completeness
    table: dim_student
    fields: [email, id_number]
  - id: access_policy_violation
    name: Restricted Grade Access
    table: access_logs
    condition:
      filter_table: grades
      allowed_values: [admin, data_engineer]
    violation_threshold:
      max_violations_per_day: 5
  - id: gpa_outlier_check
    name: GPA Range
    table: grades
  - id: duplicate_student_check
    name: Unique Students
    table: dim_student
  - id: consent_log_integrity
    name: Consent Log Coverage
    table: students
"#;

    #[test]
    fn loads_all_kinds_in_file_order() {
        let set = parse_rules_yaml(SAMPLE).expect("parse rules");
        let ids: Vec<&str> = set.iter().map(|r| r.id()).collect();
        assert_eq!(
            ids,
            vec![
                "consent_required",
                "pii_not_null_check",
                "access_policy_violation",
                "gpa_outlier_check",
                "duplicate_student_check",
                "consent_log_integrity",
            ]
        );
    }

    #[test]
    fn applies_kind_defaults() {
        let set = parse_rules_yaml(SAMPLE).expect("parse rules");
        let rules = set.rules();
        assert_eq!(
            rules[0].check,
            RuleCheck::ConsentRequired(ConsentRequired {
                column: "consent_given".to_string()
            })
        );
        assert_eq!(
            rules[3].check,
            RuleCheck::GpaOutlier(GpaOutlier {
                column: "GPA".to_string(),
                min: 0.0,
                max: 4.0
            })
        );
        assert_eq!(
            rules[5].check,
            RuleCheck::ConsentLogIntegrity(ConsentLogIntegrity {
                log_table: "consent_logs".to_string(),
                key_column: "student_id".to_string()
            })
        );
    }

    #[test]
    fn unknown_kind_fails_at_load_time() {
        let err = parse_rules_yaml(
            r#"
rules:
  - id: gpa_outlier_check
    name: GPA Range
    table: grades
  - id: retention_policy
    name: Retention
    table: students
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::UnknownKind { position: 2, ref id } if id == "retention_policy"
        ));
    }

    #[test]
    fn pii_requires_fields() {
        let err = parse_rules_yaml(
            "rules:\n  - id: pii_not_null_check\n    name: PII\n    table: dim_student\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::MissingField { field: "fields", .. }
        ));

        let empty = parse_rules_yaml(
            "rules:\n  - id: pii_not_null_check\n    name: PII\n    table: dim_student\n    fields: []\n",
        )
        .unwrap_err();
        assert!(matches!(
            empty,
            RegistryError::MissingField { field: "fields", .. }
        ));
    }

    #[test]
    fn access_policy_requires_condition_and_threshold() {
        let no_threshold = parse_rules_yaml(
            r#"
rules:
  - id: access_policy_violation
    name: Access
    table: access_logs
    condition:
      filter_table: grades
      allowed_values: [admin]
"#,
        )
        .unwrap_err();
        assert!(matches!(
            no_threshold,
            RegistryError::MissingField {
                field: "violation_threshold.max_violations_per_day",
                ..
            }
        ));

        let no_roles = parse_rules_yaml(
            r#"
rules:
  - id: access_policy_violation
    name: Access
    table: access_logs
    condition:
      filter_table: grades
    violation_threshold:
      max_violations_per_day: 1
"#,
        )
        .unwrap_err();
        assert!(matches!(
            no_roles,
            RegistryError::MissingField {
                field: "condition.allowed_values",
                ..
            }
        ));
    }

    #[test]
    fn access_policy_accepts_legacy_filter_table() {
        let set = parse_rules_yaml(
            r#"
rules:
  - id: access_policy_violation
    name: Access
    table: access_logs
    filter_table: grades
    condition:
      allowed_values: [admin]
    violation_threshold:
      max_violations_per_day: 2
"#,
        )
        .expect("parse rules");
        let RuleCheck::AccessPolicy(p) = &set.rules()[0].check else {
            panic!("expected access policy");
        };
        assert_eq!(p.filter_table, "grades");
        assert_eq!(p.max_violations_per_day, 2);
    }

    #[test]
    fn identifiers_from_rules_are_validated() {
        let err = parse_rules_yaml(
            r#"
rules:
  - id: pii_not_null_check
    name: PII
    table: dim_student
    fields: ["email IS NULL OR 1=1 --"]
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InvalidIdentifier { field: "fields", .. }
        ));

        let bad_table = parse_rules_yaml(
            "rules:\n  - id: gpa_outlier_check\n    name: GPA\n    table: \"grades; DROP TABLE grades\"\n",
        )
        .unwrap_err();
        assert!(matches!(
            bad_table,
            RegistryError::InvalidIdentifier { field: "table", .. }
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = parse_rules_yaml(
            r#"
rules:
  - id: gpa_outlier_check
    name: GPA
    table: grades
  - id: gpa_outlier_check
    name: GPA again
    table: grades
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::DuplicateId {
                position: 2,
                first: 1,
                ..
            }
        ));
    }

    #[test]
    fn gpa_bounds_must_be_ordered() {
        let err = parse_rules_yaml(
            r#"
rules:
  - id: gpa_outlier_check
    name: GPA
    table: grades
    condition:
      min: 5.0
      max: 4.0
"#,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidValue { .. }));
    }

    #[test]
    fn misspelled_condition_keys_are_rejected() {
        let err = parse_rules_yaml(
            r#"
rules:
  - id: consent_log_integrity
    name: Consent Log Coverage
    table: students
    condition:
      log_tabel: consent_audit
"#,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::Parse(_)));
        assert!(err.to_string().contains("log_tabel"), "{err}");

        let err = parse_rules_yaml(
            r#"
rules:
  - id: access_policy_violation
    name: Restricted Grade Access
    table: access_logs
    condition:
      filter_table: grades
      allowed_values: [admin]
    violation_threshold:
      max_violations_per_week: 5
"#,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::Parse(_)));
    }

    #[test]
    fn extra_display_keys_on_a_rule_still_load() {
        let set = parse_rules_yaml(
            r#"
rules:
  - id: gpa_outlier_check
    name: GPA Range
    table: grades
    description: Flags grades outside the GPA scale.
"#,
        )
        .expect("parse rules");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn missing_name_or_table_is_rejected() {
        let err = parse_rules_yaml("rules:\n  - id: gpa_outlier_check\n    table: grades\n")
            .unwrap_err();
        assert!(matches!(err, RegistryError::MissingField { field: "name", .. }));
        let err = parse_rules_yaml("rules:\n  - id: gpa_outlier_check\n    name: GPA\n")
            .unwrap_err();
        assert!(matches!(err, RegistryError::MissingField { field: "table", .. }));
    }

    #[test]
    fn empty_input_is_an_empty_rule_set() {
        assert!(parse_rules_yaml("").expect("empty").is_empty());
        assert!(parse_rules_yaml("rules: []\n").expect("empty list").is_empty());
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = parse_rules_yaml("rules: [\n").unwrap_err();
        assert!(matches!(err, RegistryError::Parse(_)));
    }
}
