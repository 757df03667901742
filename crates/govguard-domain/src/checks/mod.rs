//! Query translation and violation evaluation, one module per rule kind.
//!
//! The `match` on [`RuleCheck`] binds every kind to its translator/evaluator pair; adding a kind
//! without both is a compile error.

use crate::model::{QueryOutcome, Query, RuleCheck, RuleDefinition};
use govguard_types::Violation;

mod access_policy;
mod consent_log_integrity;
mod consent_required;
mod duplicate_student;
mod gpa_outlier;
mod pii_not_null;
pub mod utils;


/// Build the queries needed to evaluate `rule`, in execution order.
pub fn translate(rule: &RuleDefinition) -> Vec<Query> {
    match &rule.check {
        RuleCheck::ConsentRequired(p) => consent_required::translate(&rule.table, p),
        RuleCheck::PiiNotNull(p) => pii_not_null::translate(&rule.table, p),
        RuleCheck::AccessPolicy(p) => access_policy::translate(&rule.table, p),
        RuleCheck::GpaOutlier(p) => gpa_outlier::translate(&rule.table, p),
        RuleCheck::DuplicateStudent(p) => duplicate_student::translate(&rule.table, p),
        RuleCheck::ConsentLogIntegrity(p) => consent_log_integrity::translate(&rule.table, p),
    }
}

/// Evaluate `outcomes` (positionally matching [`translate`]) and append violations to `out`.
///
/// Unavailable outcomes never produce a violation.
pub fn evaluate(rule: &RuleDefinition, outcomes: &[QueryOutcome], out: &mut Vec<Violation>) {
    match &rule.check {
        RuleCheck::ConsentRequired(p) => consent_required::evaluate(rule, p, outcomes, out),
        RuleCheck::PiiNotNull(p) => pii_not_null::evaluate(rule, p, outcomes, out),
        RuleCheck::AccessPolicy(p) => access_policy::evaluate(rule, p, outcomes, out),
        RuleCheck::GpaOutlier(p) => gpa_outlier::evaluate(rule, p, outcomes, out),
        RuleCheck::DuplicateStudent(p) => duplicate_student::evaluate(rule, p, outcomes, out),
        RuleCheck::ConsentLogIntegrity(p) => {
            consent_log_integrity::evaluate(rule, p, outcomes, out)
        }
    }
}
