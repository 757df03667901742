use super::utils::single_result;
use crate::model::{DuplicateStudent, Query, QueryOutcome, RuleDefinition};
use govguard_types::Violation;
use serde_json::json;

pub fn translate(table: &str, params: &DuplicateStudent) -> Vec<Query> {
    let key = &params.key_column;
    vec![Query::new(format!(
        "SELECT {key}, COUNT(*) AS cnt FROM {table} GROUP BY {key} HAVING COUNT(*) > 1"
    ))]
}

pub fn evaluate(
    rule: &RuleDefinition,
    params: &DuplicateStudent,
    outcomes: &[QueryOutcome],
    out: &mut Vec<Violation>,
) {
    let Some(result) = single_result(outcomes) else {
        return;
    };
    // The HAVING clause already dropped singleton groups.
    if result.is_empty() {
        return;
    }

    let count = result.row_count() as u64;
    out.push(Violation {
        rule_id: rule.id().to_string(),
        message: format!(
            "Duplicate {} detected: {} duplicates.",
            params.key_column, count
        ),
        count,
        data: json!({
            "table": rule.table,
            "key_column": params.key_column,
        }),
    });
}
