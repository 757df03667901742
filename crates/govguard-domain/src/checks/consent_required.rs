use super::utils::single_result;
use crate::model::{ConsentRequired, Query, QueryOutcome, RuleDefinition};
use govguard_types::Violation;
use serde_json::json;

pub fn translate(table: &str, params: &ConsentRequired) -> Vec<Query> {
    let column = &params.column;
    vec![Query::new(format!(
        "SELECT * FROM {table} WHERE {column} IS NULL OR {column} != true"
    ))]
}

pub fn evaluate(
    rule: &RuleDefinition,
    params: &ConsentRequired,
    outcomes: &[QueryOutcome],
    out: &mut Vec<Violation>,
) {
    let Some(result) = single_result(outcomes) else {
        return;
    };
    if result.is_empty() {
        return;
    }

    let count = result.row_count() as u64;
    out.push(Violation {
        rule_id: rule.id().to_string(),
        message: format!("{} violated: {} records without consent.", rule.name, count),
        count,
        data: json!({
            "table": rule.table,
            "column": params.column,
        }),
    });
}
