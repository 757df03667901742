use super::utils::single_result;
use crate::model::{ConsentLogIntegrity, Query, QueryOutcome, RuleDefinition};
use govguard_types::Violation;
use serde_json::json;

pub fn translate(table: &str, params: &ConsentLogIntegrity) -> Vec<Query> {
    let key = &params.key_column;
    let log_table = &params.log_table;
    vec![Query::new(format!(
        "SELECT DISTINCT s.{key} FROM {table} s LEFT JOIN {log_table} c ON s.{key} = c.{key} WHERE c.{key} IS NULL"
    ))]
}

pub fn evaluate(
    rule: &RuleDefinition,
    params: &ConsentLogIntegrity,
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
        message: format!(
            "{} failed: {} students missing consent logs.",
            rule.name, count
        ),
        count,
        data: json!({
            "table": rule.table,
            "log_table": params.log_table,
            "key_column": params.key_column,
        }),
    });
}
