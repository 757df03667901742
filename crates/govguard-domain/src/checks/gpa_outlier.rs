use super::utils::single_result;
use crate::model::{GpaOutlier, Query, QueryOutcome, RuleDefinition};
use govguard_types::Violation;
use serde_json::json;

pub fn translate(table: &str, params: &GpaOutlier) -> Vec<Query> {
    let column = &params.column;
    vec![Query::new(format!(
        "SELECT * FROM {table} WHERE {column} < {:?} OR {column} > {:?}",
        params.min, params.max
    ))]
}

pub fn evaluate(
    rule: &RuleDefinition,
    params: &GpaOutlier,
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
        message: format!("{} found {} GPA outliers.", rule.name, count),
        count,
        data: json!({
            "table": rule.table,
            "column": params.column,
            "min": params.min,
            "max": params.max,
        }),
    });
}
