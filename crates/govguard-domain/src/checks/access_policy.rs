use super::utils::{quote_list, quote_literal, single_result};
use crate::model::{AccessPolicy, Query, QueryOutcome, RuleDefinition};
use govguard_types::Violation;
use serde_json::json;

pub fn translate(table: &str, params: &AccessPolicy) -> Vec<Query> {
    vec![Query::new(format!(
        "SELECT * FROM {table} WHERE table_name = {} AND role NOT IN ({})",
        quote_literal(&params.filter_table),
        quote_list(&params.allowed_values),
    ))]
}

pub fn evaluate(
    rule: &RuleDefinition,
    params: &AccessPolicy,
    outcomes: &[QueryOutcome],
    out: &mut Vec<Violation>,
) {
    let Some(result) = single_result(outcomes) else {
        return;
    };

    let count = result.row_count() as u64;
    // Strict: reaching the daily limit exactly is still compliant.
    if count <= params.max_violations_per_day {
        return;
    }

    out.push(Violation {
        rule_id: rule.id().to_string(),
        message: format!(
            "{} breached: {} unauthorized accesses logged (limit {}).",
            rule.name, count, params.max_violations_per_day
        ),
        count,
        data: json!({
            "table": rule.table,
            "filter_table": params.filter_table,
            "allowed_values": params.allowed_values,
            "max_violations_per_day": params.max_violations_per_day,
        }),
    });
}
