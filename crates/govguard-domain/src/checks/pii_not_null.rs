use super::utils::parse_count;
use crate::model::{PiiNotNull, Query, QueryOutcome, RuleDefinition};
use govguard_types::Violation;
use serde_json::json;

/// Column alias carrying the NULL count.
const NULLS_COLUMN: &str = "nulls";

pub fn translate(table: &str, params: &PiiNotNull) -> Vec<Query> {
    params
        .fields
        .iter()
        .map(|field| {
            Query::labeled(
                field,
                format!("SELECT COUNT(*) AS {NULLS_COLUMN} FROM {table} WHERE {field} IS NULL"),
            )
        })
        .collect()
}

pub fn evaluate(
    rule: &RuleDefinition,
    params: &PiiNotNull,
    outcomes: &[QueryOutcome],
    out: &mut Vec<Violation>,
) {
    // One outcome per field; a failed field is skipped without hiding the others.
    for (field, outcome) in params.fields.iter().zip(outcomes) {
        let Some(result) = outcome.rows() else { continue };
        let Some(cell) = result.first_value(NULLS_COLUMN) else { continue };
        let Some(nulls) = parse_count(cell) else {
            continue;
        };
        if nulls == 0 {
            continue;
        }

        out.push(Violation {
            rule_id: rule.id().to_string(),
            message: format!("{} in {} has {} NULL values.", field, rule.table, nulls),
            count: nulls,
            data: json!({
                "table": rule.table,
                "field": field,
            }),
        });
    }
}
