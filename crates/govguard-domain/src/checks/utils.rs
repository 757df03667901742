use crate::model::{QueryOutcome, QueryResult};

/// Render `value` as a single-quoted HiveQL string literal.
///
/// Values from the rules file are only ever emitted through here, never as identifiers.
pub fn quote_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}

/// `'a', 'b', 'c'` for use inside `IN (...)`.
pub fn quote_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| quote_literal(v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a count cell. Hive prints integers, but tolerate a trailing `.0`.
pub fn parse_count(cell: &str) -> Option<u64> {
    let cell = cell.trim();
    cell.parse::<u64>().ok().or_else(|| {
        cell.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
            .map(|f| f as u64)
    })
}

/// Rows of the single query a one-query rule issued, if it produced any result.
pub fn single_result(outcomes: &[QueryOutcome]) -> Option<&QueryResult> {
    outcomes.first().and_then(QueryOutcome::rows)
}
