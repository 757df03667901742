//! Fuzz target for access-policy translation and evaluation.
//!
//! Goal: arbitrary filter tables and role names stay inside string literals, and evaluation of
//! arbitrary results never panics.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_access_policy
//! ```

#![no_main]

use arbitrary::Arbitrary;
use govguard_domain::model::{
    AccessPolicy, QueryOutcome, QueryResult, RuleCheck, RuleDefinition,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct AccessInput {
    filter_table: String,
    allowed_values: Vec<String>,
    max_violations_per_day: u64,
    rows: Vec<Vec<Option<String>>>,
}

fuzz_target!(|input: AccessInput| {
    if input.allowed_values.len() > 32 || input.rows.len() > 256 {
        return;
    }

    let rule = RuleDefinition {
        name: "Restricted Grade Access".to_string(),
        table: "access_logs".to_string(),
        check: RuleCheck::AccessPolicy(AccessPolicy {
            filter_table: input.filter_table,
            allowed_values: input.allowed_values,
            max_violations_per_day: input.max_violations_per_day,
        }),
    };

    for query in govguard_domain::checks::translate(&rule) {
        // Outside literals the statement is fixed text, so it never contains a statement break.
        let outside = strip_literals(&query.sql);
        assert!(!outside.contains(';'), "{}", query.sql);
    }

    let result = QueryResult::from_cells(vec!["role".to_string()], input.rows);
    let mut out = Vec::new();
    govguard_domain::checks::evaluate(&rule, &[QueryOutcome::Rows(result)], &mut out);
});

/// Remove single-quoted literals, honouring backslash escapes.
fn strip_literals(sql: &str) -> String {
    let mut out = String::new();
    let mut in_literal = false;
    let mut chars = sql.chars();
    while let Some(c) = chars.next() {
        match (in_literal, c) {
            (true, '\\') => {
                chars.next();
            }
            (true, '\'') => in_literal = false,
            (true, _) => {}
            (false, '\'') => in_literal = true,
            (false, _) => out.push(c),
        }
    }
    out
}
