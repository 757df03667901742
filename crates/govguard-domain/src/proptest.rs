//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - empty and unavailable results never violating
//! - the strict access-policy threshold
//! - report order being independent of evaluation completion order

use crate::checks;
use crate::engine::{aggregate, evaluate_rule};
use crate::model::{QueryFailure, QueryOutcome, QueryResult, RuleDefinition, RuleSet};
use crate::report::RuleEvaluation;
use crate::test_support::{access_rule, all_kinds, n_rows, pii_rule};
use proptest::prelude::*;
use std::time::Duration;

fn arb_identifier() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z_][a-z0-9_]{0,15}").unwrap()
}

/// Outcome with a random number of rows, or a failure.
fn arb_outcome() -> impl Strategy<Value = QueryOutcome> {
    prop_oneof![
        (0usize..12).prop_map(|n| QueryOutcome::Rows(n_rows("nulls", n))),
        (0u64..20).prop_map(|n| QueryOutcome::Rows(crate::test_support::rows(
            &["nulls"],
            &[&[n.to_string().as_str()]]
        ))),
        Just(QueryOutcome::Unavailable(QueryFailure::Timeout { limit: Duration::from_secs(180) })),
        Just(QueryOutcome::Unavailable(QueryFailure::QueryFailed {
            code: Some(2),
            diagnostic: "boom".to_string()
        })),
    ]
}

fn evaluate_all(rules: &[RuleDefinition], outcomes: &[Vec<QueryOutcome>]) -> Vec<RuleEvaluation> {
    rules
        .iter()
        .zip(outcomes)
        .map(|(rule, o)| evaluate_rule(rule, o, Vec::new()))
        .collect()
}

proptest! {
    #[test]
    fn empty_results_yield_no_violations(fields in prop::collection::vec(arb_identifier(), 1..5)) {
        let field_refs: Vec<&str> = fields.iter().map(String::as_str).collect();
        let mut rules = all_kinds();
        rules.push(pii_rule("dim_student", &field_refs));

        for rule in &rules {
            let outcomes: Vec<QueryOutcome> = checks::translate(rule)
                .iter()
                .map(|_| QueryOutcome::Rows(QueryResult::empty()))
                .collect();
            let mut out = Vec::new();
            checks::evaluate(rule, &outcomes, &mut out);
            prop_assert!(out.is_empty());
        }
    }

    #[test]
    fn access_policy_violates_iff_count_exceeds_threshold(max in 0u64..40, count in 0usize..80) {
        let rule = access_rule("grades", &["admin", "data_engineer"], max);
        let mut out = Vec::new();
        checks::evaluate(&rule, &[QueryOutcome::Rows(n_rows("role", count))], &mut out);
        prop_assert_eq!(!out.is_empty(), count as u64 > max);
    }

    #[test]
    fn report_order_ignores_completion_order(
        outcomes in prop::collection::vec(prop::collection::vec(arb_outcome(), 2), 6),
        order in Just((0usize..6).collect::<Vec<_>>()).prop_shuffle(),
    ) {
        let rules = RuleSet::new(all_kinds());
        let evaluations = evaluate_all(rules.rules(), &outcomes);

        let sequential: Vec<Option<RuleEvaluation>> =
            evaluations.iter().cloned().map(Some).collect();

        // Fill slots in a shuffled completion order.
        let mut shuffled: Vec<Option<RuleEvaluation>> = vec![None; rules.len()];
        for idx in order {
            shuffled[idx] = Some(evaluations[idx].clone());
        }

        let a = aggregate(&rules, sequential, Vec::new());
        let b = aggregate(&rules, shuffled, Vec::new());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn evaluation_is_deterministic(
        outcomes in prop::collection::vec(prop::collection::vec(arb_outcome(), 2), 6),
    ) {
        let rules = RuleSet::new(all_kinds());
        let first = evaluate_all(rules.rules(), &outcomes);
        let second = evaluate_all(rules.rules(), &outcomes);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn unavailable_only_rules_are_skipped(idx in 0usize..6) {
        let rules = all_kinds();
        let rule = &rules[idx];
        let outcomes: Vec<QueryOutcome> = checks::translate(rule)
            .iter()
            .map(|_| QueryOutcome::Unavailable(QueryFailure::Timeout { limit: Duration::from_secs(1) }))
            .collect();
        let eval = evaluate_rule(rule, &outcomes, Vec::new());
        prop_assert_eq!(eval.status, govguard_types::RuleStatus::Skipped);
        prop_assert!(eval.violations.is_empty());
    }
}
