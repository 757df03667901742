//! The `check` use case: load rules, query the store, evaluate, and produce a report.

use anyhow::Context;
use camino::Utf8Path;
use futures::{StreamExt, stream};
use govguard_domain::checks;
use govguard_domain::model::RuleSet;
use govguard_domain::report::{DomainReport, RuleEvaluation};
use govguard_settings::{Overrides, ResolvedConfig};
use govguard_store::{HiveCliStore, QueryExecutor, TabularStore};
use govguard_types::{ComplianceReport, SCHEMA_REPORT_V1, ToolMeta};
use std::sync::Arc;
use time::OffsetDateTime;

use crate::checkpoints::run_checkpoints;

/// Input for the check use case.
#[derive(Clone)]
pub struct CheckInput<'a> {
    /// Directory relative paths in the config (the rules file) are resolved against.
    pub base_dir: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Store to query instead of the configured client.
    pub store: Option<Arc<dyn TabularStore>>,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: ComplianceReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case.
///
/// Config and rule errors abort before any query runs. Query failures do not: they show up as
/// skipped rules and log lines in the report.
pub async fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        govguard_settings::GovguardConfigV1::default()
    } else {
        govguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let resolved =
        govguard_settings::resolve_config(cfg, input.overrides.clone()).context("resolve config")?;

    let rules_path = input.base_dir.join(&resolved.rules_path);
    let rules_text = std::fs::read_to_string(&rules_path)
        .with_context(|| format!("read rules file: {rules_path}"))?;
    let rules = govguard_settings::parse_rules_yaml(&rules_text)
        .with_context(|| format!("load rules from {rules_path}"))?;
    tracing::info!(rules = rules.len(), path = %rules_path, "loaded compliance rules");

    let store = input.store.clone().unwrap_or_else(|| {
        Arc::new(HiveCliStore::new(
            resolved.store.command.clone(),
            resolved.store.args.clone(),
            resolved.store.database.clone(),
        ))
    });
    let executor = QueryExecutor::new(store, resolved.store.timeout);

    let slots = evaluate_rules(&rules, &executor, resolved.concurrency).await;
    let checkpoints = run_checkpoints(&executor, &resolved.checkpoints).await;

    let DomainReport {
        summary,
        checkpoints,
        rules: records,
        violations,
    } = govguard_domain::aggregate(&rules, slots, checkpoints);

    tracing::info!(
        violated = summary.rules_violated,
        skipped = summary.rules_skipped,
        total = summary.rules_total,
        "compliance evaluation finished"
    );

    let report = ComplianceReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "govguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        summary,
        checkpoints,
        rules: records,
        violations,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Evaluate every rule with at most `concurrency` rules in flight.
///
/// Results land in the slot of the rule's position, so completion order never leaks into
/// the report.
async fn evaluate_rules(
    rules: &RuleSet,
    executor: &QueryExecutor,
    concurrency: usize,
) -> Vec<Option<RuleEvaluation>> {
    let mut slots: Vec<Option<RuleEvaluation>> = vec![None; rules.len()];

    let mut pending = stream::iter(rules.iter().enumerate().map(|(idx, rule)| async move {
        let queries = checks::translate(rule);
        let (outcomes, log) = executor.execute_all(&queries).await;
        (idx, govguard_domain::evaluate_rule(rule, &outcomes, log))
    }))
    .buffer_unordered(concurrency.max(1));

    while let Some((idx, evaluation)) = pending.next().await {
        tracing::debug!(
            rule = %rules.rules()[idx].name,
            status = ?evaluation.status,
            violations = evaluation.violations.len(),
            "rule evaluated"
        );
        slots[idx] = Some(evaluation);
    }

    slots
}

/// Exit code for a finished run: 0, or 2 when `fail_on_violation` is set and a rule was violated.
pub fn verdict_exit_code(report: &ComplianceReport, fail_on_violation: bool) -> i32 {
    if fail_on_violation && report.summary.rules_violated > 0 {
        2
    } else {
        0
    }
}
