use crate::checks;
use crate::model::{QueryOutcome, RuleDefinition, RuleSet};
use crate::report::{skipped_line, DomainReport, RuleEvaluation};
use crate::runlog::LogLine;
use govguard_types::{CheckpointResult, ComplianceSummary, RuleRecord, RuleStatus};

/// Evaluate one rule from the outcomes of the queries [`checks::translate`] produced for it.
///
/// `log` carries the executor's lines for this rule; a skipped rule gets an extra `[INFO]` line
/// so it reads differently from a clean pass.
pub fn evaluate_rule(
    rule: &RuleDefinition,
    outcomes: &[QueryOutcome],
    mut log: Vec<LogLine>,
) -> RuleEvaluation {
    let mut violations = Vec::new();
    checks::evaluate(rule, outcomes, &mut violations);

    let status = if !violations.is_empty() {
        RuleStatus::Violated
    } else if outcomes.is_empty() || outcomes.iter().any(QueryOutcome::is_unavailable) {
        RuleStatus::Skipped
    } else {
        RuleStatus::Clean
    };

    if status == RuleStatus::Skipped {
        log.push(skipped_line(&rule.name));
    }

    RuleEvaluation {
        status,
        violations,
        log,
    }
}

/// Assemble the report from per-rule slots indexed by rule position.
///
/// Slot order, not completion order, decides report order. An empty slot counts as skipped.
pub fn aggregate(
    rules: &RuleSet,
    slots: Vec<Option<RuleEvaluation>>,
    checkpoints: Vec<CheckpointResult>,
) -> DomainReport {
    let mut slots = slots.into_iter();
    let mut records = Vec::with_capacity(rules.len());
    let mut violations = Vec::new();
    let mut summary = ComplianceSummary {
        rules_total: rules.len() as u32,
        ..ComplianceSummary::default()
    };

    for rule in rules.iter() {
        let evaluation = slots
            .next()
            .flatten()
            .unwrap_or_else(|| RuleEvaluation::unavailable(&rule.name));

        match evaluation.status {
            RuleStatus::Violated => summary.rules_violated += 1,
            RuleStatus::Skipped => summary.rules_skipped += 1,
            RuleStatus::Clean => {}
        }
        summary.violations_total += evaluation.violations.len() as u32;

        records.push(RuleRecord {
            rule_id: rule.id().to_string(),
            name: rule.name.clone(),
            table: rule.table.clone(),
            status: evaluation.status,
            log: evaluation.log.iter().map(LogLine::render).collect(),
        });
        violations.extend(evaluation.violations);
    }

    DomainReport {
        summary,
        checkpoints,
        rules: records,
        violations,
    }
}
