use crate::runlog::LogLine;
use govguard_types::{CheckpointResult, ComplianceSummary, RuleRecord, RuleStatus, Violation};

/// Result of evaluating one rule; written into that rule's slot.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleEvaluation {
    pub status: RuleStatus,
    pub violations: Vec<Violation>,
    pub log: Vec<LogLine>,
}

impl RuleEvaluation {
    /// Evaluation for a rule whose slot was never filled.
    pub fn unavailable(rule_name: &str) -> Self {
        Self {
            status: RuleStatus::Skipped,
            violations: Vec::new(),
            log: vec![skipped_line(rule_name)],
        }
    }
}

pub(crate) fn skipped_line(rule_name: &str) -> LogLine {
    LogLine::info(format!("{rule_name}: no result available, check skipped."))
}

#[derive(Clone, Debug, PartialEq)]
pub struct DomainReport {
    pub summary: ComplianceSummary,
    pub checkpoints: Vec<CheckpointResult>,
    /// One record per rule, in rule-definition order.
    pub rules: Vec<RuleRecord>,
    /// All violations, grouped by rule in rule-definition order.
    pub violations: Vec<Violation>,
}
