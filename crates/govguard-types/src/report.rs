use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Stable schema identifier for govguard reports.
pub const SCHEMA_REPORT_V1: &str = "govguard.report.v1";

/// A single reported breach of one rule against current data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Violation {
    /// Rule kind ID (see [`crate::ids`]).
    pub rule_id: String,
    pub message: String,
    /// Number of offending items. Zero is allowed for presence/absence style violations.
    pub count: u64,

    /// Rule-specific structured payload (kept open-ended for forward compatibility).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    /// Every query returned and no violation was found.
    Clean,
    Violated,
    /// No result was available (timeout or query failure); the check did not run.
    Skipped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CheckpointStatus {
    Passed,
    Failed,
    Skipped,
}

impl CheckpointStatus {
    /// Status word used on `[DQ]` lines.
    pub fn label(self) -> &'static str {
        match self {
            CheckpointStatus::Passed => "OK",
            CheckpointStatus::Failed => "FAILED",
            CheckpointStatus::Skipped => "SKIPPED",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CheckpointResult {
    pub name: String,
    pub status: CheckpointStatus,
    /// Dashboard log lines from the checkpoint's query, if it ran one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub log: Vec<String>,
}

/// Per-rule outcome, in rule-definition order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleRecord {
    pub rule_id: String,
    pub name: String,
    pub table: String,
    pub status: RuleStatus,
    /// Dashboard log lines produced while evaluating this rule (`[QUERY]`, `[ERROR]`, ...).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub log: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ComplianceSummary {
    pub rules_total: u32,
    pub rules_violated: u32,
    pub rules_skipped: u32,
    pub violations_total: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// The JSON report envelope written by `govguard check --report-out`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComplianceReport {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub summary: ComplianceSummary,
    pub checkpoints: Vec<CheckpointResult>,
    pub rules: Vec<RuleRecord>,
    pub violations: Vec<Violation>,
}
