//! Report serialization and rendering.

use anyhow::Context;
use govguard_types::{ComplianceReport, SCHEMA_REPORT_V1};

pub fn serialize_report(report: &ComplianceReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn parse_report_json(text: &str) -> anyhow::Result<ComplianceReport> {
    let report: ComplianceReport = serde_json::from_str(text).context("parse report json")?;
    if report.schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {}", report.schema);
    }
    Ok(report)
}

pub fn render_log(report: &ComplianceReport) -> String {
    govguard_render::render_log(report)
}

pub fn render_markdown(report: &ComplianceReport) -> String {
    govguard_render::render_markdown(report)
}
