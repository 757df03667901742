use govguard_types::{ComplianceReport, ids};

pub const SUMMARY_HEADER: &str = "==== COMPLIANCE SUMMARY ====";
pub const SUMMARY_FOOTER: &str = "=============================";

/// Render the full dashboard log: every rule's lines in rule order, then checkpoint query
/// lines, then the summary block.
pub fn render_log(report: &ComplianceReport) -> String {
    let mut out = String::new();
    let rule_lines = report.rules.iter().flat_map(|r| &r.log);
    let checkpoint_lines = report.checkpoints.iter().flat_map(|c| &c.log);
    for line in rule_lines.chain(checkpoint_lines) {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&render_summary(report));
    out
}

/// The summary block alone: `[DQ]` lines, `[ALERT]` lines, then `[SUMMARY]`.
pub fn render_summary(report: &ComplianceReport) -> String {
    let mut out = String::new();
    out.push_str(SUMMARY_HEADER);
    out.push('\n');

    for cp in &report.checkpoints {
        out.push_str(&format!(
            "{} {}: {}\n",
            ids::PREFIX_DQ,
            cp.name,
            cp.status.label()
        ));
    }
    for v in &report.violations {
        out.push_str(&format!("{} {}\n", ids::PREFIX_ALERT, v.message));
    }
    out.push_str(&format!(
        "{} {} of {} compliance rules violated.\n",
        ids::PREFIX_SUMMARY,
        report.summary.rules_violated,
        report.summary.rules_total
    ));

    out.push_str(SUMMARY_FOOTER);
    out.push('\n');
    out
}
