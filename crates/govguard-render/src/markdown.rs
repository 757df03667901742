use govguard_types::{ComplianceReport, RuleStatus};

pub fn render_markdown(report: &ComplianceReport) -> String {
    let mut out = String::new();

    out.push_str("# Govguard compliance report\n\n");
    let verdict = if report.summary.rules_violated > 0 {
        "VIOLATED"
    } else {
        "COMPLIANT"
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Rules: {} total, {} violated, {} skipped\n- Violations: {}\n\n",
        verdict,
        report.summary.rules_total,
        report.summary.rules_violated,
        report.summary.rules_skipped,
        report.summary.violations_total
    ));

    if !report.checkpoints.is_empty() {
        out.push_str("## Data-quality checkpoints\n\n");
        for cp in &report.checkpoints {
            out.push_str(&format!("- `{}`: {}\n", cp.name, cp.status.label()));
        }
        out.push('\n');
    }

    if !report.rules.is_empty() {
        out.push_str("## Rules\n\n| Rule | Kind | Table | Status |\n|---|---|---|---|\n");
        for r in &report.rules {
            let status = match r.status {
                RuleStatus::Clean => "clean",
                RuleStatus::Violated => "**violated**",
                RuleStatus::Skipped => "skipped",
            };
            out.push_str(&format!(
                "| {} | `{}` | `{}` | {} |\n",
                escape_cell(&r.name),
                r.rule_id,
                r.table,
                status
            ));
        }
        out.push('\n');
    }

    if report.violations.is_empty() {
        out.push_str("No violations.\n");
        return out;
    }

    out.push_str("## Violations\n\n");
    for v in &report.violations {
        out.push_str(&format!("- `{}`: {}\n", v.rule_id, v.message));
    }

    out
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
