//! Developer tasks (schema generation, report conformance, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root (parent of the xtask directory).
fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(govguard_types::ComplianceReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(govguard_settings::GovguardConfigV1)
}

fn generate_rules_schema() -> schemars::Schema {
    schema_for!(govguard_settings::RulesFileV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "govguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "govguard.config.v1.json",
            generate: generate_config_schema,
        },
        SchemaSpec {
            filename: "govguard.rules.v1.json",
            generate: generate_rules_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas/ matches what would be generated (for CI).
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut stale = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        let expected = serialize_schema(&(spec.generate)())?;
        match fs::read_to_string(&path) {
            Ok(actual) if actual == expected => {}
            Ok(_) => stale.push(format!("{} (out of date)", spec.filename)),
            Err(_) => stale.push(format!("{} (missing)", spec.filename)),
        }
    }

    if stale.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    for name in &stale {
        eprintln!("  - {}", name);
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Validate a report written by `govguard check --report-out` against the report schema.
fn conform(report_path: &Path) -> anyhow::Result<()> {
    let text = fs::read_to_string(report_path)
        .with_context(|| format!("Failed to read {}", report_path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).context("Failed to parse report as JSON")?;

    let errors = report_schema_errors(&value)?;
    if errors.is_empty() {
        println!("✓ {} conforms to govguard.report.v1", report_path.display());
        return Ok(());
    }
    for err in &errors {
        eprintln!("  - {}", err);
    }
    bail!("Report conformance failed with {} errors", errors.len())
}

fn report_schema_errors(report: &serde_json::Value) -> anyhow::Result<Vec<String>> {
    let schema = serde_json::to_value(generate_report_schema()).context("schema to json")?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile schema: {}", e))?;

    let mut errors: Vec<String> = validator
        .iter_errors(report)
        .map(|e| format!("schema validation: {e}"))
        .collect();

    if report.get("schema").and_then(|v| v.as_str()) != Some(govguard_types::SCHEMA_REPORT_V1) {
        errors.push(format!(
            "schema field must be {}",
            govguard_types::SCHEMA_REPORT_V1
        ));
    }
    Ok(errors)
}

/// Every rule kind must have a complete explanation.
fn explain_coverage() -> anyhow::Result<()> {
    let kinds = govguard_types::explain::all_rule_kinds();
    let mut errors = Vec::new();

    for kind in kinds {
        match govguard_types::lookup_explanation(kind) {
            Some(exp) => {
                for (field, value) in [
                    ("title", exp.title),
                    ("description", exp.description),
                    ("parameters", exp.parameters),
                    ("example", exp.example),
                ] {
                    if value.trim().is_empty() {
                        errors.push(format!("Rule kind '{}' has empty {}", kind, field));
                    }
                }
                if !exp.example.contains(&format!("id: {kind}")) {
                    errors.push(format!("Rule kind '{}' example does not use its id", kind));
                }
            }
            None => errors.push(format!("Rule kind '{}' has no explanation", kind)),
        }
    }

    if errors.is_empty() {
        println!("✓ {} rule kinds have explanations", kinds.len());
        return Ok(());
    }
    for error in &errors {
        eprintln!("  - {}", error);
    }
    bail!(
        "Explain coverage validation failed with {} errors",
        errors.len()
    )
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help                Show this message");
    eprintln!("  emit-schemas        Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas    Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids    Print known schema IDs");
    eprintln!("  conform <report>    Validate a govguard JSON report against its schema");
    eprintln!("  explain-coverage    Validate all rule kinds have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => match args.get(2) {
            Some(path) => conform(Path::new(path)),
            None => bail!("usage: cargo xtask conform <report.json>"),
        },
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use govguard_types::{
        CheckpointResult, CheckpointStatus, ComplianceReport, ComplianceSummary, RuleRecord,
        RuleStatus, SCHEMA_REPORT_V1, ToolMeta, Violation,
    };
    use time::OffsetDateTime;

    fn sample_report() -> ComplianceReport {
        ComplianceReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "govguard".to_string(),
                version: "0.1.0".to_string(),
            },
            started_at: OffsetDateTime::UNIX_EPOCH,
            finished_at: OffsetDateTime::UNIX_EPOCH,
            summary: ComplianceSummary {
                rules_total: 1,
                rules_violated: 1,
                rules_skipped: 0,
                violations_total: 1,
            },
            checkpoints: vec![CheckpointResult {
                name: "student_checkpoint".to_string(),
                status: CheckpointStatus::Skipped,
                log: Vec::new(),
            }],
            rules: vec![RuleRecord {
                rule_id: "gpa_outlier_check".to_string(),
                name: "GPA Range".to_string(),
                table: "grades".to_string(),
                status: RuleStatus::Violated,
                log: Vec::new(),
            }],
            violations: vec![Violation {
                rule_id: "gpa_outlier_check".to_string(),
                message: "GPA Range found 2 GPA outliers.".to_string(),
                count: 2,
                data: serde_json::json!({ "table": "grades" }),
            }],
        }
    }

    #[test]
    fn generated_report_conforms_to_schema() {
        let value = serde_json::to_value(sample_report()).expect("serialize");
        let errors = report_schema_errors(&value).expect("validate");
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn report_with_unknown_status_is_rejected() {
        let mut value = serde_json::to_value(sample_report()).expect("serialize");
        value["rules"][0]["status"] = serde_json::json!("maybe");
        assert!(!report_schema_errors(&value).expect("validate").is_empty());
    }

    #[test]
    fn explain_coverage_passes() {
        explain_coverage().expect("all rule kinds explained");
    }

    #[test]
    fn schemas_serialize_with_trailing_newline() {
        for spec in schema_specs() {
            let json = serialize_schema(&(spec.generate)()).expect("serialize");
            assert!(json.ends_with("}\n"), "{}", spec.filename);
        }
    }
}
