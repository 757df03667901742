//! Built-in defaults, matching the reference pipeline deployment.

use std::time::Duration;

pub const RULES_PATH: &str = "compliance_rules/rules.yaml";
pub const STORE_COMMAND: &str = "hive";
pub const DATABASE: &str = "university_data";
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(180);
pub const CONCURRENCY: usize = 4;

/// Checkpoints reported when the config names none. They carry no query, so they are skipped.
pub const CHECKPOINTS: &[&str] = &["student_checkpoint", "grades_checkpoint"];
