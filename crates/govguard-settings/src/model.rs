use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `govguard.toml` schema v1.
///
/// Every key is optional; anything left out falls back to the built-in defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GovguardConfigV1 {
    /// Optional schema string for tooling (`govguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Path to the rules file, relative to the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<String>,

    /// Exit with status 2 when at least one rule is violated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on_violation: Option<bool>,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    /// Data-quality checkpoints. When absent, the default checkpoints are reported as skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkpoints: Option<Vec<CheckpointConfig>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Query client executable (`hive` by default).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Leading arguments passed before `-e <query>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,

    /// Database every query is scoped to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    /// Per-query timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Maximum number of rules evaluated at the same time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CheckpointConfig {
    pub name: String,

    /// Query returning offending rows; the checkpoint passes when it returns none.
    /// Without a query the checkpoint is reported as skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}
