use crate::{defaults, model::GovguardConfigV1};
use anyhow::Context;
use govguard_domain::model::is_valid_identifier;
use std::collections::BTreeSet;
use std::time::Duration;

/// Command-line overrides; each wins over the config file when set.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub rules: Option<String>,
    pub database: Option<String>,
    pub timeout_secs: Option<u64>,
    pub concurrency: Option<usize>,
}

/// Everything the tabular-store adapter needs; passed to its constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreSettings {
    pub command: String,
    pub args: Vec<String>,
    pub database: String,
    pub timeout: Duration,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckpointSpec {
    pub name: String,
    pub query: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub rules_path: String,
    pub store: StoreSettings,
    pub concurrency: usize,
    pub checkpoints: Vec<CheckpointSpec>,
    pub fail_on_violation: bool,
}

pub fn resolve_config(
    cfg: GovguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let rules_path = overrides
        .rules
        .or(cfg.rules)
        .unwrap_or_else(|| defaults::RULES_PATH.to_string());

    let command = cfg
        .store
        .command
        .unwrap_or_else(|| defaults::STORE_COMMAND.to_string());
    if command.trim().is_empty() {
        anyhow::bail!("store.command must not be empty");
    }

    let database = overrides
        .database
        .or(cfg.store.database)
        .unwrap_or_else(|| defaults::DATABASE.to_string());
    if !is_valid_identifier(&database) {
        anyhow::bail!("invalid database name: {database:?} (expected a plain identifier)");
    }

    let timeout = match overrides.timeout_secs.or(cfg.store.timeout_secs) {
        Some(0) => anyhow::bail!("timeout_secs must be greater than zero"),
        Some(secs) => Duration::from_secs(secs),
        None => defaults::QUERY_TIMEOUT,
    };

    let concurrency = match overrides.concurrency.or(cfg.engine.concurrency) {
        Some(0) => anyhow::bail!("concurrency must be at least 1"),
        Some(n) => n,
        None => defaults::CONCURRENCY,
    };

    let checkpoints: Vec<CheckpointSpec> = match cfg.checkpoints {
        Some(list) => list
            .into_iter()
            .map(|c| CheckpointSpec {
                name: c.name,
                query: c.query.filter(|q| !q.trim().is_empty()),
            })
            .collect(),
        None => defaults::CHECKPOINTS
            .iter()
            .map(|name| CheckpointSpec {
                name: name.to_string(),
                query: None,
            })
            .collect(),
    };
    validate_checkpoints(&checkpoints).context("invalid checkpoints")?;

    Ok(ResolvedConfig {
        rules_path,
        store: StoreSettings {
            command,
            args: cfg.store.args.unwrap_or_default(),
            database,
            timeout,
        },
        concurrency,
        checkpoints,
        fail_on_violation: cfg.fail_on_violation.unwrap_or(false),
    })
}

fn validate_checkpoints(checkpoints: &[CheckpointSpec]) -> anyhow::Result<()> {
    let mut seen = BTreeSet::new();
    for cp in checkpoints {
        // The dashboard splits `[DQ] <name>: <status>` on whitespace and ':'.
        if !is_valid_identifier(&cp.name) {
            anyhow::bail!("checkpoint name {:?} must be a plain identifier", cp.name);
        }
        if !seen.insert(cp.name.as_str()) {
            anyhow::bail!("duplicate checkpoint name: {}", cp.name);
        }
    }
    Ok(())
}
