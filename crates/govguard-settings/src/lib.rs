//! Config parsing, defaults, and rule registry loading.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration and rules provided
//! as strings.

#![forbid(unsafe_code)]

mod defaults;
mod model;
mod registry;
mod resolve;

pub use model::{CheckpointConfig, EngineConfig, GovguardConfigV1, StoreConfig};
pub use registry::{
    ConditionEntry, RegistryError, RuleEntry, RulesFileV1, ThresholdEntry, parse_rules_yaml,
};
pub use resolve::{CheckpointSpec, Overrides, ResolvedConfig, StoreSettings};

/// Parse `govguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<GovguardConfigV1> {
    let cfg: GovguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective settings used by the engine (defaults + file + overrides).
pub fn resolve_config(
    cfg: GovguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
