//! Stable DTOs and IDs used across the govguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted compliance report
//! - stable string IDs for rule kinds and log prefixes
//! - explain registry for rule-kind documentation

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod report;

pub use explain::{lookup_explanation, Explanation};
pub use report::{
    CheckpointResult, CheckpointStatus, ComplianceReport, ComplianceSummary, RuleRecord,
    RuleStatus, ToolMeta, Violation, SCHEMA_REPORT_V1,
};
