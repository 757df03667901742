//! Use case orchestration for govguard.
//!
//! This crate provides the application layer: use cases that coordinate the settings, store,
//! domain, and render layers. The CLI crate depends on this; it only handles argument parsing
//! and file output.

#![forbid(unsafe_code)]

mod check;
mod checkpoints;
mod explain;
mod render;

pub use check::{CheckInput, CheckOutput, run_check, verdict_exit_code};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use render::{parse_report_json, render_log, render_markdown, serialize_report};
