//! Rendering for the compliance dashboard log and Markdown summaries.

#![forbid(unsafe_code)]

mod log;
mod markdown;

pub use log::{SUMMARY_FOOTER, SUMMARY_HEADER, render_log, render_summary};
pub use markdown::render_markdown;
