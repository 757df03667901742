//! Pure rule evaluation (no IO).
//!
//! Input: a validated rule set plus the outcome of every query the translator asked for.
//! Output: violations, per-rule status, and summary counts in rule-definition order.

#![forbid(unsafe_code)]

pub mod checks;
pub mod model;
pub mod report;
pub mod runlog;

mod engine;

pub use engine::{aggregate, evaluate_rule};

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;
