//! Tabular store adapters and the query executor.
//!
//! This crate is allowed to spawn the store's client process. Everything it returns to callers
//! is a [`QueryOutcome`](govguard_domain::model::QueryOutcome): failures never escape as errors.

#![forbid(unsafe_code)]

mod executor;
mod hive;
mod memory;
mod tsv;

use async_trait::async_trait;
use govguard_domain::model::QueryResult;

pub use executor::QueryExecutor;
pub use hive::HiveCliStore;
pub use memory::InMemoryStore;
pub use tsv::parse_tabular_output;

/// Fuzz-friendly API for exercising the output parser without a store.
pub mod fuzz {
    /// Parse arbitrary text as tab-separated client output. **Never panics** on any input.
    pub fn parse_tabular_output(text: &str) -> usize {
        super::tsv::parse_tabular_output(text).row_count()
    }
}

/// Why a store could not answer a query.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("store exited with code {code:?}: {diagnostic}")]
    Failed {
        code: Option<i32>,
        diagnostic: String,
    },
}

/// Read-only access to the governed dataset.
#[async_trait]
pub trait TabularStore: Send + Sync {
    /// Run one SQL statement and return its rows. Zero rows is `Ok`, not an error.
    async fn query(&self, sql: &str) -> Result<QueryResult, StoreError>;
}
