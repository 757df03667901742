use crate::{StoreError, TabularStore};
use govguard_domain::model::{Query, QueryFailure, QueryOutcome};
use govguard_domain::runlog::LogLine;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Runs translated queries against a store with a per-query time limit.
///
/// Every query gets a `[QUERY]` line; failures and timeouts add an `[ERROR]` or `[TIMEOUT]` line
/// and come back as [`QueryOutcome::Unavailable`]. Nothing here returns an error.
#[derive(Clone)]
pub struct QueryExecutor {
    store: Arc<dyn TabularStore>,
    timeout: Duration,
}

impl QueryExecutor {
    pub fn new(store: Arc<dyn TabularStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn execute(&self, query: &Query, log: &mut Vec<LogLine>) -> QueryOutcome {
        log.push(LogLine::query(&query.sql));
        tracing::debug!(label = ?query.label, sql = %query.sql, "executing query");

        let started = Instant::now();
        let result = tokio::time::timeout(self.timeout, self.store.query(&query.sql)).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(Ok(rows)) => {
                tracing::debug!(rows = rows.row_count(), elapsed_ms, "query finished");
                QueryOutcome::Rows(rows)
            }
            Ok(Err(StoreError::Failed { code, diagnostic })) => {
                tracing::warn!(?code, elapsed_ms, diagnostic = %diagnostic, "query failed");
                log.push(LogLine::error(code, &diagnostic));
                QueryOutcome::Unavailable(QueryFailure::QueryFailed { code, diagnostic })
            }
            Ok(Err(e @ StoreError::Launch { .. })) => {
                let diagnostic = e.to_string();
                tracing::error!(error = %e, "store client could not be started");
                log.push(LogLine::error(None, &diagnostic));
                QueryOutcome::Unavailable(QueryFailure::QueryFailed {
                    code: None,
                    diagnostic,
                })
            }
            Err(_) => {
                let limit = self.timeout;
                tracing::warn!(timeout_ms = limit.as_millis() as u64, "query timed out");
                log.push(LogLine::timeout(limit));
                QueryOutcome::Unavailable(QueryFailure::Timeout { limit })
            }
        }
    }

    /// Run one rule's queries in order, collecting their outcomes and log lines.
    pub async fn execute_all(&self, queries: &[Query]) -> (Vec<QueryOutcome>, Vec<LogLine>) {
        let mut log = Vec::new();
        let mut outcomes = Vec::with_capacity(queries.len());
        for query in queries {
            outcomes.push(self.execute(query, &mut log).await);
        }
        (outcomes, log)
    }
}
