use crate::{StoreError, TabularStore};
use async_trait::async_trait;
use govguard_domain::model::QueryResult;
use std::sync::Mutex;

#[derive(Clone, Debug)]
enum Response {
    Rows(QueryResult),
    Fail { code: Option<i32>, diagnostic: String },
    Hang,
}

/// Store backed by canned responses, matched by SQL substring in registration order.
///
/// Unmatched queries return an empty result. Every query received is recorded.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    responses: Vec<(String, Response)>,
    received: Mutex<Vec<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer queries containing `needle` with `result`.
    pub fn with_rows(mut self, needle: impl Into<String>, result: QueryResult) -> Self {
        self.responses.push((needle.into(), Response::Rows(result)));
        self
    }

    /// Fail queries containing `needle` as a client exiting with `code`.
    pub fn with_failure(
        mut self,
        needle: impl Into<String>,
        code: Option<i32>,
        diagnostic: impl Into<String>,
    ) -> Self {
        self.responses.push((
            needle.into(),
            Response::Fail {
                code,
                diagnostic: diagnostic.into(),
            },
        ));
        self
    }

    /// Never answer queries containing `needle`.
    pub fn with_hang(mut self, needle: impl Into<String>) -> Self {
        self.responses.push((needle.into(), Response::Hang));
        self
    }

    /// SQL of every query received so far, in arrival order.
    pub fn received(&self) -> Vec<String> {
        self.received
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn lookup(&self, sql: &str) -> Option<&Response> {
        self.responses
            .iter()
            .find(|(needle, _)| sql.contains(needle.as_str()))
            .map(|(_, r)| r)
    }
}

#[async_trait]
impl TabularStore for InMemoryStore {
    async fn query(&self, sql: &str) -> Result<QueryResult, StoreError> {
        if let Ok(mut received) = self.received.lock() {
            received.push(sql.to_string());
        }

        match self.lookup(sql) {
            None => Ok(QueryResult::empty()),
            Some(Response::Rows(result)) => Ok(result.clone()),
            Some(Response::Fail { code, diagnostic }) => Err(StoreError::Failed {
                code: *code,
                diagnostic: diagnostic.clone(),
            }),
            Some(Response::Hang) => std::future::pending().await,
        }
    }
}
