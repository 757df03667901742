use crate::{StoreError, TabularStore, tsv::parse_tabular_output};
use async_trait::async_trait;
use govguard_domain::model::QueryResult;
use std::process::Stdio;
use tokio::process::Command;

/// Queries the store by running its command-line client once per statement.
///
/// The statement is passed as a single argument (no shell), so nothing in the SQL is ever
/// interpreted by a shell. The child is killed if the query future is dropped, which is how the
/// executor's timeout cancels a running query.
#[derive(Clone, Debug)]
pub struct HiveCliStore {
    command: String,
    args: Vec<String>,
    database: String,
}

impl HiveCliStore {
    pub fn new(command: impl Into<String>, args: Vec<String>, database: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args,
            database: database.into(),
        }
    }

    /// Script handed to `-e`: select the database, ask for a header line, run the statement.
    pub fn script(&self, sql: &str) -> String {
        format!(
            "USE {}; set hive.cli.print.header=true; {}",
            self.database,
            sql.trim().trim_end_matches(';')
        )
    }
}

#[async_trait]
impl TabularStore for HiveCliStore {
    async fn query(&self, sql: &str) -> Result<QueryResult, StoreError> {
        let output = Command::new(&self.command)
            .args(&self.args)
            .arg("-e")
            .arg(self.script(sql))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| StoreError::Launch {
                command: self.command.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let diagnostic = match stderr.trim() {
                "" => format!("{} exited with {}", self.command, output.status),
                s => s.to_string(),
            };
            return Err(StoreError::Failed {
                code: output.status.code(),
                diagnostic,
            });
        }

        Ok(parse_tabular_output(&String::from_utf8_lossy(&output.stdout)))
    }
}
