//! Data-quality checkpoints reported next to the compliance rules.

use govguard_domain::model::{Query, QueryOutcome};
use govguard_settings::CheckpointSpec;
use govguard_store::QueryExecutor;
use govguard_types::{CheckpointResult, CheckpointStatus};

/// Run each checkpoint's query: no rows passes, rows or an unavailable result fails.
/// A checkpoint without a query is skipped.
pub(crate) async fn run_checkpoints(
    executor: &QueryExecutor,
    specs: &[CheckpointSpec],
) -> Vec<CheckpointResult> {
    let mut results = Vec::with_capacity(specs.len());
    for spec in specs {
        let mut log = Vec::new();
        let status = match &spec.query {
            None => CheckpointStatus::Skipped,
            Some(sql) => {
                let outcome = executor
                    .execute(&Query::labeled(spec.name.clone(), sql.clone()), &mut log)
                    .await;
                match outcome {
                    QueryOutcome::Rows(rows) if rows.is_empty() => CheckpointStatus::Passed,
                    QueryOutcome::Rows(rows) => {
                        tracing::warn!(checkpoint = %spec.name, rows = rows.row_count(), "checkpoint found offending rows");
                        CheckpointStatus::Failed
                    }
                    QueryOutcome::Unavailable(failure) => {
                        tracing::warn!(checkpoint = %spec.name, error = %failure, "checkpoint query unavailable");
                        CheckpointStatus::Failed
                    }
                }
            }
        };
        tracing::info!(checkpoint = %spec.name, status = status.label(), "checkpoint finished");
        results.push(CheckpointResult {
            name: spec.name.clone(),
            status,
            log: log.iter().map(|line| line.render()).collect(),
        });
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use govguard_domain::model::QueryResult;
    use govguard_store::InMemoryStore;
    use std::sync::Arc;
    use std::time::Duration;

    fn spec(name: &str, query: Option<&str>) -> CheckpointSpec {
        CheckpointSpec {
            name: name.to_string(),
            query: query.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn statuses_follow_query_results() {
        let store = InMemoryStore::new()
            .with_rows(
                "FROM grades",
                QueryResult::from_cells(vec!["grade".into()], vec![vec![None]]),
            )
            .with_failure("FROM enrolments", Some(1), "boom");
        let executor = QueryExecutor::new(Arc::new(store), Duration::from_secs(5));

        let results = run_checkpoints(
            &executor,
            &[
                spec("student_checkpoint", Some("SELECT * FROM students WHERE email IS NULL")),
                spec("grades_checkpoint", Some("SELECT * FROM grades WHERE grade IS NULL")),
                spec("enrolment_checkpoint", Some("SELECT * FROM enrolments")),
                spec("course_checkpoint", None),
            ],
        )
        .await;

        let statuses: Vec<CheckpointStatus> = results.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                CheckpointStatus::Passed,
                CheckpointStatus::Failed,
                CheckpointStatus::Failed,
                CheckpointStatus::Skipped,
            ]
        );
        assert_eq!(
            results[2].log,
            vec![
                "[QUERY] Executing: SELECT * FROM enrolments...".to_string(),
                "[ERROR] Query failed with code 1: boom".to_string(),
            ]
        );
        assert!(results[3].log.is_empty());
    }

    #[tokio::test]
    async fn hung_and_failed_checkpoints_keep_their_log_lines() {
        let store = InMemoryStore::new()
            .with_hang("FROM students")
            .with_failure("FROM grades", Some(64), "FAILED: SemanticException Table not found 'grades'");
        let executor = QueryExecutor::new(Arc::new(store), Duration::from_millis(50));

        let results = run_checkpoints(
            &executor,
            &[
                spec("student_checkpoint", Some("SELECT * FROM students WHERE email IS NULL")),
                spec("grades_checkpoint", Some("SELECT * FROM grades WHERE grade IS NULL")),
            ],
        )
        .await;

        assert_eq!(results[0].status, CheckpointStatus::Failed);
        assert_eq!(results[0].log[1], "[TIMEOUT] Query timed out after 50ms.");
        assert_eq!(results[1].status, CheckpointStatus::Failed);
        assert_eq!(
            results[1].log[1],
            "[ERROR] Query failed with code 64: FAILED: SemanticException Table not found 'grades'"
        );
    }
}
