use govguard_domain::model::QueryResult;

const NULL_LITERAL: &str = "NULL";

/// Parse client output: a header line of tab-separated column names, then one row per
/// non-blank line.
///
/// Output with fewer than two lines has no data rows and parses as an empty result. Cells
/// spelled `NULL` become null; missing trailing cells are null too, surplus cells are dropped.
pub fn parse_tabular_output(stdout: &str) -> QueryResult {
    let trimmed = stdout.trim_matches(|c| c == '\n' || c == '\r');
    let mut lines = trimmed.lines();

    let Some(header) = lines.next().filter(|h| !h.trim().is_empty()) else {
        return QueryResult::empty();
    };
    let columns: Vec<String> = header
        .split('\t')
        .map(|c| c.trim().to_string())
        .collect();

    let cells = lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.trim_end_matches('\r')
                .split('\t')
                .take(columns.len())
                .map(|cell| (cell != NULL_LITERAL).then(|| cell.to_string()))
                .collect()
        })
        .collect();

    QueryResult::from_cells(columns, cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn header_then_rows() {
        let result = parse_tabular_output("student_id\tGPA\nS0001\t4.3\nS0002\t-0.1\n");
        assert_eq!(result.columns(), ["student_id", "GPA"]);
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.rows()[1]["GPA"].as_deref(), Some("-0.1"));
    }

    #[test]
    fn header_only_is_empty() {
        let result = parse_tabular_output("student_id\tcnt\n");
        assert!(result.is_empty());
        assert_eq!(result.columns(), ["student_id", "cnt"]);
    }

    #[test]
    fn blank_output_is_empty() {
        assert!(parse_tabular_output("").is_empty());
        assert!(parse_tabular_output("\n\n").is_empty());
    }

    #[test]
    fn blank_lines_are_ignored() {
        let result = parse_tabular_output("nulls\n\n3\n   \n");
        assert_eq!(result.row_count(), 1);
        assert_eq!(result.first_value("nulls"), Some("3"));
    }

    #[test]
    fn null_literal_and_short_rows_become_null() {
        let result = parse_tabular_output("a\tb\tc\nNULL\tx\n");
        let row = &result.rows()[0];
        assert_eq!(row["a"], None);
        assert_eq!(row["b"].as_deref(), Some("x"));
        assert_eq!(row["c"], None);
    }

    #[test]
    fn crlf_output_is_accepted() {
        let result = parse_tabular_output("nulls\r\n5\r\n");
        assert_eq!(result.first_value("nulls"), Some("5"));
    }

    proptest! {
        #[test]
        fn never_panics(text in ".*") {
            let _ = parse_tabular_output(&text);
        }

        #[test]
        fn row_count_matches_non_blank_body_lines(
            body in prop::collection::vec("[a-z0-9]{1,8}(\t[a-z0-9]{1,8}){0,2}", 0..10),
        ) {
            let text = format!("c1\tc2\tc3\n{}", body.join("\n"));
            prop_assert_eq!(parse_tabular_output(&text).row_count(), body.len());
        }
    }
}
