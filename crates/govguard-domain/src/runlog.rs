//! Dashboard log lines captured per rule.
//!
//! The compliance dashboard parses the run output line by line, so every line is a single
//! physical line starting with a stable prefix.

use govguard_types::ids;
use std::time::Duration;

/// Maximum number of SQL characters echoed on a `[QUERY]` line.
pub const QUERY_ECHO_CHARS: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogKind {
    Query,
    Error,
    Timeout,
    Info,
}

impl LogKind {
    pub fn prefix(self) -> &'static str {
        match self {
            LogKind::Query => ids::PREFIX_QUERY,
            LogKind::Error => ids::PREFIX_ERROR,
            LogKind::Timeout => ids::PREFIX_TIMEOUT,
            LogKind::Info => ids::PREFIX_INFO,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogLine {
    pub kind: LogKind,
    pub text: String,
}

impl LogLine {
    /// `[QUERY] Executing: <sql>...` with the SQL collapsed and truncated.
    pub fn query(sql: &str) -> Self {
        let collapsed = collapse_whitespace(sql);
        let echoed: String = collapsed.chars().take(QUERY_ECHO_CHARS).collect();
        Self {
            kind: LogKind::Query,
            text: format!("Executing: {echoed}..."),
        }
    }

    pub fn error(code: Option<i32>, diagnostic: &str) -> Self {
        let diagnostic = collapse_whitespace(diagnostic);
        let text = match code {
            Some(code) => format!("Query failed with code {code}: {diagnostic}"),
            None => format!("Query failed: {diagnostic}"),
        };
        Self {
            kind: LogKind::Error,
            text,
        }
    }

    /// `limit` prints in its natural unit: `180s`, `1.5s`, `50ms`.
    pub fn timeout(limit: Duration) -> Self {
        Self {
            kind: LogKind::Timeout,
            text: format!("Query timed out after {limit:?}."),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: LogKind::Info,
            text: text.into(),
        }
    }

    pub fn render(&self) -> String {
        format!("{} {}", self.kind.prefix(), self.text)
    }
}

/// Fold all whitespace runs (newlines included) into single spaces.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
