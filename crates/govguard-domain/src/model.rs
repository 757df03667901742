use govguard_types::ids;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// The closed set of rule kinds the engine knows how to translate and evaluate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleKind {
    ConsentRequired,
    PiiNotNullCheck,
    AccessPolicyViolation,
    GpaOutlierCheck,
    DuplicateStudentCheck,
    ConsentLogIntegrity,
}

impl RuleKind {
    pub const ALL: [RuleKind; 6] = [
        RuleKind::ConsentRequired,
        RuleKind::PiiNotNullCheck,
        RuleKind::AccessPolicyViolation,
        RuleKind::GpaOutlierCheck,
        RuleKind::DuplicateStudentCheck,
        RuleKind::ConsentLogIntegrity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::ConsentRequired => ids::RULE_CONSENT_REQUIRED,
            RuleKind::PiiNotNullCheck => ids::RULE_PII_NOT_NULL_CHECK,
            RuleKind::AccessPolicyViolation => ids::RULE_ACCESS_POLICY_VIOLATION,
            RuleKind::GpaOutlierCheck => ids::RULE_GPA_OUTLIER_CHECK,
            RuleKind::DuplicateStudentCheck => ids::RULE_DUPLICATE_STUDENT_CHECK,
            RuleKind::ConsentLogIntegrity => ids::RULE_CONSENT_LOG_INTEGRITY,
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        RuleKind::ALL.into_iter().find(|k| k.as_str() == id)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsentRequired {
    /// Boolean column that must be true.
    pub column: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PiiNotNull {
    /// Columns checked for NULLs, in rule order. Never empty.
    pub fields: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessPolicy {
    /// Audited table, matched against the log's `table_name` column as a literal.
    pub filter_table: String,
    /// Roles permitted to access `filter_table`, used as literals. Never empty.
    pub allowed_values: Vec<String>,
    pub max_violations_per_day: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GpaOutlier {
    pub column: String,
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateStudent {
    pub key_column: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsentLogIntegrity {
    pub log_table: String,
    pub key_column: String,
}

/// Kind-specific parameters, already validated by the rule registry.
#[derive(Clone, Debug, PartialEq)]
pub enum RuleCheck {
    ConsentRequired(ConsentRequired),
    PiiNotNull(PiiNotNull),
    AccessPolicy(AccessPolicy),
    GpaOutlier(GpaOutlier),
    DuplicateStudent(DuplicateStudent),
    ConsentLogIntegrity(ConsentLogIntegrity),
}

#[derive(Clone, Debug, PartialEq)]
pub struct RuleDefinition {
    pub name: String,
    /// Target table. Only ever taken from the rules file, never from data.
    pub table: String,
    pub check: RuleCheck,
}

impl RuleDefinition {
    pub fn kind(&self) -> RuleKind {
        match self.check {
            RuleCheck::ConsentRequired(_) => RuleKind::ConsentRequired,
            RuleCheck::PiiNotNull(_) => RuleKind::PiiNotNullCheck,
            RuleCheck::AccessPolicy(_) => RuleKind::AccessPolicyViolation,
            RuleCheck::GpaOutlier(_) => RuleKind::GpaOutlierCheck,
            RuleCheck::DuplicateStudent(_) => RuleKind::DuplicateStudentCheck,
            RuleCheck::ConsentLogIntegrity(_) => RuleKind::ConsentLogIntegrity,
        }
    }

    pub fn id(&self) -> &'static str {
        self.kind().as_str()
    }
}

/// Ordered, immutable set of rules loaded for one run. File order is report order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<RuleDefinition>,
}

impl RuleSet {
    pub fn new(rules: Vec<RuleDefinition>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RuleDefinition] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RuleDefinition> {
        self.rules.iter()
    }
}

/// A plain SQL identifier: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A table reference: an identifier, optionally qualified as `db.table`.
pub fn is_valid_table_name(s: &str) -> bool {
    match s.split_once('.') {
        Some((db, table)) => is_valid_identifier(db) && is_valid_identifier(table),
        None => is_valid_identifier(s),
    }
}

/// One query the translator wants executed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    /// Sub-check this query belongs to (the field name for per-field checks).
    pub label: Option<String>,
    pub sql: String,
}

impl Query {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            label: None,
            sql: sql.into(),
        }
    }

    pub fn labeled(label: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            sql: sql.into(),
        }
    }
}

/// A row maps column name to cell value; `None` is SQL NULL.
pub type Row = BTreeMap<String, Option<String>>;

/// Tabular result of a successful query. Zero rows is a valid result, distinct from failure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryResult {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl QueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a result from positional cells; missing trailing cells become NULL.
    pub fn from_cells(columns: Vec<String>, cells: Vec<Vec<Option<String>>>) -> Self {
        let rows = cells
            .into_iter()
            .map(|row| {
                let mut values = row.into_iter();
                columns
                    .iter()
                    .map(|c| (c.clone(), values.next().flatten()))
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of `column` in the first row.
    ///
    /// Hive may qualify headers (`t.nulls`) or drop aliases (`_c0`), so a suffix match is tried
    /// next and the first column is the last resort.
    pub fn first_value(&self, column: &str) -> Option<&str> {
        let row = self.rows.first()?;
        let suffix = format!(".{column}");
        let key = self
            .columns
            .iter()
            .find(|c| c.as_str() == column)
            .or_else(|| self.columns.iter().find(|c| c.ends_with(&suffix)))
            .or_else(|| self.columns.first())?;
        row.get(key)?.as_deref()
    }
}

/// Why a query produced no result.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QueryFailure {
    #[error("query timed out after {limit:?}")]
    Timeout { limit: Duration },
    #[error("query failed: {diagnostic}")]
    QueryFailed {
        code: Option<i32>,
        diagnostic: String,
    },
}

/// What the executor produced for one query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryOutcome {
    Rows(QueryResult),
    /// No result available; the check this query feeds must not report a violation.
    Unavailable(QueryFailure),
}

impl QueryOutcome {
    pub fn rows(&self) -> Option<&QueryResult> {
        match self {
            QueryOutcome::Rows(r) => Some(r),
            QueryOutcome::Unavailable(_) => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, QueryOutcome::Unavailable(_))
    }
}
