use thiserror::Error;

/// Errors raised while running a query on Athena.
#[derive(Debug, Error)]
pub enum AthenaError {
    #[error("athena request failed: {0}")]
    Sdk(String),

    #[error("athena did not return a query execution id")]
    MissingExecutionId,

    #[error("query {execution_id} ended in state {state}: {reason}")]
    QueryFailed {
        execution_id: String,
        state: String,
        reason: String,
    },

    #[error("result set has no column named '{0}'")]
    MissingColumn(String),
}

/// Tabular query result; `None` cells are SQL NULLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl QueryResult {
    pub fn column_index(&self, name: &str) -> Result<usize, AthenaError> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .ok_or_else(|| AthenaError::MissingColumn(name.to_string()))
    }

    /// Value of `column` in `row`; out-of-range cells read as NULL.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|c| c.as_deref())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
