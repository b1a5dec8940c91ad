//! Error types for sqlstmt

use std::fmt;
use thiserror::Error;

/// Result type alias for statement builds
pub type BuildResult<T> = Result<T, BuildError>;

/// The kind of statement being built, used in error messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Count,
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    /// The SQL keyword(s) of this statement kind.
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Count => "COUNT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors detected while building a statement.
///
/// A failed build leaves the statement dirty; fixing the configuration and
/// asking for the SQL again retries the build.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// No primary table (INSERT/UPDATE/DELETE) or no FROM sources (SELECT).
    #[error("No table provided for {kind} statement")]
    MissingTable { kind: StatementKind },

    /// INSERT without any rows
    #[error("No values provided for INSERT statement")]
    MissingValues,

    /// UPDATE without any SET entries
    #[error("No columns provided for UPDATE statement")]
    MissingSet,

    /// A leaf condition whose operand shape does not fit its operator
    #[error("Invalid condition for '{field}': {reason}")]
    InvalidCondition { field: String, reason: String },

    /// An INSERT row whose columns differ from the first row
    #[error("Row {row} has columns {found:?}, expected {expected:?}")]
    MismatchedRow {
        row: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },
}

impl BuildError {
    /// Create an invalid-condition error for a specific field
    pub fn invalid_condition(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCondition {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a missing table error
    pub fn is_missing_table(&self) -> bool {
        matches!(self, Self::MissingTable { .. })
    }

    /// Check if this is a missing values error
    pub fn is_missing_values(&self) -> bool {
        matches!(self, Self::MissingValues)
    }

    /// Check if this is a missing set error
    pub fn is_missing_set(&self) -> bool {
        matches!(self, Self::MissingSet)
    }

    /// Check if this is an invalid condition error
    pub fn is_invalid_condition(&self) -> bool {
        matches!(self, Self::InvalidCondition { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_statement_kind() {
        let err = BuildError::MissingTable {
            kind: StatementKind::Select,
        };
        assert_eq!(err.to_string(), "No table provided for SELECT statement");
        assert!(err.is_missing_table());
    }

    #[test]
    fn invalid_condition_message() {
        let err = BuildError::invalid_condition("id", "BETWEEN needs two operands, got 1");
        assert_eq!(
            err.to_string(),
            "Invalid condition for 'id': BETWEEN needs two operands, got 1"
        );
        assert!(err.is_invalid_condition());
        assert!(!err.is_missing_set());
    }
}
