//! INSERT query builder.

use crate::error::{BuildError, BuildResult, StatementKind};
use crate::qb::param::ParamStore;
use crate::qb::traits::{Built, Statement, StatementCore, assign, impl_statement_display};
use crate::value::Value;

/// One row of an INSERT: ordered `(column, value)` pairs.
pub type Row = Vec<(String, Value)>;

/// INSERT query builder for one or more rows.
///
/// Column order comes from the first row; every other row must carry the
/// same set of columns, in any order.
#[derive(Clone, Debug, Default)]
pub struct InsertQuery {
    core: StatementCore,
    rows: Vec<Row>,
}

impl InsertQuery {
    /// Create a new INSERT query builder.
    pub fn new(table: Option<String>) -> Self {
        Self {
            core: StatementCore::with_table(table),
            rows: Vec::new(),
        }
    }

    /// Alias for [`Statement::table`].
    #[allow(clippy::should_implement_trait)]
    pub fn into(self, table: impl Into<String>) -> Self {
        self.table(table)
    }

    /// Replace all rows.
    ///
    /// # Example
    /// ```ignore
    /// insert("users").values([
    ///     row! { "active" => false, "ts" => 1 },
    ///     row! { "active" => false, "ts" => 2 },
    /// ]);
    /// ```
    pub fn values<I, R, K, V>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.core.touch();
        self.rows = rows.into_iter().map(normalize_row).collect();
        self
    }

    /// Append one row.
    pub fn add_row<R, K, V>(mut self, row: R) -> Self
    where
        R: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.core.touch();
        self.rows.push(normalize_row(row));
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// Collect a row, letting a repeated column overwrite the earlier value.
fn normalize_row<R, K, V>(row: R) -> Row
where
    R: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    let mut out = Row::new();
    for (column, value) in row {
        assign(&mut out, column.into(), value.into());
    }
    out
}

impl Statement for InsertQuery {
    fn kind(&self) -> StatementKind {
        StatementKind::Insert
    }

    fn core(&self) -> &StatementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StatementCore {
        &mut self.core
    }

    fn build(&self) -> BuildResult<Built> {
        let table = self.core.table.as_deref().ok_or(BuildError::MissingTable {
            kind: StatementKind::Insert,
        })?;

        let first = match self.rows.first() {
            Some(row) if !row.is_empty() => row,
            _ => return Err(BuildError::MissingValues),
        };
        let columns: Vec<&str> = first.iter().map(|(c, _)| c.as_str()).collect();

        let mut store = ParamStore::new();
        let mut tuples = Vec::with_capacity(self.rows.len());

        for (index, row) in self.rows.iter().enumerate() {
            let mismatch = || BuildError::MismatchedRow {
                row: index,
                expected: columns.iter().map(|c| c.to_string()).collect(),
                found: row.iter().map(|(c, _)| c.clone()).collect(),
            };
            if row.len() != columns.len() {
                return Err(mismatch());
            }

            let mut placeholders = Vec::with_capacity(columns.len());
            for column in &columns {
                let value = row
                    .iter()
                    .find(|(c, _)| c == column)
                    .map(|(_, v)| v)
                    .ok_or_else(mismatch)?;
                placeholders.push(store.add_placeholder(value));
            }
            tuples.push(format!("({})", placeholders.join(", ")));
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES {}",
            table,
            columns.join(", "),
            tuples.join(", ")
        );
        Ok(Built::new(sql, store.into_parameters()))
    }
}

impl_statement_display!(InsertQuery);
