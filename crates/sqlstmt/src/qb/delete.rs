//! DELETE query builder.

use crate::error::{BuildError, BuildResult, StatementKind};
use crate::qb::compile::compile;
use crate::qb::param::ParamStore;
use crate::qb::traits::{Built, Statement, StatementCore, impl_statement_display};

/// DELETE query builder.
///
/// Without a WHERE tree the statement deletes every row of the table.
#[derive(Clone, Debug, Default)]
pub struct DeleteQuery {
    core: StatementCore,
}

impl DeleteQuery {
    /// Create a new DELETE query builder.
    pub fn new(table: Option<String>) -> Self {
        Self {
            core: StatementCore::with_table(table),
        }
    }
}

impl Statement for DeleteQuery {
    fn kind(&self) -> StatementKind {
        StatementKind::Delete
    }

    fn core(&self) -> &StatementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StatementCore {
        &mut self.core
    }

    fn build(&self) -> BuildResult<Built> {
        let table = self.core.table.as_deref().ok_or(BuildError::MissingTable {
            kind: StatementKind::Delete,
        })?;

        let mut store = ParamStore::new();
        let mut sql = format!("DELETE FROM {}", table);

        if let Some(conditions) = &self.core.conditions {
            let where_sql = compile(conditions, &mut store, true)?;
            if !where_sql.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&where_sql);
            }
        }

        Ok(Built::new(sql, store.into_parameters()))
    }
}

impl_statement_display!(DeleteQuery);
