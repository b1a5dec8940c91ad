//! UPDATE query builder.

use crate::error::{BuildError, BuildResult, StatementKind};
use crate::qb::compile::compile;
use crate::qb::param::ParamStore;
use crate::qb::traits::{Built, Statement, StatementCore, assign, impl_statement_display};
use crate::value::Value;

/// UPDATE query builder.
#[derive(Clone, Debug, Default)]
pub struct UpdateQuery {
    core: StatementCore,
    /// SET assignments in order
    set: Vec<(String, Value)>,
}

impl UpdateQuery {
    /// Create a new UPDATE query builder.
    pub fn new(table: Option<String>) -> Self {
        Self {
            core: StatementCore::with_table(table),
            set: Vec::new(),
        }
    }

    /// Replace all SET assignments.
    pub fn set<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.core.touch();
        self.set.clear();
        for (column, value) in values {
            assign(&mut self.set, column.into(), value.into());
        }
        self
    }

    /// Set one column, overwriting an earlier assignment to it.
    pub fn set_value(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.core.touch();
        assign(&mut self.set, column.into(), value.into());
        self
    }
}

impl Statement for UpdateQuery {
    fn kind(&self) -> StatementKind {
        StatementKind::Update
    }

    fn core(&self) -> &StatementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StatementCore {
        &mut self.core
    }

    fn build(&self) -> BuildResult<Built> {
        let table = self.core.table.as_deref().ok_or(BuildError::MissingTable {
            kind: StatementKind::Update,
        })?;
        if self.set.is_empty() {
            return Err(BuildError::MissingSet);
        }

        let mut store = ParamStore::new();
        let set_parts: Vec<String> = self
            .set
            .iter()
            .map(|(column, value)| format!("{} = {}", column, store.add_placeholder(value)))
            .collect();

        let mut sql = format!("UPDATE {} SET {}", table, set_parts.join(", "));

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

impl_statement_display!(UpdateQuery);
