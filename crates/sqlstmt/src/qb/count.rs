//! COUNT query builder: a SELECT with a leading `COUNT(*)` column.

use crate::condition::Condition;
use crate::error::{BuildResult, StatementKind};
use crate::qb::select::{JoinKind, JoinOn, SelectQuery};
use crate::qb::traits::{Built, IntoNames, Statement, StatementCore, impl_statement_display};

/// COUNT query builder.
///
/// `COUNT(*)` is prefixed to the configured columns rather than replacing
/// them, so the default column list yields `SELECT COUNT(*), * FROM ...`.
#[derive(Clone, Debug, Default)]
pub struct CountQuery {
    select: SelectQuery,
}

/// Forward SELECT mutators to the wrapped builder.
macro_rules! delegate_select {
    ($($name:ident($($arg:ident: $ty:ty),*);)*) => {
        $(
            #[doc = concat!("See [`SelectQuery::", stringify!($name), "`].")]
            pub fn $name(mut self, $($arg: $ty),*) -> Self {
                self.select = self.select.$name($($arg),*);
                self
            }
        )*
    };
}

impl CountQuery {
    /// Create a new COUNT query builder.
    pub fn new() -> Self {
        Self {
            select: SelectQuery::new(),
        }
    }

    /// Count the rows an existing SELECT would return.
    pub fn from_select(select: SelectQuery) -> Self {
        let mut count = Self { select };
        count.core_mut().touch();
        count
    }

    delegate_select! {
        distinct(enable: bool);
        columns(cols: impl IntoNames);
        add_columns(cols: impl IntoNames);
        join_with(kind: JoinKind, table: impl Into<String>, on: impl Into<JoinOn>);
        join(table: impl Into<String>, on: impl Into<JoinOn>);
        inner_join(table: impl Into<String>, on: impl Into<JoinOn>);
        left_join(table: impl Into<String>, on: impl Into<JoinOn>);
        left_outer_join(table: impl Into<String>, on: impl Into<JoinOn>);
        right_join(table: impl Into<String>, on: impl Into<JoinOn>);
        outer_join(table: impl Into<String>, on: impl Into<JoinOn>);
        full_outer_join(table: impl Into<String>, on: impl Into<JoinOn>);
        group_by(cols: impl IntoNames);
        having(condition: impl Into<Condition>);
        and_having(condition: impl Into<Condition>);
        or_having(condition: impl Into<Condition>);
        order_by(items: impl IntoNames);
        limit(n: i64);
        limit_offset(n: i64, offset: i64);
        offset(n: i64);
    }
}

impl Statement for CountQuery {
    fn kind(&self) -> StatementKind {
        StatementKind::Count
    }

    fn core(&self) -> &StatementCore {
        self.select.core()
    }

    fn core_mut(&mut self) -> &mut StatementCore {
        self.select.core_mut()
    }

    fn build(&self) -> BuildResult<Built> {
        self.select.build_with(StatementKind::Count, &["COUNT(*)"])
    }
}

impl_statement_display!(CountQuery);
