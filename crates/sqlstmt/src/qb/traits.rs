//! Statement lifecycle shared by every builder.
//!
//! Mutators mark a statement [`BuildState::Dirty`]; reading the SQL or the
//! parameters rebuilds a dirty statement once and caches the result.

use crate::condition::{Condition, Joiner};
use crate::error::{BuildResult, StatementKind};
use crate::qb::param::Parameters;
use crate::value::Value;

/// The result of building a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Built {
    sql: String,
    params: Parameters,
}

impl Built {
    /// Create a new built statement.
    pub fn new(sql: String, params: Parameters) -> Self {
        Self { sql, params }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn into_parts(self) -> (String, Parameters) {
        (self.sql, self.params)
    }
}

/// Cache state of a statement: SQL and parameters only exist together.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BuildState {
    #[default]
    Dirty,
    Built(Built),
}

impl BuildState {
    pub fn is_dirty(&self) -> bool {
        matches!(self, BuildState::Dirty)
    }

    pub fn invalidate(&mut self) {
        *self = BuildState::Dirty;
    }
}

/// State common to every statement kind.
#[derive(Debug, Clone, Default)]
pub struct StatementCore {
    /// Table after INSERT INTO / UPDATE / DELETE FROM
    pub(crate) table: Option<String>,
    /// FROM sources of a SELECT
    pub(crate) from: Vec<String>,
    /// WHERE tree
    pub(crate) conditions: Option<Condition>,
    pub(crate) state: BuildState,
}

impl StatementCore {
    pub(crate) fn with_table(table: Option<String>) -> Self {
        Self {
            table,
            ..Self::default()
        }
    }

    /// Mark the cached build stale.
    pub(crate) fn touch(&mut self) -> &mut Self {
        self.state.invalidate();
        self
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn sources(&self) -> &[String] {
        &self.from
    }

    pub fn conditions(&self) -> Option<&Condition> {
        self.conditions.as_ref()
    }
}

/// A buildable SQL statement.
///
/// Implementors provide [`Statement::build`]; the trait supplies the cached
/// accessors and the mutators shared by all statement kinds.
///
/// # Example
/// ```ignore
/// use sqlstmt::{delete, Condition, Statement};
///
/// let mut q = delete("users").where_(Condition::gt("id", 3));
/// assert_eq!(q.sql()?, "DELETE FROM users WHERE (id > :p_1)");
/// ```
pub trait Statement {
    /// The statement kind, for errors and logs.
    fn kind(&self) -> StatementKind;

    fn core(&self) -> &StatementCore;

    fn core_mut(&mut self) -> &mut StatementCore;

    /// Build SQL and parameters from the current configuration.
    ///
    /// Does not touch the cache; every call numbers placeholders from `:p_1`.
    fn build(&self) -> BuildResult<Built>;

    /// Build without caching and return only the SQL.
    fn to_sql(&self) -> BuildResult<String> {
        self.build().map(|built| built.sql)
    }

    fn is_dirty(&self) -> bool {
        self.core().state.is_dirty()
    }

    /// The cached build, rebuilding first if the statement is dirty.
    ///
    /// A failed build leaves the statement dirty.
    fn built(&mut self) -> BuildResult<&Built> {
        if self.is_dirty() {
            let built = match self.build() {
                Ok(built) => built,
                Err(err) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        target: "sqlstmt.build",
                        kind = %self.kind(),
                        error = %err,
                        "build failed"
                    );
                    return Err(err);
                }
            };
            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "sqlstmt.build",
                kind = %self.kind(),
                param_count = built.params.len(),
                sql = %built.sql,
                "built statement"
            );
            self.core_mut().state = BuildState::Built(built);
        } else {
            #[cfg(feature = "tracing")]
            tracing::trace!(target: "sqlstmt.build", kind = %self.kind(), "cache hit");
        }

        match &self.core().state {
            BuildState::Built(built) => Ok(built),
            BuildState::Dirty => unreachable!("statement state is set after a successful build"),
        }
    }

    /// The parameterized SQL text.
    fn sql(&mut self) -> BuildResult<&str> {
        self.built().map(Built::sql)
    }

    /// The placeholder bindings produced by the same build as [`Statement::sql`].
    fn parameters(&mut self) -> BuildResult<&Parameters> {
        self.built().map(Built::params)
    }

    /// Set the table after INSERT INTO / UPDATE / DELETE FROM.
    fn table(mut self, table: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.core_mut().touch().table = Some(table.into());
        self
    }

    /// Set the FROM sources of a SELECT (replaces any previous list).
    fn from(mut self, tables: impl IntoNames) -> Self
    where
        Self: Sized,
    {
        self.core_mut().touch().from = tables.into_names();
        self
    }

    /// Replace the WHERE tree.
    fn where_(mut self, condition: impl Into<Condition>) -> Self
    where
        Self: Sized,
    {
        self.core_mut().touch().conditions = Some(condition.into().into_clause());
        self
    }

    /// Combine the WHERE tree with `condition` using AND.
    fn and_where(self, condition: impl Into<Condition>) -> Self
    where
        Self: Sized,
    {
        self.combine_where(Joiner::And, condition.into())
    }

    /// Combine the WHERE tree with `condition` using OR.
    fn or_where(self, condition: impl Into<Condition>) -> Self
    where
        Self: Sized,
    {
        self.combine_where(Joiner::Or, condition.into())
    }

    #[doc(hidden)]
    fn combine_where(mut self, joiner: Joiner, condition: Condition) -> Self
    where
        Self: Sized,
    {
        let core = self.core_mut().touch();
        core.conditions = Some(Condition::combine(core.conditions.take(), joiner, condition));
        self
    }
}

/// Conversion into a list of names (tables, columns, ORDER BY items).
pub trait IntoNames {
    fn into_names(self) -> Vec<String>;
}

impl IntoNames for &str {
    fn into_names(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoNames for String {
    fn into_names(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoNames for &String {
    fn into_names(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<S: Into<String>> IntoNames for Vec<S> {
    fn into_names(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String>, const N: usize> IntoNames for [S; N] {
    fn into_names(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String> + Clone> IntoNames for &[S] {
    fn into_names(self) -> Vec<String> {
        self.iter().cloned().map(Into::into).collect()
    }
}

/// Set `column` in an ordered assignment list, overwriting in place.
pub(crate) fn assign(entries: &mut Vec<(String, Value)>, column: String, value: Value) {
    match entries.iter_mut().find(|(c, _)| *c == column) {
        Some(entry) => entry.1 = value,
        None => entries.push((column, value)),
    }
}

/// Implement `Display` as the SQL of a fresh build.
macro_rules! impl_statement_display {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    match $crate::qb::Statement::build(self) {
                        Ok(built) => f.write_str(built.sql()),
                        Err(err) => write!(f, "<invalid statement: {}>", err),
                    }
                }
            }
        )*
    };
}

pub(crate) use impl_statement_display;
