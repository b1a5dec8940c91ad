//! SELECT query builder.

use crate::condition::{Condition, Joiner};
use crate::error::{BuildError, BuildResult, StatementKind};
use crate::qb::compile::compile;
use crate::qb::param::ParamStore;
use crate::qb::traits::{Built, IntoNames, Statement, StatementCore, impl_statement_display};
use crate::value::Value;

/// JOIN flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Join,
    Inner,
    Left,
    LeftOuter,
    Right,
    Outer,
    FullOuter,
}

impl JoinKind {
    pub fn as_sql(self) -> &'static str {
        match self {
            JoinKind::Join => "JOIN",
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::LeftOuter => "LEFT OUTER JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Outer => "OUTER JOIN",
            JoinKind::FullOuter => "FULL OUTER JOIN",
        }
    }
}

/// The ON part of a JOIN.
///
/// Conditions are compiled without placeholders: operands are written
/// inline, so text operands act as column references. A raw string is used
/// as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinOn {
    Condition(Condition),
    Raw(String),
}

impl From<Condition> for JoinOn {
    fn from(c: Condition) -> Self {
        JoinOn::Condition(c)
    }
}

impl From<&str> for JoinOn {
    fn from(s: &str) -> Self {
        JoinOn::Raw(s.to_string())
    }
}

impl From<String> for JoinOn {
    fn from(s: String) -> Self {
        JoinOn::Raw(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinSpec {
    pub kind: JoinKind,
    pub table: String,
    pub on: JoinOn,
}

/// SELECT query builder.
///
/// Clause order is fixed:
/// `SELECT [DISTINCT] cols FROM srcs [JOIN ...] [WHERE] [GROUP BY] [HAVING] [ORDER BY] [LIMIT]`.
///
/// # Note
/// Placeholders in HAVING are not usable with SQLite prepared statements;
/// use raw expressions there when targeting SQLite.
#[derive(Clone, Debug)]
pub struct SelectQuery {
    core: StatementCore,
    distinct: bool,
    /// SELECT columns (default ["*"])
    columns: Vec<String>,
    joins: Vec<JoinSpec>,
    group_by: Vec<String>,
    having: Option<Condition>,
    order_by: Vec<String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl Default for SelectQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectQuery {
    /// Create a new SELECT query builder selecting `*`.
    pub fn new() -> Self {
        Self {
            core: StatementCore::default(),
            distinct: false,
            columns: vec!["*".to_string()],
            joins: Vec::new(),
            group_by: Vec::new(),
            having: None,
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    // ==================== SELECT columns ====================

    /// Toggle DISTINCT.
    pub fn distinct(mut self, enable: bool) -> Self {
        self.core.touch();
        self.distinct = enable;
        self
    }

    /// Set SELECT columns (replaces the list).
    pub fn columns(mut self, cols: impl IntoNames) -> Self {
        self.core.touch();
        self.columns = cols.into_names();
        self
    }

    /// Append SELECT columns; the default `*` is replaced by the first append.
    pub fn add_columns(mut self, cols: impl IntoNames) -> Self {
        self.core.touch();
        for col in cols.into_names() {
            if self.columns.len() == 1 && self.columns[0] == "*" {
                self.columns[0] = col;
            } else {
                self.columns.push(col);
            }
        }
        self
    }

    // ==================== JOIN ====================

    /// Add a JOIN of any kind.
    pub fn join_with(
        mut self,
        kind: JoinKind,
        table: impl Into<String>,
        on: impl Into<JoinOn>,
    ) -> Self {
        self.core.touch();
        self.joins.push(JoinSpec {
            kind,
            table: table.into(),
            on: on.into(),
        });
        self
    }

    /// Add a plain JOIN.
    pub fn join(self, table: impl Into<String>, on: impl Into<JoinOn>) -> Self {
        self.join_with(JoinKind::Join, table, on)
    }

    /// Add INNER JOIN.
    pub fn inner_join(self, table: impl Into<String>, on: impl Into<JoinOn>) -> Self {
        self.join_with(JoinKind::Inner, table, on)
    }

    /// Add LEFT JOIN.
    pub fn left_join(self, table: impl Into<String>, on: impl Into<JoinOn>) -> Self {
        self.join_with(JoinKind::Left, table, on)
    }

    /// Add LEFT OUTER JOIN.
    pub fn left_outer_join(self, table: impl Into<String>, on: impl Into<JoinOn>) -> Self {
        self.join_with(JoinKind::LeftOuter, table, on)
    }

    /// Add RIGHT JOIN.
    pub fn right_join(self, table: impl Into<String>, on: impl Into<JoinOn>) -> Self {
        self.join_with(JoinKind::Right, table, on)
    }

    /// Add OUTER JOIN.
    pub fn outer_join(self, table: impl Into<String>, on: impl Into<JoinOn>) -> Self {
        self.join_with(JoinKind::Outer, table, on)
    }

    /// Add FULL OUTER JOIN.
    pub fn full_outer_join(self, table: impl Into<String>, on: impl Into<JoinOn>) -> Self {
        self.join_with(JoinKind::FullOuter, table, on)
    }

    // ==================== Grouping & Ordering ====================

    /// Set GROUP BY columns.
    pub fn group_by(mut self, cols: impl IntoNames) -> Self {
        self.core.touch();
        self.group_by = cols.into_names();
        self
    }

    /// Replace the HAVING tree.
    pub fn having(mut self, condition: impl Into<Condition>) -> Self {
        self.core.touch();
        self.having = Some(condition.into().into_clause());
        self
    }

    /// Combine the HAVING tree with `condition` using AND.
    pub fn and_having(self, condition: impl Into<Condition>) -> Self {
        self.combine_having(Joiner::And, condition.into())
    }

    /// Combine the HAVING tree with `condition` using OR.
    pub fn or_having(self, condition: impl Into<Condition>) -> Self {
        self.combine_having(Joiner::Or, condition.into())
    }

    fn combine_having(mut self, joiner: Joiner, condition: Condition) -> Self {
        self.core.touch();
        self.having = Some(Condition::combine(self.having.take(), joiner, condition));
        self
    }

    /// Set ORDER BY items, e.g. `["age DESC", "name"]`.
    pub fn order_by(mut self, items: impl IntoNames) -> Self {
        self.core.touch();
        self.order_by = items.into_names();
        self
    }

    // ==================== Pagination ====================

    /// Set LIMIT.
    pub fn limit(mut self, n: i64) -> Self {
        self.core.touch();
        self.limit = Some(n);
        self
    }

    /// Set LIMIT and OFFSET together.
    pub fn limit_offset(mut self, n: i64, offset: i64) -> Self {
        self.core.touch();
        self.limit = Some(n);
        self.offset = Some(offset);
        self
    }

    /// Set OFFSET. Without a limit, the limit becomes `i64::MAX`.
    pub fn offset(mut self, n: i64) -> Self {
        self.core.touch();
        self.offset = Some(n);
        self
    }

    // ==================== Build ====================

    /// Build with `prefix` columns placed ahead of the configured ones.
    pub(crate) fn build_with(&self, kind: StatementKind, prefix: &[&str]) -> BuildResult<Built> {
        if self.core.from.is_empty() {
            return Err(BuildError::MissingTable { kind });
        }

        let mut store = ParamStore::new();
        let mut sql = vec!["SELECT".to_string()];

        if self.distinct {
            sql.push("DISTINCT".to_string());
        }

        let mut columns: Vec<&str> = prefix.to_vec();
        if self.columns.is_empty() {
            columns.push("*");
        } else {
            columns.extend(self.columns.iter().map(String::as_str));
        }
        sql.push(columns.join(", "));

        sql.push("FROM".to_string());
        sql.push(self.core.from.join(", "));

        for join in &self.joins {
            sql.push(join.kind.as_sql().to_string());
            sql.push(join.table.clone());
            sql.push("ON".to_string());
            let on = match &join.on {
                JoinOn::Raw(on) => on.trim().to_string(),
                JoinOn::Condition(on) => compile(&on.clone().into_clause(), &mut store, false)?,
            };
            if on.is_empty() {
                return Err(BuildError::invalid_condition(&join.table, "empty ON clause"));
            }
            sql.push(on);
        }

        if let Some(conditions) = &self.core.conditions {
            let where_sql = compile(conditions, &mut store, true)?;
            if !where_sql.is_empty() {
                sql.push("WHERE".to_string());
                sql.push(where_sql);
            }
        }

        if !self.group_by.is_empty() {
            sql.push("GROUP BY".to_string());
            sql.push(self.group_by.join(", "));
        }

        if let Some(having) = &self.having {
            let having_sql = compile(having, &mut store, true)?;
            if !having_sql.is_empty() {
                sql.push("HAVING".to_string());
                sql.push(having_sql);
            }
        }

        if !self.order_by.is_empty() {
            sql.push("ORDER BY".to_string());
            sql.push(self.order_by.join(", "));
        }

        match (self.limit, self.offset) {
            (None, None) => {}
            (Some(limit), None) => {
                sql.push("LIMIT".to_string());
                sql.push(store.add_placeholder(&Value::Int(limit)));
            }
            (limit, Some(offset)) => {
                sql.push("LIMIT".to_string());
                let offset = store.add_placeholder(&Value::Int(offset));
                let limit = store.add_placeholder(&Value::Int(limit.unwrap_or(i64::MAX)));
                sql.push(format!("{}, {}", offset, limit));
            }
        }

        Ok(Built::new(sql.join(" "), store.into_parameters()))
    }
}

impl Statement for SelectQuery {
    fn kind(&self) -> StatementKind {
        StatementKind::Select
    }

    fn core(&self) -> &StatementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StatementCore {
        &mut self.core
    }

    fn build(&self) -> BuildResult<Built> {
        self.build_with(StatementKind::Select, &[])
    }
}

impl_statement_display!(SelectQuery);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_select() {
        let qb = SelectQuery::new().from("users");
        assert_eq!(qb.to_sql().unwrap(), "SELECT * FROM users");
    }

    #[test]
    fn test_from_is_required() {
        let mut qb = SelectQuery::new();
        let err = qb.sql().unwrap_err();
        assert_eq!(
            err,
            BuildError::MissingTable {
                kind: StatementKind::Select
            }
        );
        assert!(qb.is_dirty());
    }

    #[test]
    fn test_select_with_columns() {
        let qb = SelectQuery::new()
            .columns(["id", "name", "email"])
            .from(["users", "profiles"]);
        assert_eq!(qb.to_sql().unwrap(), "SELECT id, name, email FROM users, profiles");
    }

    #[test]
    fn test_add_columns_replaces_default_star() {
        let qb = SelectQuery::new().from("users").add_columns("id").add_columns(["name"]);
        assert_eq!(qb.to_sql().unwrap(), "SELECT id, name FROM users");
    }

    #[test]
    fn test_distinct() {
        let qb = SelectQuery::new()
            .columns(["id", "name", "age"])
            .distinct(true)
            .from("users");
        assert_eq!(qb.to_sql().unwrap(), "SELECT DISTINCT id, name, age FROM users");
    }

    #[test]
    fn test_join_kinds() {
        let cases = [
            (JoinKind::Join, "JOIN"),
            (JoinKind::Inner, "INNER JOIN"),
            (JoinKind::Left, "LEFT JOIN"),
            (JoinKind::LeftOuter, "LEFT OUTER JOIN"),
            (JoinKind::Right, "RIGHT JOIN"),
            (JoinKind::Outer, "OUTER JOIN"),
            (JoinKind::FullOuter, "FULL OUTER JOIN"),
        ];
        for (kind, keyword) in cases {
            let mut qb = SelectQuery::new().from("users").join_with(
                kind,
                "profiles",
                Condition::eq("users.last_name", "profiles.last_name"),
            );
            assert_eq!(
                qb.sql().unwrap(),
                format!("SELECT * FROM users {keyword} profiles ON (users.last_name = profiles.last_name)")
            );
            assert!(qb.parameters().unwrap().is_empty());
        }
    }

    #[test]
    fn test_raw_join_on() {
        let qb = SelectQuery::new()
            .from("users u")
            .left_join("orders o", "u.id = o.user_id")
            .where_(Condition::eq("u.status", "active"));
        assert_eq!(
            qb.to_sql().unwrap(),
            "SELECT * FROM users u LEFT JOIN orders o ON u.id = o.user_id WHERE (u.status = :p_1)"
        );
    }

    #[test]
    fn test_empty_join_on_is_rejected() {
        let err = SelectQuery::new()
            .from("users")
            .join("profiles", Condition::and([]))
            .where_(Condition::eq("id", 1))
            .to_sql()
            .unwrap_err();
        assert_eq!(err, BuildError::invalid_condition("profiles", "empty ON clause"));

        let mut qb = SelectQuery::new().from("users").join("profiles", "  ");
        assert!(qb.sql().unwrap_err().is_invalid_condition());
        assert!(qb.is_dirty());
    }

    #[test]
    fn test_group_by_having() {
        let mut qb = SelectQuery::new()
            .from("users")
            .group_by("last_name")
            .having(Condition::gt("age", 18))
            .or_having(Condition::lt("age", 3))
            .and_having(Condition::op("id", "<>", 1));
        assert_eq!(
            qb.sql().unwrap(),
            "SELECT * FROM users GROUP BY last_name HAVING (((age > :p_1) OR (age < :p_2)) AND (id <> :p_3))"
        );
        let values: Vec<&Value> = qb.parameters().unwrap().values().collect();
        assert_eq!(values, vec![&Value::Int(18), &Value::Int(3), &Value::Int(1)]);
    }

    #[test]
    fn test_order_by() {
        let qb = SelectQuery::new().from("users").order_by(["alpha", "beta"]);
        assert_eq!(qb.to_sql().unwrap(), "SELECT * FROM users ORDER BY alpha, beta");
    }

    #[test]
    fn test_limit_only() {
        let mut qb = SelectQuery::new().from("users").limit(22);
        assert_eq!(qb.sql().unwrap(), "SELECT * FROM users LIMIT :p_1");
        assert_eq!(qb.parameters().unwrap().get(":p_1"), Some(&Value::Int(22)));
    }

    #[test]
    fn test_offset_defaults_limit_to_max() {
        let mut qb = SelectQuery::new().from("users").offset(5);
        assert_eq!(qb.sql().unwrap(), "SELECT * FROM users LIMIT :p_1, :p_2");
        let params = qb.parameters().unwrap();
        assert_eq!(params.get(":p_1"), Some(&Value::Int(5)));
        assert_eq!(params.get(":p_2"), Some(&Value::Int(i64::MAX)));
    }

    #[test]
    fn test_limit_and_offset() {
        let mut qb = SelectQuery::new().from("users").limit_offset(1, 5);
        assert_eq!(qb.sql().unwrap(), "SELECT * FROM users LIMIT :p_1, :p_2");
        let values: Vec<&Value> = qb.parameters().unwrap().values().collect();
        assert_eq!(values, vec![&Value::Int(5), &Value::Int(1)]);
    }

    #[test]
    fn test_is_null_with_limit() {
        let qb = SelectQuery::new()
            .columns("users.*")
            .from("users")
            .where_(Condition::eq("id", Value::Null))
            .limit(1);
        assert_eq!(
            qb.to_sql().unwrap(),
            "SELECT users.* FROM users WHERE (id IS NULL) LIMIT :p_1"
        );
    }

    #[test]
    fn test_empty_where_is_omitted() {
        let qb = SelectQuery::new().from("users").where_(Condition::and([]));
        assert_eq!(qb.to_sql().unwrap(), "SELECT * FROM users");
    }

    #[test]
    fn test_display() {
        let qb = SelectQuery::new().from("users").where_(Condition::gt("id", 1));
        assert_eq!(qb.to_string(), "SELECT * FROM users WHERE (id > :p_1)");
        assert_eq!(
            SelectQuery::new().to_string(),
            "<invalid statement: No table provided for SELECT statement>"
        );
    }
}
