//! Statement builders for SELECT, COUNT, INSERT, UPDATE and DELETE.
//!
//! Every builder is a consuming fluent value. Reading the SQL or the
//! parameters builds the statement lazily and caches the result until the
//! next mutation.
//!
//! # Features
//!
//! - **Structured conditions**: AND/OR groups are explicit [`Condition`](crate::Condition) nodes
//! - **Named placeholders**: values are bound as `:p_1`, `:p_2`, ... in left-to-right order
//! - **Raw expressions**: [`raw`](crate::raw) fragments are embedded verbatim and never bound
//! - **Lazy rebuilds**: a statement is rebuilt only after it changes
//!
//! # Usage
//!
//! ```ignore
//! use sqlstmt::{qb, Condition, Statement};
//!
//! let mut q = qb::select()
//!     .from("users")
//!     .where_(Condition::eq("id", 1))
//!     .or_where(Condition::eq("id", 3))
//!     .and_where(Condition::gt("age", 18));
//!
//! assert_eq!(
//!     q.sql()?,
//!     "SELECT * FROM users WHERE (((id = :p_1) OR (id = :p_2)) AND (age > :p_3))"
//! );
//! ```
//!
//! # Nested statements
//!
//! Placeholder numbering restarts at `:p_1` on every build, so a statement
//! embedded as a FROM source shares placeholder names with the outer one.
//! Execute nested statements separately; never merge their parameter maps.

mod compile;
mod count;
mod delete;
mod insert;
mod param;
mod select;
mod traits;
mod update;

pub use compile::compile;
pub use count::CountQuery;
pub use delete::DeleteQuery;
pub use insert::{InsertQuery, Row};
pub use param::{PLACEHOLDER_PREFIX, ParamStore, Parameters};
pub use select::{JoinKind, JoinOn, JoinSpec, SelectQuery};
pub use traits::{BuildState, Built, IntoNames, Statement, StatementCore};
pub use update::UpdateQuery;

/// Create a SELECT query builder selecting `*`.
///
/// # Example
/// ```ignore
/// let q = sqlstmt::qb::select().columns(["id", "name"]).from("users");
/// ```
pub fn select() -> SelectQuery {
    SelectQuery::new()
}

/// Create a SELECT query builder over the given FROM sources.
///
/// Use this for aliases or subqueries.
///
/// # Example
/// ```ignore
/// let q = sqlstmt::qb::select_from("users u").inner_join("orders o", "u.id = o.user_id");
/// ```
pub fn select_from(tables: impl IntoNames) -> SelectQuery {
    SelectQuery::new().from(tables)
}

/// Create a COUNT query builder.
pub fn count() -> CountQuery {
    CountQuery::new()
}

/// Create an INSERT query builder for the given table.
///
/// # Example
/// ```ignore
/// let q = sqlstmt::qb::insert("users").add_row(row! { "name" => "alice" });
/// ```
pub fn insert(table: impl Into<String>) -> InsertQuery {
    InsertQuery::new(Some(table.into()))
}

/// Alias for `insert`.
pub fn insert_into(table: impl Into<String>) -> InsertQuery {
    insert(table)
}

/// Create an UPDATE query builder for the given table.
///
/// # Example
/// ```ignore
/// let q = sqlstmt::qb::update("users")
///     .set_value("status", "inactive")
///     .where_(Condition::eq("id", 7));
/// ```
pub fn update(table: impl Into<String>) -> UpdateQuery {
    UpdateQuery::new(Some(table.into()))
}

/// Create a DELETE query builder for the given table.
///
/// # Example
/// ```ignore
/// let q = sqlstmt::qb::delete("users").where_(Condition::eq("id", 7));
/// ```
pub fn delete(table: impl Into<String>) -> DeleteQuery {
    DeleteQuery::new(Some(table.into()))
}

/// Alias for `delete`.
pub fn delete_from(table: impl Into<String>) -> DeleteQuery {
    delete(table)
}
