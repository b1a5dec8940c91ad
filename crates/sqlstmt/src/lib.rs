//! # sqlstmt
//!
//! A fluent SQL statement builder that produces parameterized SQL text with
//! `:p_N` named placeholders plus the ordered values to bind.
//!
//! ## Features
//!
//! - **Five statement kinds**: SELECT, COUNT, INSERT, UPDATE and DELETE
//! - **Condition trees**: nested AND/OR groups compile to fully parenthesized SQL
//! - **Never interpolates values**: every value becomes a placeholder, except
//!   explicit [`raw`] expressions
//! - **Lazy builds**: SQL and parameters are rebuilt only after a mutation
//! - **No execution layer**: hand the SQL and [`Parameters`] to any driver
//!
//! ## Query Builder (qb)
//!
//! ```ignore
//! use sqlstmt::{raw, row, Condition, Statement};
//!
//! // SELECT
//! let mut q = sqlstmt::select()
//!     .columns(["id", "name"])
//!     .from("users")
//!     .where_(Condition::eq("status", "active"))
//!     .order_by("created_at DESC")
//!     .limit(10);
//! let sql = q.sql()?;
//!
//! // INSERT
//! let q = sqlstmt::insert("users").add_row(row! { "name" => "alice", "active" => true });
//!
//! // UPDATE
//! let q = sqlstmt::update("users")
//!     .set_value("seen_at", raw("NOW()"))
//!     .where_(Condition::eq("id", 7));
//!
//! // DELETE
//! let q = sqlstmt::delete("users").where_(Condition::in_list("id", vec![1, 2, 3]));
//! ```

#[macro_use]
mod macros;

pub mod condition;
pub mod error;
pub mod ident;
pub mod prelude;
pub mod qb;
pub mod value;

pub use condition::{Condition, Joiner, Op, Operand};
pub use error::{BuildError, BuildResult, StatementKind};
pub use ident::{QuoteStyle, quote_column, quote_identifier, quote_order_by};
pub use value::{RawExpr, Value, ValueConversionError, raw};

// Re-export qb module for easy access
pub use qb::{
    Built, CountQuery, DeleteQuery, InsertQuery, JoinKind, JoinOn, PLACEHOLDER_PREFIX, Parameters,
    Row, SelectQuery, Statement, UpdateQuery, count, delete, delete_from, insert, insert_into,
    select, select_from, update,
};
