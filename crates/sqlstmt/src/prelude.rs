//! Convenient imports for typical `sqlstmt` usage.
//!
//! ```ignore
//! use sqlstmt::prelude::*;
//! ```

pub use crate::row;
pub use crate::{BuildError, BuildResult, Condition, Op, Parameters, Statement, Value};
pub use crate::{count, delete, delete_from, insert, insert_into, raw, select, select_from, update};
