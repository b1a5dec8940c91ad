//! Condition tree types for WHERE/HAVING/ON clauses.
//!
//! This module provides [`Op`] (operator), [`Operand`] and [`Condition`]
//! primitives. A condition is either a single comparison ([`Condition::Leaf`])
//! or an AND/OR [`Condition::Group`] of further conditions, so precedence is
//! always explicit in the tree.
//!
//! # Example
//! ```ignore
//! use sqlstmt::Condition;
//!
//! // (a = :p_1 AND b = :p_2 AND (c = :p_3 OR d = :p_4))
//! let cond = Condition::and([
//!     Condition::eq("a", 1),
//!     Condition::eq("b", 2),
//!     Condition::or([Condition::eq("c", 3), Condition::eq("d", 4)]),
//! ]);
//! ```

use crate::value::{RawExpr, Value, ValueConversionError};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a leaf condition.
///
/// Parsing from a string is case-insensitive; tokens that are not one of the
/// known operators are kept verbatim (upper-cased) as [`Op::Raw`], e.g. `<>`
/// or `REGEXP`. `<>` against NULL still compiles to `IS NOT NULL`, like [`Op::Neq`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// `=`; with a NULL operand compiles to `IS NULL`
    Eq,
    /// `!=`; with a NULL operand compiles to `IS NOT NULL`
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    /// `IN (...)` over a flattened, de-duplicated list
    In,
    /// `NOT IN (...)` over a flattened, de-duplicated list
    NotIn,
    /// `IS NULL`, operand ignored
    Is,
    /// `IS NOT NULL`, operand ignored
    IsNot,
    /// `BETWEEN low AND high`
    Between,
    /// `NOT BETWEEN low AND high`
    NotBetween,
    Like,
    NotLike,
    /// Any other binary operator token, taking one operand.
    Raw(String),
}

impl Op {
    /// The SQL token for this operator.
    pub fn as_sql(&self) -> &str {
        match self {
            Op::Eq => "=",
            Op::Neq => "!=",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::In => "IN",
            Op::NotIn => "NOT IN",
            Op::Is => "IS",
            Op::IsNot => "IS NOT",
            Op::Between => "BETWEEN",
            Op::NotBetween => "NOT BETWEEN",
            Op::Like => "LIKE",
            Op::NotLike => "NOT LIKE",
            Op::Raw(token) => token,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for Op {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
        Ok(match token.as_str() {
            "=" => Op::Eq,
            "!=" => Op::Neq,
            ">" => Op::Gt,
            ">=" => Op::Gte,
            "<" => Op::Lt,
            "<=" => Op::Lte,
            "IN" => Op::In,
            "NOT IN" => Op::NotIn,
            "IS" => Op::Is,
            "IS NOT" | "NOT IS" => Op::IsNot,
            "BETWEEN" => Op::Between,
            "NOT BETWEEN" => Op::NotBetween,
            "LIKE" => Op::Like,
            "NOT LIKE" => Op::NotLike,
            _ => Op::Raw(token),
        })
    }
}

impl From<&str> for Op {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(op) => op,
            Err(never) => match never {},
        }
    }
}

/// The operand of a leaf condition: a single value or a (possibly nested) list.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(Value),
    List(Vec<Operand>),
}

impl Operand {
    /// All values in the operand, depth-first, with nested lists collapsed.
    pub fn flatten(&self) -> Vec<&Value> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into<'a>(&'a self, out: &mut Vec<&'a Value>) {
        match self {
            Operand::Value(v) => out.push(v),
            Operand::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }

    /// The single scalar of this operand: a bare value or a one-element list.
    pub fn scalar(&self) -> Option<&Value> {
        match self {
            Operand::Value(v) => Some(v),
            Operand::List(items) if items.len() == 1 => items[0].scalar(),
            Operand::List(_) => None,
        }
    }

    /// The (low, high) scalars of a two-element list.
    pub fn pair(&self) -> Option<(&Value, &Value)> {
        match self {
            Operand::List(items) if items.len() == 2 => {
                Some((items[0].scalar()?, items[1].scalar()?))
            }
            _ => None,
        }
    }

    /// Number of top-level entries (1 for a bare value).
    pub fn arity(&self) -> usize {
        match self {
            Operand::Value(_) => 1,
            Operand::List(items) => items.len(),
        }
    }
}

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Operand::Value(v)
    }
}

macro_rules! impl_operand_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Operand {
                fn from(v: $ty) -> Self {
                    Operand::Value(Value::from(v))
                }
            }
        )*
    };
}

impl_operand_from_scalar!(
    bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, &str, String, &String, RawExpr
);

impl<T: Into<Value>> From<Option<T>> for Operand {
    fn from(v: Option<T>) -> Self {
        Operand::Value(Value::from(v))
    }
}

impl<T: Into<Operand>> From<Vec<T>> for Operand {
    fn from(items: Vec<T>) -> Self {
        Operand::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Operand>, const N: usize> From<[T; N]> for Operand {
    fn from(items: [T; N]) -> Self {
        Operand::List(items.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<Operand>, B: Into<Operand>> From<(A, B)> for Operand {
    fn from((low, high): (A, B)) -> Self {
        Operand::List(vec![low.into(), high.into()])
    }
}

impl TryFrom<serde_json::Value> for Operand {
    type Error = ValueConversionError;

    fn try_from(v: serde_json::Value) -> Result<Self, Self::Error> {
        match v {
            serde_json::Value::Array(items) => Ok(Operand::List(
                items
                    .into_iter()
                    .map(Operand::try_from)
                    .collect::<Result<_, _>>()?,
            )),
            other => Value::try_from(other).map(Operand::Value),
        }
    }
}

/// Boolean connective of a condition group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joiner {
    And,
    Or,
}

impl Joiner {
    pub fn as_sql(self) -> &'static str {
        match self {
            Joiner::And => "AND",
            Joiner::Or => "OR",
        }
    }
}

/// A node of a condition tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// A single comparison: `field op operand`
    Leaf {
        field: String,
        op: Op,
        operand: Operand,
    },
    /// Children joined by AND/OR; compiles to a parenthesized expression
    Group {
        joiner: Joiner,
        children: Vec<Condition>,
    },
}

impl Condition {
    /// Create a leaf with any operator.
    ///
    /// # Example
    /// ```ignore
    /// Condition::op("id", "between", (1, 99));
    /// Condition::op("id", "<>", 1);
    /// ```
    pub fn op(field: impl Into<String>, op: impl Into<Op>, operand: impl Into<Operand>) -> Self {
        Condition::Leaf {
            field: field.into(),
            op: op.into(),
            operand: operand.into(),
        }
    }

    /// Create an equality condition: field = value (IS NULL for a null value)
    pub fn eq(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Self::op(field, Op::Eq, value)
    }

    /// Create an inequality condition: field != value
    pub fn neq(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Self::op(field, Op::Neq, value)
    }

    /// Create a greater-than condition: field > value
    pub fn gt(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Self::op(field, Op::Gt, value)
    }

    /// Create a greater-than-or-equal condition: field >= value
    pub fn gte(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Self::op(field, Op::Gte, value)
    }

    /// Create a less-than condition: field < value
    pub fn lt(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Self::op(field, Op::Lt, value)
    }

    /// Create a less-than-or-equal condition: field <= value
    pub fn lte(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Self::op(field, Op::Lte, value)
    }

    /// Create an IN condition; nested lists are flattened.
    pub fn in_list(field: impl Into<String>, values: impl Into<Operand>) -> Self {
        Self::op(field, Op::In, values)
    }

    /// Create a NOT IN condition; nested lists are flattened.
    pub fn not_in(field: impl Into<String>, values: impl Into<Operand>) -> Self {
        Self::op(field, Op::NotIn, values)
    }

    /// Create an IS NULL condition.
    pub fn is_null(field: impl Into<String>) -> Self {
        Self::op(field, Op::Is, Value::Null)
    }

    /// Create an IS NOT NULL condition.
    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self::op(field, Op::IsNot, Value::Null)
    }

    /// Create a BETWEEN condition.
    pub fn between(
        field: impl Into<String>,
        low: impl Into<Operand>,
        high: impl Into<Operand>,
    ) -> Self {
        Self::op(field, Op::Between, Operand::List(vec![low.into(), high.into()]))
    }

    /// Create a NOT BETWEEN condition.
    pub fn not_between(
        field: impl Into<String>,
        low: impl Into<Operand>,
        high: impl Into<Operand>,
    ) -> Self {
        Self::op(field, Op::NotBetween, Operand::List(vec![low.into(), high.into()]))
    }

    /// Create a LIKE condition.
    pub fn like(field: impl Into<String>, pattern: impl Into<Operand>) -> Self {
        Self::op(field, Op::Like, pattern)
    }

    /// Create a NOT LIKE condition.
    pub fn not_like(field: impl Into<String>, pattern: impl Into<Operand>) -> Self {
        Self::op(field, Op::NotLike, pattern)
    }

    /// Create an AND group.
    pub fn and(children: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Group {
            joiner: Joiner::And,
            children: children.into_iter().collect(),
        }
    }

    /// Create an OR group.
    pub fn or(children: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Group {
            joiner: Joiner::Or,
            children: children.into_iter().collect(),
        }
    }

    /// AND group of equality leaves, one per (field, value) pair.
    pub fn matching<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Operand>,
    {
        Self::and(pairs.into_iter().map(|(k, v)| Self::eq(k, v)))
    }

    /// A group with no non-empty leaves compiles to nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Condition::Leaf { .. } => false,
            Condition::Group { children, .. } => children.iter().all(Condition::is_empty),
        }
    }

    /// Normalize a clause root: a bare leaf becomes a one-child AND group so
    /// the compiled clause is always parenthesized.
    pub(crate) fn into_clause(self) -> Self {
        match self {
            leaf @ Condition::Leaf { .. } => Self::and([leaf]),
            group => group,
        }
    }

    /// Combine an existing clause with a new one under `joiner`.
    ///
    /// A missing or empty existing clause is replaced outright.
    pub(crate) fn combine(existing: Option<Self>, joiner: Joiner, new: Self) -> Self {
        let new = new.into_clause();
        match existing {
            Some(old) if !old.is_empty() => Condition::Group {
                joiner,
                children: vec![old, new],
            },
            _ => new,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn op_parses_case_insensitively() {
        assert_eq!(Op::from("not in"), Op::NotIn);
        assert_eq!(Op::from("Between"), Op::Between);
        assert_eq!(Op::from("NOT  IS"), Op::IsNot);
        assert_eq!(Op::from("is not"), Op::IsNot);
        assert_eq!(Op::from(">="), Op::Gte);
    }

    #[test]
    fn unknown_op_is_kept_raw() {
        assert_eq!(Op::from("<>"), Op::Raw("<>".to_string()));
        assert_eq!(Op::from("regexp"), Op::Raw("REGEXP".to_string()));
        assert_eq!(Op::from("regexp").as_sql(), "REGEXP");
    }

    #[test]
    fn operand_flattens_nested_lists() {
        let operand = Operand::from(vec![vec![1, 2], vec![3]]);
        let flat: Vec<_> = operand.flatten().into_iter().cloned().collect();
        assert_eq!(flat, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn operand_scalar_and_pair() {
        assert_eq!(Operand::from(5).scalar(), Some(&Value::Int(5)));
        assert_eq!(Operand::from([5]).scalar(), Some(&Value::Int(5)));
        assert_eq!(Operand::from([1, 2]).scalar(), None);
        assert_eq!(
            Operand::from((1, 99)).pair(),
            Some((&Value::Int(1), &Value::Int(99)))
        );
        assert_eq!(Operand::from([1]).pair(), None);
    }

    #[test]
    fn operand_from_json() {
        let operand = Operand::try_from(json!([1, [2, "x"]])).unwrap();
        assert_eq!(operand.flatten().len(), 3);
        assert!(Operand::try_from(json!({"a": 1})).is_err());
    }

    #[test]
    fn empty_groups() {
        assert!(Condition::and([]).is_empty());
        assert!(Condition::or([Condition::and([])]).is_empty());
        assert!(!Condition::and([Condition::eq("id", 1)]).is_empty());
    }

    #[test]
    fn combine_replaces_missing_or_empty_tree() {
        let new = Condition::eq("id", 1);
        assert_eq!(
            Condition::combine(None, Joiner::And, new.clone()),
            Condition::and([new.clone()])
        );
        assert_eq!(
            Condition::combine(Some(Condition::and([])), Joiner::Or, new.clone()),
            Condition::and([new])
        );
    }

    #[test]
    fn combine_wraps_existing_tree() {
        let old = Condition::matching([("id", 1)]);
        let combined = Condition::combine(Some(old.clone()), Joiner::Or, Condition::eq("id", 3));
        assert_eq!(
            combined,
            Condition::or([old, Condition::and([Condition::eq("id", 3)])])
        );
    }
}
