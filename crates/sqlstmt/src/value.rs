//! Bound values and raw SQL expressions.
//!
//! [`Value`] is the closed set of scalars a statement can bind. [`RawExpr`]
//! marks a literal SQL fragment (e.g. `NOW()`) that is embedded verbatim
//! instead of being bound to a placeholder.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A literal SQL fragment exempt from parameterization.
///
/// # Safety
/// The text is written into the SQL as-is. Never build it from user input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RawExpr(String);

impl RawExpr {
    /// Create a raw expression from SQL text.
    pub fn new(sql: impl Into<String>) -> Self {
        RawExpr(sql.into())
    }

    /// The SQL text of the expression.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RawExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Create a raw SQL expression.
///
/// # Example
/// ```ignore
/// use sqlstmt::{raw, update};
///
/// let q = update("users").set_value("updated_at", raw("NOW()"));
/// ```
pub fn raw(sql: impl Into<String>) -> RawExpr {
    RawExpr::new(sql)
}

/// A value that can appear as a condition operand or a column value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Embedded verbatim; never consumes a placeholder.
    Raw(RawExpr),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Value::Raw(_))
    }

    /// Render the value as literal SQL text, without quoting.
    ///
    /// Used where placeholders are not allowed (JOIN ... ON), so text values
    /// are taken to be column references.
    pub fn to_literal(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(true) => "1".to_string(),
            Value::Bool(false) => "0".to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Text(s) => s.clone(),
            Value::Raw(expr) => expr.as_str().to_string(),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<RawExpr> for Value {
    fn from(v: RawExpr) -> Self {
        Value::Raw(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Error converting a JSON value that has no scalar counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert a JSON {0} into a scalar value")]
pub struct ValueConversionError(pub &'static str);

impl TryFrom<serde_json::Value> for Value {
    type Error = ValueConversionError;

    fn try_from(v: serde_json::Value) -> Result<Self, Self::Error> {
        match v {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Int(i)),
                None => n
                    .as_f64()
                    .map(Value::Float)
                    .ok_or(ValueConversionError("number")),
            },
            serde_json::Value::String(s) => Ok(Value::Text(s)),
            serde_json::Value::Array(_) => Err(ValueConversionError("array")),
            serde_json::Value::Object(_) => Err(ValueConversionError("object")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn option_maps_none_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }

    #[test]
    fn literals() {
        assert_eq!(Value::from("profiles.id").to_literal(), "profiles.id");
        assert_eq!(Value::from(true).to_literal(), "1");
        assert_eq!(Value::Null.to_literal(), "NULL");
        assert_eq!(Value::from(raw("NOW()")).to_literal(), "NOW()");
    }

    #[test]
    fn serializes_untagged() {
        let values = vec![
            Value::Null,
            Value::from(false),
            Value::from(3),
            Value::from("a"),
            Value::from(raw("NOW()")),
        ];
        assert_eq!(
            serde_json::to_value(&values).unwrap(),
            json!([null, false, 3, "a", "NOW()"])
        );
    }

    #[test]
    fn from_json_scalars() {
        assert_eq!(Value::try_from(json!(7)).unwrap(), Value::Int(7));
        assert_eq!(Value::try_from(json!(1.5)).unwrap(), Value::Float(1.5));
        assert_eq!(Value::try_from(json!("a")).unwrap(), Value::Text("a".into()));
        assert_eq!(
            Value::try_from(json!([1])),
            Err(ValueConversionError("array"))
        );
    }
}
