//! Condition compiler: turns a [`Condition`] tree into a SQL boolean expression.
//!
//! Groups compile to `(child JOINER child ...)`; leaves compile to
//! `field OP operand` with operands bound through the [`ParamStore`].
//! Placeholders are allocated in left-to-right tree order.

use crate::condition::{Condition, Joiner, Op, Operand};
use crate::error::{BuildError, BuildResult};
use crate::qb::param::ParamStore;
use crate::value::Value;

/// Compile a condition tree.
///
/// With `use_placeholders == false` (JOIN ... ON) operands are written as
/// literal text instead of being bound. An empty group compiles to an empty
/// string, which callers treat as "no clause".
pub fn compile(
    node: &Condition,
    store: &mut ParamStore,
    use_placeholders: bool,
) -> BuildResult<String> {
    Compiler {
        store,
        use_placeholders,
    }
    .node(node)
}

struct Compiler<'a> {
    store: &'a mut ParamStore,
    use_placeholders: bool,
}

impl Compiler<'_> {
    fn node(&mut self, node: &Condition) -> BuildResult<String> {
        match node {
            Condition::Group { joiner, children } => self.group(*joiner, children),
            Condition::Leaf { field, op, operand } => self.leaf(field, op, operand),
        }
    }

    fn group(&mut self, joiner: Joiner, children: &[Condition]) -> BuildResult<String> {
        let mut parts = Vec::with_capacity(children.len());
        for child in children {
            let sql = self.node(child)?;
            if !sql.is_empty() {
                parts.push(sql);
            }
        }
        if parts.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("({})", parts.join(&format!(" {} ", joiner.as_sql()))))
    }

    fn leaf(&mut self, field: &str, op: &Op, operand: &Operand) -> BuildResult<String> {
        if field.trim().is_empty() {
            return Err(BuildError::invalid_condition(field, "empty field name"));
        }

        match op {
            Op::In | Op::NotIn => {
                let values = dedup(operand.flatten());
                if values.is_empty() {
                    // IN () is not valid SQL; nothing is in an empty list.
                    return Ok(if *op == Op::In { "1=0" } else { "1=1" }.to_string());
                }
                let placeholders: Vec<String> = values.into_iter().map(|v| self.bind(v)).collect();
                Ok(format!("{} {} ({})", field, op, placeholders.join(", ")))
            }
            Op::Is | Op::IsNot => Ok(format!("{} {} NULL", field, op)),
            Op::Between | Op::NotBetween => {
                let (low, high) = operand.pair().ok_or_else(|| {
                    BuildError::invalid_condition(
                        field,
                        format!("{} needs exactly two operands, got {}", op, operand.arity()),
                    )
                })?;
                let low = self.bind(low);
                let high = self.bind(high);
                Ok(format!("{} {} {} AND {}", field, op, low, high))
            }
            Op::Raw(token) if token.trim().is_empty() => {
                Err(BuildError::invalid_condition(field, "empty operator"))
            }
            _ => {
                let value = self.scalar(field, op, operand)?;
                match (op, value) {
                    (Op::Eq, Value::Null) => Ok(format!("{} IS NULL", field)),
                    (Op::Neq, Value::Null) => Ok(format!("{} IS NOT NULL", field)),
                    (Op::Raw(token), Value::Null) if token == "<>" => {
                        Ok(format!("{} IS NOT NULL", field))
                    }
                    _ => {
                        let placeholder = self.bind(value);
                        Ok(format!("{} {} {}", field, op, placeholder))
                    }
                }
            }
        }
    }

    fn scalar<'v>(&self, field: &str, op: &Op, operand: &'v Operand) -> BuildResult<&'v Value> {
        operand.scalar().ok_or_else(|| {
            BuildError::invalid_condition(
                field,
                format!("{} needs a single operand, got {}", op, operand.arity()),
            )
        })
    }

    fn bind(&mut self, value: &Value) -> String {
        if self.use_placeholders {
            self.store.add_placeholder(value)
        } else {
            value.to_literal()
        }
    }
}

/// Keep the first occurrence of each value, preserving order.
fn dedup(values: Vec<&Value>) -> Vec<&Value> {
    let mut out: Vec<&Value> = Vec::with_capacity(values.len());
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}
