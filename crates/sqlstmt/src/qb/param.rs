//! Parameter store: named placeholders and their bound values.

use crate::value::Value;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Prefix of every generated placeholder name (`:p_1`, `:p_2`, ...).
pub const PLACEHOLDER_PREFIX: &str = ":p_";

/// Ordered mapping of placeholder name to bound value, in binding order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Parameters {
    entries: Vec<(String, Value)>,
}

impl Parameters {
    /// Create a new empty parameter map.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Look up the value bound to a placeholder.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterate `(placeholder, value)` pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Placeholder names in binding order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Bound values in binding order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the map into its `(placeholder, value)` pairs.
    pub fn into_vec(self) -> Vec<(String, Value)> {
        self.entries
    }

    fn push(&mut self, name: String, value: Value) {
        self.entries.push((name, value));
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a (String, Value);
    type IntoIter = std::slice::Iter<'a, (String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Placeholder generator scoped to a single build.
///
/// Each build starts from a fresh store, so numbering restarts at `:p_1`.
#[derive(Debug)]
pub struct ParamStore {
    counter: usize,
    params: Parameters,
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamStore {
    pub fn new() -> Self {
        Self {
            counter: 1,
            params: Parameters::new(),
        }
    }

    /// Bind a value and return the SQL text standing in for it.
    ///
    /// Raw expressions are returned verbatim and consume no placeholder.
    pub fn add_placeholder(&mut self, value: &Value) -> String {
        if let Value::Raw(expr) = value {
            return expr.as_str().to_string();
        }
        let name = format!("{PLACEHOLDER_PREFIX}{}", self.counter);
        self.counter += 1;
        self.params.push(name.clone(), value.clone());
        name
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Finish the build and take the collected parameters.
    pub fn into_parameters(self) -> Parameters {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::raw;

    #[test]
    fn numbers_placeholders_in_order() {
        let mut store = ParamStore::new();
        assert_eq!(store.add_placeholder(&Value::from(3)), ":p_1");
        assert_eq!(store.add_placeholder(&Value::from("x")), ":p_2");
        let params = store.into_parameters();
        assert_eq!(params.names().collect::<Vec<_>>(), vec![":p_1", ":p_2"]);
        assert_eq!(params.get(":p_2"), Some(&Value::from("x")));
    }

    #[test]
    fn raw_values_bypass_the_store() {
        let mut store = ParamStore::new();
        assert_eq!(store.add_placeholder(&Value::from(raw("NOW()"))), "NOW()");
        assert_eq!(store.add_placeholder(&Value::from(false)), ":p_1");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn serializes_as_ordered_object() {
        let mut store = ParamStore::new();
        store.add_placeholder(&Value::from(false));
        store.add_placeholder(&Value::from(10));
        let json = serde_json::to_string(&store.into_parameters()).unwrap();
        assert_eq!(json, r#"{":p_1":false,":p_2":10}"#);
    }
}
