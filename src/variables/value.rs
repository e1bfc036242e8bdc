//! Variable values - the loosely typed scalars a profile record can hold

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A value stored in the variable table.
///
/// Profile records are free-form JSON, so a value is one of the shapes JSON can
/// produce. Substitution consults [`VariableValue::is_truthy`]: a falsy value is
/// treated exactly like an unset variable and the placeholder stays literal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    /// Arrays and objects, rendered as compact JSON
    Structured(Value),
}

impl VariableValue {
    /// Whether this value is substituted into a template.
    ///
    /// `Null`, `false`, zero, the empty string and empty arrays/objects are all
    /// falsy. A legitimate `0` therefore renders as its placeholder.
    pub fn is_truthy(&self) -> bool {
        match self {
            VariableValue::Null => false,
            VariableValue::Bool(b) => *b,
            VariableValue::Number(n) => number_is_nonzero(n),
            VariableValue::Text(s) => !s.is_empty(),
            VariableValue::Structured(v) => match v {
                Value::Array(items) => !items.is_empty(),
                Value::Object(map) => !map.is_empty(),
                other => VariableValue::from(other.clone()).is_truthy(),
            },
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, VariableValue::Null)
    }
}

fn number_is_nonzero(n: &Number) -> bool {
    if let Some(i) = n.as_i64() {
        i != 0
    } else if let Some(u) = n.as_u64() {
        u != 0
    } else {
        n.as_f64().is_some_and(|f| f != 0.0)
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableValue::Null => f.write_str("null"),
            VariableValue::Bool(b) => write!(f, "{}", b),
            VariableValue::Number(n) => write!(f, "{}", n),
            VariableValue::Text(s) => f.write_str(s),
            VariableValue::Structured(v) => write!(f, "{}", v),
        }
    }
}

impl From<Value> for VariableValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => VariableValue::Null,
            Value::Bool(b) => VariableValue::Bool(b),
            Value::Number(n) => VariableValue::Number(n),
            Value::String(s) => VariableValue::Text(s),
            structured @ (Value::Array(_) | Value::Object(_)) => VariableValue::Structured(structured),
        }
    }
}

impl From<&str> for VariableValue {
    fn from(value: &str) -> Self {
        VariableValue::Text(value.to_string())
    }
}

impl From<String> for VariableValue {
    fn from(value: String) -> Self {
        VariableValue::Text(value)
    }
}

impl From<i64> for VariableValue {
    fn from(value: i64) -> Self {
        VariableValue::Number(value.into())
    }
}

impl From<u64> for VariableValue {
    fn from(value: u64) -> Self {
        VariableValue::Number(value.into())
    }
}

impl From<i32> for VariableValue {
    fn from(value: i32) -> Self {
        VariableValue::Number(value.into())
    }
}

impl From<f64> for VariableValue {
    // NaN and infinities have no JSON form
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(VariableValue::Null, VariableValue::Number)
    }
}

impl From<bool> for VariableValue {
    fn from(value: bool) -> Self {
        VariableValue::Bool(value)
    }
}

impl<T: Into<VariableValue>> From<Option<T>> for VariableValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(VariableValue::Null, Into::into)
    }
}
