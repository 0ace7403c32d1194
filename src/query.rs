use serde::Serialize;

use crate::{ast::CompareOp, evaluator::ProcessorError, value::Value};

/// What a query asks for: read `source`, filter, write `dest`.
///
/// Serializes to the shape the `check` command prints:
///
/// ```json
/// {
///   "source": { "file": "data.json", "path": "users.*" },
///   "dest": { "file": "out.yaml", "path": null },
///   "conditions": [{ "field": "age", "op": ">", "value": 25.0 }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionQuery {
    pub source: PathSpec,
    pub dest: PathSpec,
    /// AND-combined, in query order. Empty when there is no `where`.
    pub conditions: Vec<Condition>,
}

/// A file with an optional dotted extraction path.
///
/// The destination path is carried along but not used when writing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSpec {
    pub file: String,
    pub path: Option<String>,
}

impl PathSpec {
    pub fn new(file: impl Into<String>) -> Self {
        PathSpec {
            file: file.into(),
            path: None,
        }
    }

    pub fn with_path(file: impl Into<String>, path: impl Into<String>) -> Self {
        PathSpec {
            file: file.into(),
            path: Some(path.into()),
        }
    }
}

/// One `field op value` predicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub field: String,
    #[serde(rename = "op")]
    pub operator: CompareOp,
    pub value: Literal,
}

impl Condition {
    /// Build a condition from an operator symbol.
    ///
    /// # Errors
    ///
    /// [`ProcessorError::UnsupportedOperator`] for anything outside
    /// `== != > < >= <=`.
    pub fn new(
        field: impl Into<String>,
        operator: &str,
        value: impl Into<Literal>,
    ) -> Result<Self, ProcessorError> {
        Ok(Condition {
            field: field.into(),
            operator: operator.parse()?,
            value: value.into(),
        })
    }
}

/// Condition right-hand side. Numbers are always doubles.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

impl Literal {
    pub fn to_value(&self) -> Value {
        match self {
            Literal::String(s) => Value::String(s.clone()),
            Literal::Number(n) => Value::Float(*n),
            Literal::Boolean(b) => Value::Boolean(*b),
            Literal::Null => Value::Null,
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Number(n)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::Number(n.into())
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Boolean(b)
    }
}

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(value: Option<T>) -> Self {
        value.map_or(Literal::Null, Into::into)
    }
}
