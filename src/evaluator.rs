//! Condition evaluation and record filtering.
//!
//! Extraction always runs before filtering: [`process`] applies the path,
//! then (only when there are conditions) filters whatever the path
//! produced.

use tracing::{debug, info, warn};

use crate::{
    ast::CompareOp,
    path,
    query::{Condition, Literal},
    value::Value,
};

/// Errors from applying a path or a condition to a tree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProcessorError {
    /// Operator outside `== != > < >= <=`
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// Path expression with an empty segment or a misplaced wildcard
    #[error("Invalid path expression '{expression}': {reason}")]
    InvalidPath { expression: String, reason: String },
}

/// Compare a field value against a literal.
///
/// - a null on either side: `==` / `!=` test null-equality, every other
///   operator is false
/// - two numbers: compared as doubles, so `30 == 30.0`
/// - otherwise native equality and ordering; ordering across kinds that
///   don't order (string vs number, objects) is false and logged
///
/// Never fails; see [`evaluate_condition`] for the symbol-based form.
pub fn compare(actual: &Value, op: CompareOp, expected: &Literal) -> bool {
    let expected = expected.to_value();

    if actual.is_null() || expected.is_null() {
        let both_null = actual.is_null() && expected.is_null();
        return match op {
            CompareOp::Equal => both_null,
            CompareOp::NotEqual => !both_null,
            _ => false,
        };
    }

    if actual.is_number() && expected.is_number() {
        return match (actual.as_float(), expected.as_float()) {
            (Some(a), Some(b)) => op.holds_f64(a, b),
            _ => false,
        };
    }

    match op {
        CompareOp::Equal => actual.loose_eq(&expected),
        CompareOp::NotEqual => !actual.loose_eq(&expected),
        _ => match actual.loose_cmp(&expected) {
            Some(ordering) => op.holds(ordering),
            None => {
                warn!(
                    actual = actual.type_name(),
                    expected = expected.type_name(),
                    op = op.symbol(),
                    "type mismatch in condition, treating as false"
                );
                false
            }
        },
    }
}

/// Symbol-based form of [`compare`], for hand-built conditions.
///
/// # Errors
///
/// [`ProcessorError::UnsupportedOperator`] if `op` is not one of the six
/// comparison symbols.
///
/// # Examples
///
/// ```
/// use dataconv::{evaluate_condition, Literal, Value};
///
/// assert!(evaluate_condition(&Value::Integer(30), "==", &Literal::Number(30.0)).unwrap());
/// assert!(!evaluate_condition(&Value::Null, ">", &Literal::Number(5.0)).unwrap());
/// assert!(evaluate_condition(&Value::Integer(1), "=~", &Literal::Null).is_err());
/// ```
pub fn evaluate_condition(
    actual: &Value,
    op: &str,
    expected: &Literal,
) -> Result<bool, ProcessorError> {
    let op: CompareOp = op.parse()?;
    Ok(compare(actual, op, expected))
}

fn matches_all(record: &Value, conditions: &[Condition]) -> bool {
    let Value::Object(_) = record else {
        return false;
    };
    conditions.iter().all(|condition| {
        let field = record.get(&condition.field).unwrap_or(&Value::Null);
        compare(field, condition.operator, &condition.value)
    })
}

/// Keep the records that satisfy every condition.
///
/// With no conditions the input comes back untouched, whatever its shape.
/// Otherwise the input is read as a list of records: an array is used
/// as-is, a lone object becomes a one-element list and any other value
/// becomes an empty list. Array elements that are not objects never match.
pub fn apply_conditions(data: Value, conditions: &[Condition]) -> Value {
    if conditions.is_empty() {
        debug!("no conditions specified, returning all data");
        return data;
    }

    let records = match data {
        Value::Array(items) => items,
        Value::Object(map) => {
            warn!("expected a list for filtering, wrapping single object");
            vec![Value::Object(map)]
        }
        other => {
            warn!(kind = other.type_name(), "expected a list for filtering, nothing to filter");
            Vec::new()
        }
    };

    debug!(
        conditions = conditions.len(),
        items = records.len(),
        "applying conditions"
    );
    let total = records.len();

    let filtered: Vec<Value> = records
        .into_iter()
        .filter(|record| matches_all(record, conditions))
        .collect();

    info!(
        total,
        kept = filtered.len(),
        conditions = conditions.len(),
        "filtered records"
    );

    Value::Array(filtered)
}

/// Extract with `path`, then filter with `conditions`.
///
/// # Examples
///
/// ```
/// use dataconv::{process, Condition, Value};
///
/// let data = Value::object([(
///     "users",
///     Value::Array(vec![
///         Value::object([("name", Value::from("John")), ("age", Value::from(30))]),
///         Value::object([("name", Value::from("Jane")), ("age", Value::from(25))]),
///     ]),
/// )]);
/// let conditions = vec![Condition::new("age", ">", 26).unwrap()];
///
/// let result = process(&data, Some("users.*"), &conditions).unwrap();
/// assert_eq!(
///     result,
///     Value::Array(vec![Value::object([
///         ("name", Value::from("John")),
///         ("age", Value::from(30)),
///     ])])
/// );
/// ```
pub fn process(
    tree: &Value,
    path: Option<&str>,
    conditions: &[Condition],
) -> Result<Value, ProcessorError> {
    debug!(
        path = path.unwrap_or(""),
        conditions = conditions.len(),
        "processing data"
    );

    let extracted = path::evaluate(tree, path)?;

    if conditions.is_empty() {
        return Ok(extracted);
    }
    Ok(apply_conditions(extracted, conditions))
}
