use super::{ValidationResult, Validator, index_path, key_path};
use crate::value::{Key, Value};

/// JSON holds null, booleans, integers, finite floats, strings, arrays and
/// string-keyed objects. Never warns.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonValidator;

impl Validator for JsonValidator {
    fn walk(&self, value: &Value, path: &str, result: &mut ValidationResult) {
        match value {
            Value::Null | Value::Boolean(_) | Value::Integer(_) | Value::String(_) => {}
            Value::Float(f) => {
                if !f.is_finite() {
                    result.add_error(path, format!("non-finite float {}", f));
                }
            }
            Value::Object(map) => {
                for (key, child) in map {
                    if !matches!(key, Key::String(_)) {
                        result.add_error(path, format!("non-string key {}", key));
                    }
                    self.walk(child, &key_path(path, key), result);
                }
            }
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.walk(item, &index_path(path, i), result);
                }
            }
            other @ (Value::Decimal(_) | Value::Temporal(_) | Value::Bytes(_)) => {
                result.add_error(
                    path,
                    format!(
                        "{} (type {}) is not a valid JSON value",
                        other,
                        other.type_name()
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn decimal_is_rejected() {
        let result = JsonValidator.validate(&Value::object([("n", Value::Decimal(Decimal::ONE))]));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path, "$.n");
        assert!(result.errors[0].message.ends_with("is not a valid JSON value"));
    }

    #[test]
    fn rich_leaves_are_rejected_with_their_type() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let doc = Value::Array(vec![
            Value::Decimal(Decimal::ONE),
            Value::Temporal(crate::value::Temporal::Date(date)),
            Value::Bytes(b"hi".to_vec()),
        ]);
        let result = JsonValidator.validate(&doc);
        let paths: Vec<&str> = result.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["$[0]", "$[1]", "$[2]"]);
        for (error, kind) in result.errors.iter().zip(["decimal", "temporal", "bytes"]) {
            assert!(
                error.message.contains(&format!("(type {})", kind)),
                "{}",
                error.message
            );
        }
    }

    #[test]
    fn integer_key_reported_at_mapping() {
        let mut map = crate::value::Map::new();
        map.insert(Key::Integer(1), Value::from("one"));
        let result = JsonValidator.validate(&Value::object([("m", Value::Object(map))]));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path, "$.m");
        assert_eq!(result.errors[0].message, "non-string key 1");
    }
}
