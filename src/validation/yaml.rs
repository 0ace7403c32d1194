use super::{ValidationResult, Validator, index_path, key_path};
use crate::value::{Key, Value};

/// YAML takes nearly everything. Non-string keys only warn; bytes and
/// non-finite floats are errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlValidator;

impl Validator for YamlValidator {
    fn walk(&self, value: &Value, path: &str, result: &mut ValidationResult) {
        match value {
            Value::Null
            | Value::Boolean(_)
            | Value::Integer(_)
            | Value::String(_)
            | Value::Temporal(_)
            | Value::Decimal(_) => {}
            Value::Float(f) => {
                if !f.is_finite() {
                    result.add_error(path, format!("non-finite float {}", f));
                }
            }
            Value::Object(map) => {
                for (key, child) in map {
                    if !matches!(key, Key::String(_)) {
                        result.add_warning(
                            path,
                            format!("non-string key {}. Not recommended for YAML", key),
                        );
                    }
                    self.walk(child, &key_path(path, key), result);
                }
            }
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.walk(item, &index_path(path, i), result);
                }
            }
            other @ Value::Bytes(_) => {
                result.add_error(
                    path,
                    format!(
                        "{} (type {}) is not a valid YAML value",
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

    #[test]
    fn boolean_key_warns() {
        let mut map = crate::value::Map::new();
        map.insert(Key::Boolean(true), Value::from("yes"));
        let result = YamlValidator.validate(&Value::Object(map));
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].path, "$");
    }
}
