use super::{ValidationResult, Validator, index_path, key_path};
use crate::value::{Key, Value};

/// TOML: JSON's rules plus date/time leaves. Mixed-kind arrays are flagged
/// as warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlValidator;

impl Validator for TomlValidator {
    fn walk(&self, value: &Value, path: &str, result: &mut ValidationResult) {
        match value {
            Value::Null
            | Value::Boolean(_)
            | Value::Integer(_)
            | Value::String(_)
            | Value::Temporal(_) => {}
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
                if let Some(first) = items.first() {
                    let kind = first.kind();
                    if items.iter().any(|item| item.kind() != kind) {
                        result.add_warning(
                            path,
                            "all elements in list must be of the same type (TOML requirement)",
                        );
                    }
                }
                for (i, item) in items.iter().enumerate() {
                    self.walk(item, &index_path(path, i), result);
                }
            }
            other @ (Value::Decimal(_) | Value::Bytes(_)) => {
                result.add_error(
                    path,
                    format!(
                        "{} (type {}) is not a valid TOML value",
                        other,
                        other.type_name()
                    ),
                );
            }
        }
    }
}
