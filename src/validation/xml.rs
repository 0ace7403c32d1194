use super::{ValidationResult, Validator, index_path, key_path};
use crate::value::{Key, Value};

/// XML needs string tag/attribute names and leaves that can be written as
/// text.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlValidator;

impl Validator for XmlValidator {
    fn walk(&self, value: &Value, path: &str, result: &mut ValidationResult) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    if !matches!(key, Key::String(_)) {
                        result.add_error(
                            path,
                            format!("non-string key {} (XML tag/attr must be str)", key),
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
            leaf @ (Value::Null
            | Value::Boolean(_)
            | Value::Integer(_)
            | Value::Float(_)
            | Value::Decimal(_)
            | Value::String(_)
            | Value::Temporal(_)
            | Value::Bytes(_)) => {
                if leaf.as_text().is_none() {
                    result.add_error(
                        path,
                        format!(
                            "value {} (type {}) is not convertible to string for XML",
                            leaf,
                            leaf.type_name()
                        ),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_bytes_are_text() {
        let doc = Value::object([
            ("ok", Value::Bytes(b"hello".to_vec())),
            ("bad", Value::Bytes(vec![0xff])),
        ]);
        let result = XmlValidator.validate(&doc);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path, "$.bad");
    }
}
