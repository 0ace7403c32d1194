//! JSON <-> Value conversion

use base64::{Engine, engine::general_purpose::STANDARD};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::Serialize;

use super::FormatError;
use crate::value::Value;

pub fn parse(input: &str) -> Result<Value, FormatError> {
    let json: serde_json::Value = serde_json::from_str(input)?;
    Ok(from_json(json))
}

/// Pretty-print with `indent` spaces per level, newline-terminated.
pub fn render(value: &Value, indent: usize) -> Result<String, FormatError> {
    let indent = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    to_json(value).serialize(&mut serializer)?;
    out.push(b'\n');
    Ok(String::from_utf8(out)?)
}

/// Convert serde_json::Value to Value
pub fn from_json(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(u) = n.as_u64() {
                Value::Decimal(Decimal::from(u))
            } else {
                n.as_f64().map_or(Value::Null, Value::Float)
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(from_json).collect()),
        serde_json::Value::Object(obj) => {
            Value::Object(obj.into_iter().map(|(k, v)| (k.into(), from_json(v))).collect())
        }
    }
}

/// Convert Value to serde_json::Value.
///
/// Lossy where JSON has no equivalent: non-finite floats become null,
/// temporals become ISO strings, bytes become base64 strings and keys are
/// stringified. The JSON validator reports all of these beforehand.
pub fn to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => float_to_json(*f),
        Value::Decimal(d) => decimal_to_json(d),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Temporal(t) => serde_json::Value::String(t.to_string()),
        Value::Bytes(b) => serde_json::Value::String(STANDARD.encode(b)),
        Value::Array(arr) => serde_json::Value::Array(arr.iter().map(to_json).collect()),
        Value::Object(obj) => serde_json::Value::Object(
            obj.iter()
                .map(|(k, v)| (k.to_string(), to_json(v)))
                .collect(),
        ),
    }
}

fn float_to_json(f: f64) -> serde_json::Value {
    serde_json::Number::from_f64(f)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

fn decimal_to_json(d: &Decimal) -> serde_json::Value {
    if d.fract().is_zero() {
        if let Some(i) = d.to_i64() {
            return serde_json::Value::Number(i.into());
        }
        if let Some(u) = d.to_u64() {
            return serde_json::Value::Number(u.into());
        }
    }
    d.to_f64().map_or(serde_json::Value::Null, float_to_json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_unsigned_becomes_decimal() {
        let value = parse("18446744073709551615").unwrap();
        assert_eq!(value, Value::Decimal(Decimal::from(u64::MAX)));
        assert_eq!(to_json(&value), serde_json::json!(18446744073709551615u64));
    }

    #[test]
    fn render_uses_requested_indent() {
        let value = Value::object([("a", Value::from(1))]);
        assert_eq!(render(&value, 4).unwrap(), "{\n    \"a\": 1\n}\n");
    }
}
