//! YAML <-> Value conversion

use base64::{Engine, engine::general_purpose::STANDARD};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde_yaml::value::{Tag, TaggedValue};
use tracing::debug;

use super::FormatError;
use crate::value::{Key, Value};

/// Local tag for byte strings. serde_yaml writes every tag in `!name` form.
const BINARY_TAG: &str = "!binary";

pub fn parse(input: &str) -> Result<Value, FormatError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(input)?;
    Ok(from_yaml(yaml))
}

pub fn render(value: &Value) -> Result<String, FormatError> {
    Ok(serde_yaml::to_string(&to_yaml(value))?)
}

pub fn from_yaml(v: serde_yaml::Value) -> Value {
    match v {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Boolean(b),
        serde_yaml::Value::Number(n) => from_number(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => Value::Array(seq.into_iter().map(from_yaml).collect()),
        serde_yaml::Value::Mapping(mapping) => Value::Object(
            mapping
                .into_iter()
                .map(|(k, v)| (from_key(k), from_yaml(v)))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => from_tagged(*tagged),
    }
}

fn from_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Integer(i)
    } else if let Some(u) = n.as_u64() {
        Value::Decimal(Decimal::from(u))
    } else {
        n.as_f64().map_or(Value::Null, Value::Float)
    }
}

/// `!binary` scalars decode to bytes; any other tag is dropped and the
/// inner value kept.
///
/// serde_yaml resolves the core `!!binary` shorthand and drops it before a
/// `Tagged` value is built, so only the local tag reaches this point.
fn from_tagged(tagged: TaggedValue) -> Value {
    let TaggedValue { tag, value } = tagged;
    if tag == BINARY_TAG {
        if let serde_yaml::Value::String(encoded) = &value {
            let compact: String = encoded.split_whitespace().collect();
            match STANDARD.decode(compact) {
                Ok(bytes) => return Value::Bytes(bytes),
                Err(err) => debug!(%err, "binary scalar is not valid base64, keeping text"),
            }
        }
    }
    from_yaml(value)
}

/// Integer and boolean keys survive as such; other non-string keys are
/// written out as text.
fn from_key(k: serde_yaml::Value) -> Key {
    match k {
        serde_yaml::Value::String(s) => Key::String(s),
        serde_yaml::Value::Bool(b) => Key::Boolean(b),
        serde_yaml::Value::Number(n) => match n.as_i64() {
            Some(i) => Key::Integer(i),
            None => Key::String(n.to_string()),
        },
        serde_yaml::Value::Null => Key::String("null".to_string()),
        other => Key::String(
            serde_yaml::to_string(&other)
                .map(|s| s.trim_end().to_string())
                .unwrap_or_default(),
        ),
    }
}

pub fn to_yaml(v: &Value) -> serde_yaml::Value {
    match v {
        Value::Null => serde_yaml::Value::Null,
        Value::Boolean(b) => serde_yaml::Value::Bool(*b),
        Value::Integer(i) => serde_yaml::Value::Number((*i).into()),
        Value::Float(f) => serde_yaml::Value::Number((*f).into()),
        Value::Decimal(d) => decimal_to_yaml(d),
        Value::String(s) => serde_yaml::Value::String(s.clone()),
        Value::Temporal(t) => serde_yaml::Value::String(t.to_string()),
        Value::Bytes(b) => serde_yaml::Value::Tagged(Box::new(TaggedValue {
            tag: Tag::new(BINARY_TAG),
            value: serde_yaml::Value::String(STANDARD.encode(b)),
        })),
        Value::Array(items) => serde_yaml::Value::Sequence(items.iter().map(to_yaml).collect()),
        Value::Object(map) => serde_yaml::Value::Mapping(
            map.iter()
                .map(|(k, v)| (to_yaml_key(k), to_yaml(v)))
                .collect(),
        ),
    }
}

fn to_yaml_key(k: &Key) -> serde_yaml::Value {
    match k {
        Key::String(s) => serde_yaml::Value::String(s.clone()),
        Key::Integer(i) => serde_yaml::Value::Number((*i).into()),
        Key::Boolean(b) => serde_yaml::Value::Bool(*b),
    }
}

fn decimal_to_yaml(d: &Decimal) -> serde_yaml::Value {
    if d.fract().is_zero() {
        if let Some(i) = d.to_i64() {
            return serde_yaml::Value::Number(i.into());
        }
        if let Some(u) = d.to_u64() {
            return serde_yaml::Value::Number(u.into());
        }
    }
    d.to_f64()
        .map_or(serde_yaml::Value::Null, |f| serde_yaml::Value::Number(f.into()))
}
