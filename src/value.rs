use std::{cmp::Ordering, fmt};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use rust_decimal::{Decimal, prelude::ToPrimitive};

/// Ordered mapping used for objects. Insertion order is the document order.
pub type Map = IndexMap<Key, Value>;

/// A document value shared by every stage of a conversion.
///
/// Loaders build it, the path evaluator and filter engine read it, the
/// validators walk it and the serializers write it out. It is never
/// mutated in place; extraction produces copies.
///
/// # Number representation
///
/// Numbers keep the distinction the target formats care about:
/// - `Integer` for whole numbers that fit in `i64`
/// - `Float` for binary floating point (may be non-finite)
/// - `Decimal` for exact values that fit neither, e.g. `u64::MAX`
///
/// # Examples
///
/// ```
/// use dataconv::Value;
///
/// let doc = Value::object([
///     ("name", Value::from("John")),
///     ("age", Value::from(30)),
/// ]);
///
/// assert_eq!(doc.get("name"), Some(&Value::from("John")));
/// assert!(doc.get("email").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null / absent value
    Null,

    /// Boolean (true/false)
    Boolean(bool),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// Exact decimal number
    Decimal(Decimal),

    /// UTF-8 string
    String(String),

    /// Date, time or date-time leaf (TOML datetimes)
    Temporal(Temporal),

    /// Raw binary data (YAML `!!binary`)
    Bytes(Vec<u8>),

    /// Ordered sequence of values
    Array(Vec<Value>),

    /// Mapping with ordered keys
    Object(Map),
}

/// Mapping key.
///
/// Most formats only have string keys, YAML also allows integers and
/// booleans. Validators report non-string keys for targets that reject them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    String(String),
    Integer(i64),
    Boolean(bool),
}

/// Calendar and clock values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporal {
    Date(NaiveDate),
    Time(NaiveTime),
    LocalDateTime(NaiveDateTime),
    OffsetDateTime(DateTime<FixedOffset>),
}

/// Coarse value kind, used where only the shape matters (array
/// homogeneity, diagnostics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    Decimal,
    String,
    Temporal,
    Bytes,
    Array,
    Object,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Decimal => "decimal",
            ValueKind::String => "string",
            ValueKind::Temporal => "temporal",
            ValueKind::Bytes => "bytes",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl Value {
    /// Build an object from `(key, value)` pairs, keeping their order.
    pub fn object<K, I>(pairs: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::String(_) => ValueKind::String,
            Value::Temporal(_) => ValueKind::Temporal,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Human-readable kind name for diagnostics
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Look up a string key on an object. Anything else yields `None`.
    pub fn get(&self, field: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(&Key::String(field.to_string())),
            _ => None,
        }
    }

    /// Get as float, for any of the three numeric kinds
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::Decimal(d) => d.to_f64(),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_) | Value::Decimal(_))
    }

    /// Structural equality with numeric coercion: `30 == 30.0`.
    pub fn loose_eq(&self, other: &Value) -> bool {
        if self.is_number() && other.is_number() {
            return match (self.as_float(), other.as_float()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            };
        }
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y))
            }
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get(k).is_some_and(|other| v.loose_eq(other)))
            }
            (a, b) => a == b,
        }
    }

    /// Ordering between comparable values, `None` when the kinds don't
    /// order against each other (object vs anything, string vs number...).
    pub fn loose_cmp(&self, other: &Value) -> Option<Ordering> {
        if self.is_number() && other.is_number() {
            return self.as_float()?.partial_cmp(&other.as_float()?);
        }
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Bytes(a), Value::Bytes(b)) => Some(a.cmp(b)),
            (Value::Temporal(a), Value::Temporal(b)) => a.compare(b),
            (Value::Array(a), Value::Array(b)) => {
                for (x, y) in a.iter().zip(b) {
                    match x.loose_cmp(y)? {
                        Ordering::Equal => continue,
                        ord => return Some(ord),
                    }
                }
                Some(a.len().cmp(&b.len()))
            }
            _ => None,
        }
    }

    /// Text form of a leaf, as written into XML and diagnostics.
    ///
    /// Returns `None` for containers and for bytes that are not UTF-8.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Null => Some(String::new()),
            Value::Boolean(b) => Some(b.to_string()),
            Value::Integer(n) => Some(n.to_string()),
            Value::Float(n) => Some(n.to_string()),
            Value::Decimal(d) => Some(d.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::Temporal(t) => Some(t.to_string()),
            Value::Bytes(b) => std::str::from_utf8(b).ok().map(str::to_string),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl Temporal {
    /// Only values of the same variant order against each other.
    pub fn compare(&self, other: &Temporal) -> Option<Ordering> {
        match (self, other) {
            (Temporal::Date(a), Temporal::Date(b)) => Some(a.cmp(b)),
            (Temporal::Time(a), Temporal::Time(b)) => Some(a.cmp(b)),
            (Temporal::LocalDateTime(a), Temporal::LocalDateTime(b)) => Some(a.cmp(b)),
            (Temporal::OffsetDateTime(a), Temporal::OffsetDateTime(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temporal::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Temporal::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
            Temporal::LocalDateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Temporal::OffsetDateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::String(s) => f.write_str(s),
            Key::Integer(n) => write!(f, "{}", n),
            Key::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: {}", k.to_string(), v)?;
                }
                f.write_str("}")
            }
            leaf => match leaf.as_text() {
                Some(text) => f.write_str(&text),
                None => Ok(()),
            },
        }
    }
}

impl Key {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::String(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::String(s)
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Integer(n)
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<Temporal> for Value {
    fn from(t: Temporal) -> Self {
        Value::Temporal(t)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_across_kinds() {
        assert!(Value::Integer(30).loose_eq(&Value::Float(30.0)));
        assert!(Value::Decimal(Decimal::new(305, 1)).loose_eq(&Value::Float(30.5)));
        assert_eq!(
            Value::Float(30.5).loose_cmp(&Value::Integer(30)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn mismatched_kinds_do_not_order() {
        assert_eq!(Value::from("a").loose_cmp(&Value::Integer(1)), None);
        assert_eq!(Value::object([("a", Value::Null)]).loose_cmp(&Value::Null), None);
        assert!(!Value::from("1").loose_eq(&Value::Integer(1)));
    }

    #[test]
    fn object_equality_ignores_order() {
        let a = Value::object([("x", Value::from(1)), ("y", Value::from(2.0))]);
        let b = Value::object([("y", Value::from(2)), ("x", Value::from(1))]);
        assert!(a.loose_eq(&b));
    }

    #[test]
    fn bytes_text_requires_utf8() {
        assert_eq!(Value::Bytes(b"hi".to_vec()).as_text(), Some("hi".to_string()));
        assert_eq!(Value::Bytes(vec![0xff, 0xfe]).as_text(), None);
    }
}
