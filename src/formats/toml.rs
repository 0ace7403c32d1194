//! TOML <-> Value conversion

use chrono::{FixedOffset, NaiveDate, NaiveTime};
use rust_decimal::prelude::ToPrimitive;

use super::{FileFormat, FormatError};
use crate::value::{Map, Temporal, Value};

pub fn parse(input: &str) -> Result<Value, FormatError> {
    let table: ::toml::Table = ::toml::from_str(input)?;
    Ok(from_table(table))
}

/// Write a mapping root as a TOML document.
///
/// Null entries in tables are left out; TOML has no null.
pub fn render(value: &Value) -> Result<String, FormatError> {
    let Value::Object(map) = value else {
        return Err(FormatError::unrepresentable(
            FileFormat::Toml,
            format!("document root must be a table, got {}", value.type_name()),
        ));
    };
    let table = to_table(map)?;
    Ok(::toml::to_string(&::toml::Value::Table(table))?)
}

fn from_table(table: ::toml::Table) -> Value {
    Value::Object(
        table
            .into_iter()
            .map(|(k, v)| (k.into(), from_toml(v)))
            .collect(),
    )
}

pub fn from_toml(v: ::toml::Value) -> Value {
    match v {
        ::toml::Value::String(s) => Value::String(s),
        ::toml::Value::Integer(i) => Value::Integer(i),
        ::toml::Value::Float(f) => Value::Float(f),
        ::toml::Value::Boolean(b) => Value::Boolean(b),
        ::toml::Value::Datetime(dt) => from_datetime(&dt),
        ::toml::Value::Array(arr) => Value::Array(arr.into_iter().map(from_toml).collect()),
        ::toml::Value::Table(table) => from_table(table),
    }
}

/// Map a TOML datetime onto the matching [`Temporal`] variant. Values
/// chrono can't represent stay strings.
fn from_datetime(dt: &::toml::value::Datetime) -> Value {
    let date = dt
        .date
        .and_then(|d| NaiveDate::from_ymd_opt(d.year.into(), d.month.into(), d.day.into()));
    let time = dt.time.and_then(|t| {
        NaiveTime::from_hms_nano_opt(t.hour.into(), t.minute.into(), t.second.into(), t.nanosecond)
    });
    let offset = dt.offset.map(|offset| match offset {
        ::toml::value::Offset::Z => FixedOffset::east_opt(0),
        ::toml::value::Offset::Custom { minutes } => FixedOffset::east_opt(i32::from(minutes) * 60),
    });

    let temporal = match (dt.date.is_some(), dt.time.is_some(), offset) {
        (true, true, Some(offset)) => date
            .zip(time)
            .zip(offset)
            .and_then(|((d, t), o)| d.and_time(t).and_local_timezone(o).single())
            .map(Temporal::OffsetDateTime),
        (true, true, None) => date.zip(time).map(|(d, t)| Temporal::LocalDateTime(d.and_time(t))),
        (true, false, _) => date.map(Temporal::Date),
        (false, true, _) => time.map(Temporal::Time),
        (false, false, _) => None,
    };

    temporal.map_or_else(|| Value::String(dt.to_string()), Value::Temporal)
}

fn to_table(map: &Map) -> Result<::toml::Table, FormatError> {
    let mut table = ::toml::Table::new();
    for (key, value) in map {
        if let Some(v) = to_toml(value)? {
            table.insert(key.to_string(), v);
        }
    }
    Ok(table)
}

/// `None` for null, which tables skip and arrays reject.
fn to_toml(v: &Value) -> Result<Option<::toml::Value>, FormatError> {
    let converted = match v {
        Value::Null => return Ok(None),
        Value::Boolean(b) => ::toml::Value::Boolean(*b),
        Value::Integer(i) => ::toml::Value::Integer(*i),
        Value::Float(f) => ::toml::Value::Float(*f),
        Value::Decimal(d) => match d.to_i64().filter(|_| d.fract().is_zero()) {
            Some(i) => ::toml::Value::Integer(i),
            None => ::toml::Value::Float(d.to_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => ::toml::Value::String(s.clone()),
        Value::Temporal(t) => {
            let datetime = t.to_string().parse::<::toml::value::Datetime>().map_err(|e| {
                FormatError::unrepresentable(FileFormat::Toml, format!("datetime {}: {}", t, e))
            })?;
            ::toml::Value::Datetime(datetime)
        }
        Value::Bytes(_) => {
            return Err(FormatError::unrepresentable(
                FileFormat::Toml,
                "binary data has no TOML representation",
            ));
        }
        Value::Array(items) => {
            let mut array = Vec::with_capacity(items.len());
            for item in items {
                let converted = to_toml(item)?.ok_or_else(|| {
                    FormatError::unrepresentable(FileFormat::Toml, "null inside an array")
                })?;
                array.push(converted);
            }
            ::toml::Value::Array(array)
        }
        Value::Object(map) => ::toml::Value::Table(to_table(map)?),
    };
    Ok(Some(converted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datetimes_become_temporals() {
        let value = parse(
            "born = 1979-05-27\nalarm = 07:32:00\nlocal = 1979-05-27T07:32:00\nat = 1979-05-27T07:32:00Z\n",
        )
        .unwrap();
        assert!(matches!(value.get("born"), Some(Value::Temporal(Temporal::Date(_)))));
        assert!(matches!(value.get("alarm"), Some(Value::Temporal(Temporal::Time(_)))));
        assert!(matches!(
            value.get("local"),
            Some(Value::Temporal(Temporal::LocalDateTime(_)))
        ));
        assert!(matches!(
            value.get("at"),
            Some(Value::Temporal(Temporal::OffsetDateTime(_)))
        ));
    }

    #[test]
    fn null_entries_are_skipped() {
        let value = Value::object([("a", Value::from(1)), ("b", Value::Null)]);
        assert_eq!(render(&value).unwrap(), "a = 1\n");
    }

    #[test]
    fn sequence_root_is_rejected() {
        assert!(matches!(
            render(&Value::Array(vec![])),
            Err(FormatError::Unrepresentable { format: FileFormat::Toml, .. })
        ));
    }
}
