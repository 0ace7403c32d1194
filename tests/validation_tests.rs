// tests/validation_tests.rs

use chrono::NaiveDate;
use dataconv::formats::FileFormat;
use dataconv::validation::{
    JsonValidator, Severity, TomlValidator, ValidationError, Validator, XmlValidator,
    YamlValidator, validate, validate_format,
};
use dataconv::value::{Key, Map, Temporal, Value};
use rust_decimal::Decimal;

fn json_object(pairs: Vec<(&str, Value)>) -> Value {
    Value::object(pairs)
}

fn json_array(values: Vec<Value>) -> Value {
    Value::Array(values)
}

fn clean_doc() -> Value {
    json_object(vec![
        ("name", Value::from("John")),
        ("age", Value::from(30)),
        ("score", Value::from(91.5)),
        ("active", Value::from(true)),
        ("email", Value::Null),
        (
            "tags",
            json_array(vec![Value::from("a"), Value::from("b")]),
        ),
        ("address", json_object(vec![("city", Value::from("Paris"))])),
    ])
}

fn date() -> Value {
    Value::Temporal(Temporal::Date(
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    ))
}

fn with_int_key() -> Value {
    let mut map = Map::new();
    map.insert(Key::Integer(1), Value::from("one"));
    json_object(vec![("lookup", Value::Object(map))])
}

// ============================================================================
// Clean documents
// ============================================================================

#[test]
fn test_clean_document_passes_everywhere() {
    for format in FileFormat::ALL {
        let result = validate_format(&clean_doc(), format);
        assert!(result.errors.is_empty(), "errors for {}", format);
        assert!(result.warnings.is_empty(), "warnings for {}", format);
        assert!(result.is_valid());
    }
}

// ============================================================================
// Non-finite floats
// ============================================================================

#[test]
fn test_non_finite_float_reported_at_exact_path() {
    let doc = json_object(vec![(
        "data",
        json_array(vec![
            json_object(vec![("x", Value::from(1.0))]),
            json_object(vec![("x", Value::Float(f64::INFINITY))]),
        ]),
    )]);

    for format in [FileFormat::Json, FileFormat::Toml, FileFormat::Yaml] {
        let result = validate_format(&doc, format);
        assert_eq!(result.errors.len(), 1, "format {}", format);
        assert_eq!(result.errors[0].path, "$.data[1].x");
        assert_eq!(result.errors[0].message, "non-finite float inf");
        assert_eq!(result.errors[0].severity, Severity::Error);
        assert!(result.warnings.is_empty(), "format {}", format);
    }
}

#[test]
fn test_nan_at_root() {
    let result = JsonValidator.validate(&Value::Float(f64::NAN));
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].path, "$");
    assert_eq!(result.errors[0].message, "non-finite float NaN");
}

#[test]
fn test_xml_accepts_non_finite_floats() {
    let result = XmlValidator.validate(&json_object(vec![("x", Value::Float(f64::NAN))]));
    assert!(result.is_valid());
}

// ============================================================================
// TOML arrays
// ============================================================================

#[test]
fn test_mixed_toml_array_warns() {
    let doc = json_object(vec![(
        "mixed",
        json_array(vec![Value::from(1), Value::from("s"), Value::from(true)]),
    )]);
    let result = TomlValidator.validate(&doc);
    assert!(result.is_valid());
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].path, "$.mixed");
    assert_eq!(result.warnings[0].severity, Severity::Warning);
    assert_eq!(
        result.warnings[0].message,
        "all elements in list must be of the same type (TOML requirement)"
    );
}

#[test]
fn test_uniform_and_empty_toml_arrays() {
    let doc = json_object(vec![
        ("empty", json_array(vec![])),
        ("ints", json_array(vec![Value::from(1), Value::from(2)])),
        (
            "tables",
            json_array(vec![
                json_object(vec![("a", Value::from(1))]),
                json_object(vec![("b", Value::from("x"))]),
            ]),
        ),
    ]);
    let result = TomlValidator.validate(&doc);
    assert!(result.warnings.is_empty());
    assert!(result.errors.is_empty());
}

#[test]
fn test_nested_mixed_arrays_warn_at_each_level() {
    let doc = json_object(vec![(
        "outer",
        json_array(vec![
            json_array(vec![Value::from(1), Value::from("x")]),
            Value::from(2),
        ]),
    )]);
    let result = TomlValidator.validate(&doc);
    let paths: Vec<&str> = result.warnings.iter().map(|w| w.path.as_str()).collect();
    assert_eq!(paths, vec!["$.outer", "$.outer[0]"]);
}

#[test]
fn test_json_never_warns_on_mixed_arrays() {
    let doc = json_array(vec![Value::from(1), Value::from("s")]);
    assert!(JsonValidator.validate(&doc).warnings.is_empty());
}

// ============================================================================
// Keys
// ============================================================================

#[test]
fn test_non_string_keys() {
    let doc = with_int_key();

    let json = JsonValidator.validate(&doc);
    assert_eq!(json.errors.len(), 1);
    assert_eq!(json.errors[0].path, "$.lookup");
    assert_eq!(json.errors[0].message, "non-string key 1");

    let toml = TomlValidator.validate(&doc);
    assert_eq!(toml.errors.len(), 1);

    let yaml = YamlValidator.validate(&doc);
    assert!(yaml.is_valid());
    assert_eq!(yaml.warnings.len(), 1);
    assert_eq!(yaml.warnings[0].path, "$.lookup");
    assert_eq!(
        yaml.warnings[0].message,
        "non-string key 1. Not recommended for YAML"
    );

    let xml = XmlValidator.validate(&doc);
    assert_eq!(xml.errors.len(), 1);
    assert_eq!(
        xml.errors[0].message,
        "non-string key 1 (XML tag/attr must be str)"
    );
}

#[test]
fn test_children_of_bad_keys_are_still_walked() {
    let mut map = Map::new();
    map.insert(Key::Boolean(true), Value::Float(f64::NAN));
    let result = JsonValidator.validate(&Value::Object(map));
    let paths: Vec<&str> = result.errors.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["$", "$.true"]);
}

// ============================================================================
// Rich leaves
// ============================================================================

#[test]
fn test_temporal_support() {
    let doc = json_object(vec![("when", date())]);
    assert!(!JsonValidator.validate(&doc).is_valid());
    assert!(TomlValidator.validate(&doc).is_valid());
    assert!(YamlValidator.validate(&doc).is_valid());
    assert!(XmlValidator.validate(&doc).is_valid());
}

#[test]
fn test_decimal_support() {
    let doc = json_object(vec![("price", Value::Decimal(Decimal::new(1999, 2)))]);
    let json = JsonValidator.validate(&doc);
    assert_eq!(json.errors.len(), 1);
    assert_eq!(json.errors[0].path, "$.price");
    assert!(json.errors[0].message.contains("is not a valid JSON value"));

    assert!(!TomlValidator.validate(&doc).is_valid());
    assert!(YamlValidator.validate(&doc).is_valid());
    assert!(XmlValidator.validate(&doc).is_valid());
}

#[test]
fn test_bytes_support() {
    let text = json_object(vec![("blob", Value::Bytes(b"hello".to_vec()))]);
    let binary = json_object(vec![("blob", Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef]))]);

    for validator in [&JsonValidator as &dyn Validator, &TomlValidator, &YamlValidator] {
        assert_eq!(validator.validate(&text).errors.len(), 1);
        assert_eq!(validator.validate(&binary).errors.len(), 1);
    }
    assert!(XmlValidator.validate(&text).is_valid());
    assert_eq!(XmlValidator.validate(&binary).errors[0].path, "$.blob");
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_dispatch_by_tag() {
    let doc = json_object(vec![("when", date())]);
    assert!(!validate(&doc, "json").unwrap().is_valid());
    assert!(validate(&doc, "toml").unwrap().is_valid());
    assert!(validate(&doc, "yaml").unwrap().is_valid());
    assert!(validate(&doc, "yml").unwrap().is_valid());
    assert!(validate(&doc, "xml").unwrap().is_valid());
}

#[test]
fn test_unknown_tags() {
    for tag in ["csv", "JSON", "", "Yaml"] {
        assert_eq!(
            validate(&Value::Null, tag),
            Err(ValidationError::UnsupportedFormat(tag.to_string())),
            "tag {:?}",
            tag
        );
    }
}

// ============================================================================
// Report
// ============================================================================

#[test]
fn test_report_lists_issues() {
    let doc = json_object(vec![
        ("bad", Value::Float(f64::NAN)),
        ("mixed", json_array(vec![Value::from(1), Value::from("s")])),
    ]);
    let report = TomlValidator.validate(&doc).to_string();
    assert!(report.starts_with("[X] Validation Errors:\n  • [$.bad] non-finite float NaN"));
    assert!(report.contains("[!] Validation Warnings:\n  • [$.mixed]"));
}

#[test]
fn test_report_for_clean_document() {
    let report = JsonValidator.validate(&clean_doc()).to_string();
    assert_eq!(report, "[+] Validation passed - no issues found");
}
