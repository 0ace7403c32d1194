// tests/filter_tests.rs

use dataconv::evaluator::{ProcessorError, apply_conditions, evaluate_condition, process};
use dataconv::query::{Condition, Literal};
use dataconv::value::Value;

fn json_object(pairs: Vec<(&str, Value)>) -> Value {
    Value::object(pairs)
}

fn json_array(values: Vec<Value>) -> Value {
    Value::Array(values)
}

fn condition(field: &str, op: &str, value: impl Into<Literal>) -> Condition {
    Condition::new(field, op, value).unwrap()
}

fn person(age: i64, active: bool) -> Value {
    json_object(vec![("age", Value::Integer(age)), ("active", Value::Boolean(active))])
}

// ============================================================================
// evaluate_condition
// ============================================================================

#[test]
fn test_numbers_compare_across_kinds() {
    assert!(evaluate_condition(&Value::Integer(30), "==", &Literal::Number(30.0)).unwrap());
    assert!(evaluate_condition(&Value::Float(30.5), ">", &Literal::Number(30.0)).unwrap());
    assert!(evaluate_condition(&Value::Integer(25), "<=", &Literal::Number(25.0)).unwrap());
    assert!(!evaluate_condition(&Value::Integer(25), "!=", &Literal::Number(25.0)).unwrap());
}

#[test]
fn test_null_handling() {
    assert!(evaluate_condition(&Value::Null, "==", &Literal::Null).unwrap());
    assert!(!evaluate_condition(&Value::Null, "!=", &Literal::Null).unwrap());
    assert!(!evaluate_condition(&Value::Null, ">", &Literal::Number(5.0)).unwrap());
    assert!(!evaluate_condition(&Value::Null, "<", &Literal::Number(5.0)).unwrap());
    assert!(!evaluate_condition(&Value::Integer(5), ">=", &Literal::Null).unwrap());
    assert!(evaluate_condition(&Value::Integer(5), "!=", &Literal::Null).unwrap());
    assert!(!evaluate_condition(&Value::Integer(5), "==", &Literal::Null).unwrap());
}

#[test]
fn test_string_comparisons() {
    let active = Value::from("active");
    assert!(evaluate_condition(&active, "==", &Literal::from("active")).unwrap());
    assert!(evaluate_condition(&active, "!=", &Literal::from("inactive")).unwrap());
    assert!(evaluate_condition(&Value::from("b"), ">", &Literal::from("a")).unwrap());
}

#[test]
fn test_type_mismatch_is_false() {
    assert!(!evaluate_condition(&Value::from("30"), ">", &Literal::Number(5.0)).unwrap());
    assert!(!evaluate_condition(&Value::from("30"), "==", &Literal::Number(30.0)).unwrap());
    assert!(evaluate_condition(&Value::from("30"), "!=", &Literal::Number(30.0)).unwrap());
}

#[test]
fn test_booleans_are_not_numbers() {
    assert!(!evaluate_condition(&Value::Boolean(true), "==", &Literal::Number(1.0)).unwrap());
    assert!(evaluate_condition(&Value::Boolean(true), "==", &Literal::Boolean(true)).unwrap());
    assert!(evaluate_condition(&Value::Boolean(true), ">", &Literal::Boolean(false)).unwrap());
}

#[test]
fn test_containers_never_order() {
    let list = json_array(vec![Value::from(1)]);
    assert!(!evaluate_condition(&list, ">", &Literal::Number(0.0)).unwrap());
    assert!(!evaluate_condition(&json_object(vec![]), "<", &Literal::from("x")).unwrap());
}

#[test]
fn test_unsupported_operator() {
    assert_eq!(
        evaluate_condition(&Value::Integer(1), "=~", &Literal::Number(1.0)),
        Err(ProcessorError::UnsupportedOperator("=~".to_string()))
    );
    assert!(Condition::new("age", "=>", 1).is_err());
}

// ============================================================================
// apply_conditions
// ============================================================================

#[test]
fn test_and_combined_filter() {
    let records = json_array(vec![person(30, true), person(25, true)]);
    let conditions = vec![condition("age", ">=", 26), condition("active", "==", true)];

    let result = apply_conditions(records, &conditions);
    assert_eq!(result, json_array(vec![person(30, true)]));
}

#[test]
fn test_every_condition_must_hold() {
    let records = json_array(vec![person(30, false), person(40, true)]);
    let conditions = vec![condition("age", ">", 20), condition("active", "==", true)];

    let result = apply_conditions(records, &conditions);
    assert_eq!(result, json_array(vec![person(40, true)]));
}

#[test]
fn test_empty_conditions_pass_through() {
    let records = json_array(vec![person(30, true), person(25, false)]);
    assert_eq!(apply_conditions(records.clone(), &[]), records);

    let scalar = Value::from("not a list");
    assert_eq!(apply_conditions(scalar.clone(), &[]), scalar);
}

#[test]
fn test_missing_field_is_null() {
    let records = json_array(vec![
        json_object(vec![("name", Value::from("John")), ("email", Value::from("j@x.io"))]),
        json_object(vec![("name", Value::from("Jane"))]),
    ]);

    let without_email = apply_conditions(records.clone(), &[condition("email", "==", Literal::Null)]);
    assert_eq!(
        without_email,
        json_array(vec![json_object(vec![("name", Value::from("Jane"))])])
    );

    let ordered = apply_conditions(records, &[condition("age", ">", 0)]);
    assert_eq!(ordered, json_array(vec![]));
}

#[test]
fn test_single_object_is_wrapped() {
    let record = person(30, true);
    let result = apply_conditions(record.clone(), &[condition("age", ">", 18)]);
    assert_eq!(result, json_array(vec![record]));

    let dropped = apply_conditions(person(10, true), &[condition("age", ">", 18)]);
    assert_eq!(dropped, json_array(vec![]));
}

#[test]
fn test_scalar_degrades_to_empty() {
    let result = apply_conditions(Value::Integer(5), &[condition("age", ">", 1)]);
    assert_eq!(result, json_array(vec![]));
}

#[test]
fn test_non_object_elements_never_match() {
    let records = json_array(vec![Value::Integer(30), person(30, true), Value::Null]);
    let result = apply_conditions(records, &[condition("age", "==", 30)]);
    assert_eq!(result, json_array(vec![person(30, true)]));
}

#[test]
fn test_order_is_preserved() {
    let records = json_array(vec![person(50, true), person(10, true), person(30, true)]);
    let result = apply_conditions(records, &[condition("age", ">", 20)]);
    assert_eq!(result, json_array(vec![person(50, true), person(30, true)]));
}

// ============================================================================
// process
// ============================================================================

fn users_doc() -> Value {
    json_object(vec![(
        "users",
        json_array(vec![person(30, true), person(25, true), person(41, false)]),
    )])
}

#[test]
fn test_path_then_filter() {
    let result = process(
        &users_doc(),
        Some("users.*"),
        &[condition("age", ">=", 26), condition("active", "==", true)],
    )
    .unwrap();
    assert_eq!(result, json_array(vec![person(30, true)]));
}

#[test]
fn test_path_only() {
    let doc = json_object(vec![("name", Value::from("John"))]);
    assert_eq!(process(&doc, Some("name"), &[]).unwrap(), Value::from("John"));
}

#[test]
fn test_filter_without_path_wraps_root_object() {
    let doc = person(30, true);
    let result = process(&doc, None, &[condition("active", "==", true)]).unwrap();
    assert_eq!(result, json_array(vec![doc]));
}

#[test]
fn test_filter_after_scalar_path_is_empty() {
    let doc = json_object(vec![("name", Value::from("John"))]);
    let result = process(&doc, Some("name"), &[condition("name", "==", "John")]).unwrap();
    assert_eq!(result, json_array(vec![]));
}

#[test]
fn test_single_match_filtered_as_record() {
    let doc = json_object(vec![("users", json_array(vec![person(30, true)]))]);
    let result = process(&doc, Some("users.*"), &[condition("age", "==", 30)]).unwrap();
    assert_eq!(result, json_array(vec![person(30, true)]));
}

#[test]
fn test_invalid_path_fails_process() {
    assert!(matches!(
        process(&users_doc(), Some("users.*.age"), &[]),
        Err(ProcessorError::InvalidPath { .. })
    ));
}
