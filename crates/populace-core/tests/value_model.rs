use chrono::{NaiveDate, NaiveDateTime};

use populace_core::{FieldKind, Scalar, Value};

fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .expect("valid date")
        .and_hms_opt(12, 0, 0)
        .expect("valid time")
}

#[test]
fn values_report_their_kind() {
    assert_eq!(Value::Bool(true).kind(), FieldKind::Bool);
    assert_eq!(Value::Short(1).kind(), FieldKind::Short);
    assert_eq!(Value::Int(1).kind(), FieldKind::Int);
    assert_eq!(Value::Long(1).kind(), FieldKind::Long);
    assert_eq!(Value::Text("x".to_string()).kind(), FieldKind::Text);
    assert_eq!(Value::Timestamp(noon()).kind(), FieldKind::Timestamp);
}

#[test]
fn only_numeric_and_temporal_kinds_are_rangeable() {
    assert!(FieldKind::Short.is_rangeable());
    assert!(FieldKind::Int.is_rangeable());
    assert!(FieldKind::Long.is_rangeable());
    assert!(FieldKind::Timestamp.is_rangeable());
    assert!(!FieldKind::Bool.is_rangeable());
    assert!(!FieldKind::Text.is_rangeable());
}

#[test]
fn integral_accessor_widens_smaller_kinds() {
    assert_eq!(Value::Short(3).as_i64(), Some(3));
    assert_eq!(Value::Int(3).as_i64(), Some(3));
    assert_eq!(Value::Long(3).as_i64(), Some(3));
    assert_eq!(Value::Text("3".to_string()).as_i64(), None);
}

#[test]
fn scalar_conversions_respect_declared_kinds() {
    assert_eq!(i64::from_value(&Value::Int(5)), Some(5));
    assert_eq!(i32::from_value(&Value::Short(5)), Some(5));
    assert_eq!(i16::from_value(&Value::Int(5)), None);
    assert_eq!(bool::from_value(&Value::Long(1)), None);
    assert_eq!(
        String::from_value(&Value::Text("batman".to_string())),
        Some("batman".to_string())
    );
    assert_eq!(NaiveDateTime::from_value(&Value::Timestamp(noon())), Some(noon()));
}

#[test]
fn values_round_trip_through_serde() {
    let values = vec![
        Value::Bool(false),
        Value::Short(-2),
        Value::Int(1000),
        Value::Long(15050),
        Value::Text("proximity".to_string()),
        Value::Timestamp(noon()),
    ];
    let json = serde_json::to_string(&values).expect("serializes");
    let decoded: Vec<Value> = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(decoded, values);
}
