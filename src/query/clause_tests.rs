use super::*;
use chrono::TimeZone;

#[test]
fn scalar_clause_serializes_to_exact_wire_shape() {
    let clause = FilterClause::scalar("host", ScalarOp::Eq, "10.0.0.1");
    let json = serde_json::to_string(&clause).unwrap();
    assert_eq!(
        json,
        r#"{"parameter":"host","operator":"eq","value":"10.0.0.1"}"#
    );
}

#[test]
fn vector_clause_serializes_values_array() {
    let clause = FilterClause::vector(
        "port",
        VectorOp::In,
        [ScalarValue::Int(22), ScalarValue::Int(80)],
    );
    let json = serde_json::to_string(&clause).unwrap();
    assert_eq!(
        json,
        r#"{"parameter":"port","operator":"in","values":[22,80]}"#
    );
}

#[test]
fn negated_operators_use_space_separated_spelling() {
    assert_eq!(
        serde_json::to_string(&ScalarOp::NotLike).unwrap(),
        r#""not like""#
    );
    assert_eq!(
        serde_json::to_string(&VectorOp::NotIn).unwrap(),
        r#""not in""#
    );
}

#[test]
fn all_scalar_operators_serialize_to_wire_names() {
    let cases = [
        (ScalarOp::Eq, "eq"),
        (ScalarOp::Neq, "neq"),
        (ScalarOp::Gt, "gt"),
        (ScalarOp::Lt, "lt"),
        (ScalarOp::Like, "like"),
        (ScalarOp::Regex, "regex"),
    ];
    for (op, expected) in cases {
        assert_eq!(
            serde_json::to_string(&op).unwrap(),
            format!("\"{expected}\"")
        );
    }
}

#[test]
fn scalar_values_serialize_untagged() {
    assert_eq!(
        serde_json::to_string(&ScalarValue::from("ssh")).unwrap(),
        r#""ssh""#
    );
    assert_eq!(serde_json::to_string(&ScalarValue::from(443u16)).unwrap(), "443");
    assert_eq!(serde_json::to_string(&ScalarValue::from(true)).unwrap(), "true");
    assert_eq!(serde_json::to_string(&ScalarValue::from(0.5)).unwrap(), "0.5");
}

#[test]
fn date_values_serialize_as_rfc3339() {
    let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let clause = FilterClause::scalar("last_seen", ScalarOp::Gt, date);
    let json = serde_json::to_value(&clause).unwrap();
    let value = json["value"].as_str().unwrap();
    assert!(value.starts_with("2024-03-01T12:00:00"), "got {value}");
}

#[test]
fn clause_equality_is_structural() {
    let a = FilterClause::scalar("host", ScalarOp::Eq, "10.0.0.1");
    let b = FilterClause::scalar("host", ScalarOp::Eq, "10.0.0.1");
    let c = FilterClause::scalar("host", ScalarOp::Neq, "10.0.0.1");
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn clause_field_accessor_covers_both_shapes() {
    let scalar = FilterClause::scalar("host", ScalarOp::Eq, "x");
    let vector = FilterClause::vector("port", VectorOp::NotIn, [ScalarValue::Int(23)]);
    assert_eq!(scalar.field(), "host");
    assert_eq!(vector.field(), "port");
}

#[test]
fn sort_clause_serializes_parameter_and_direction() {
    let clause = SortClause::new("port", SortDirection::Desc);
    let json = serde_json::to_string(&clause).unwrap();
    assert_eq!(json, r#"{"parameter":"port","direction":"desc"}"#);
}

#[test]
fn sort_direction_toggles() {
    assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
    assert_eq!(SortDirection::Desc.toggled(), SortDirection::Asc);
}
