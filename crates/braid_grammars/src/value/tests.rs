use super::*;

#[test]
fn test_display_scalars() {
    assert_eq!(Value::Number(1.0).to_string(), "1.0");
    assert_eq!(Value::Number(-0.0523).to_string(), "-0.0523");
    assert_eq!(Value::Bool(false).to_string(), "false");
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::Str("a\"b".to_string()).to_string(), "\"a\\\"b\"");
}

#[test]
fn test_display_nested() {
    let value = Value::List(vec![
        Value::Number(1.0),
        Value::object([("b", Value::Null), ("a", Value::List(vec![]))]),
    ]);
    assert_eq!(value.to_string(), "[1.0, {\"a\": [], \"b\": null}]");
}

#[test]
fn test_object_equality_ignores_order() {
    let left = Value::object([("x", Value::Bool(true)), ("y", Value::Null)]);
    let right = Value::object([("y", Value::Null), ("x", Value::Bool(true))]);
    assert_eq!(left, right);
}

#[test]
fn test_kind() {
    assert_eq!(Value::from('a').kind(), "char");
    assert_eq!(Value::object(Vec::<(String, Value)>::new()).kind(), "object");
}
