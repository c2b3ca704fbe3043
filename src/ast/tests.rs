use super::*;
use crate::parser::parse_str;
use pretty_assertions::assert_eq;

#[test]
fn test_default_is_null() {
    let value = Value::default();
    assert!(value.is_null());
    assert_eq!(value.kind(), Kind::Null);
    assert!(value.is_empty());
    assert_eq!(value.len(), 0);
}

#[test]
fn test_kind_predicates() {
    let value = parse_str(r#"[null, true, 1, "s", [], {}]"#).unwrap();
    let kinds: Vec<Kind> = value.array().unwrap().iter().map(Value::kind).collect();
    assert_eq!(
        kinds,
        vec![Kind::Null, Kind::Bool, Kind::Number, Kind::String, Kind::Array, Kind::Object]
    );
    assert_eq!(Kind::Bool.to_string(), "bool");
    assert!(value.array().unwrap()[3].is_string());
    assert!(value.array().unwrap()[5].is_object());
}

#[test]
fn test_coercion() {
    let value = parse_str(r#"{"i": 42, "r": 2.5, "s": "text", "b": true, "w": 2.0}"#).unwrap();

    assert_eq!(value.get("i").to::<i64>().unwrap(), 42);
    assert_eq!(value.get("i").to::<u8>().unwrap(), 42);
    assert_eq!(value.get("i").to::<f64>().unwrap(), 42.0);
    assert_eq!(value.get("r").to::<f64>().unwrap(), 2.5);
    assert_eq!(value.get("w").to::<usize>().unwrap(), 2);
    assert_eq!(value.get("s").to::<String>().unwrap(), "text");
    assert_eq!(value.get("s").to_str().unwrap(), "text");
    assert!(value.get("b").to::<bool>().unwrap());
}

#[test]
fn test_coercion_mismatch() {
    let value = parse_str(r#"{"s": "text", "n": -1, "r": 2.5}"#).unwrap();

    let err = value.get("s").to::<i32>().unwrap_err();
    assert_eq!(
        err,
        RjsonError::TypeMismatch {
            requested: "i32".into(),
            actual: "string{\"text\"}".into(),
            hint: None,
            code: Some(201),
        }
    );
    assert!(err.to_string().starts_with("[RJSON] value type mismatch, requested: i32, stored: string{\"text\"}"));

    assert!(matches!(value.get("n").to::<u32>(), Err(RjsonError::TypeMismatch { code: Some(202), .. })));
    assert!(value.get("r").to::<i64>().is_err());
    assert!(value.get("n").to::<bool>().is_err());
    assert!(value.get("missing").to::<String>().is_err());
}

#[test]
fn test_views_require_matching_kind() {
    let value = parse_str(r#"{"list": [1, 2], "text": "abc"}"#).unwrap();
    assert_eq!(value.object().unwrap().len(), 2);
    assert!(value.array().is_err());
    assert_eq!(value.get("list").array().unwrap().len(), 2);
    assert!(value.get("text").object().is_err());
    assert_eq!(value.get("text").len(), 3);
    assert!(!value.get("text").is_empty());
}

#[test]
fn test_field_lookup() {
    let value = parse_str(r#"{"a": {"b": 1}}"#).unwrap();
    assert_eq!(value.field("a").unwrap().get("b").as_i64(), Some(1));
    assert!(matches!(value.field("z"), Err(RjsonError::FieldNotFound { code: Some(210), .. })));
    assert!(value.get_path(&["a", "x", "y"]).is_null());
}

#[test]
fn test_merge_objects_recursively() {
    let mut value = parse_str(r#"{"a":"a","b":{"ba":"ba"}}"#).unwrap();
    let update = parse_str(r#"{"b":{"ba":"BAAA"},"c":"c"}"#).unwrap();
    value.update(&update).unwrap();
    assert_eq!(value.to_json(), r#"{"a":"a","b":{"ba":"BAAA"},"c":"c"}"#);
}

#[test]
fn test_merge_replaces_non_objects() {
    let mut value = parse_str(r#"{"list": [1, 2, 3], "n": 1}"#).unwrap();
    value.update(&parse_str(r#"{"list": [9], "n": 2.5}"#).unwrap()).unwrap();
    assert_eq!(value.to_json(), r#"{"list":[9],"n":2.5}"#);

    let mut empty = Value::Null;
    empty.update(&parse_str("[1]").unwrap()).unwrap();
    assert_eq!(empty.to_json(), "[1]");
}

#[test]
fn test_merge_kind_mismatch() {
    let mut value = parse_str(r#"{"a": {"x": 1}}"#).unwrap();
    let err = value.update(&parse_str(r#"{"a": "text"}"#).unwrap()).unwrap_err();
    assert!(matches!(err, RjsonError::MergeError { code: Some(220), .. }));
}

#[test]
fn test_merge_with_null_keeps_target() {
    let mut value = parse_str(r#"{"a":1,"b":{"c":2}}"#).unwrap();
    value
        .update(&parse_str(r#"{"a":null,"b":{"c":null},"d":null}"#).unwrap())
        .unwrap();
    assert_eq!(value.to_json(), r#"{"a":1,"b":{"c":2},"d":null}"#);

    let mut scalar = Value::from("text");
    scalar.update(&Value::Null).unwrap();
    assert_eq!(scalar, Value::from("text"));
}

#[test]
fn test_programmatic_construction() {
    let mut value = Value::Null;
    value.insert("name", "plot").unwrap();
    value.insert("size", 3).unwrap();
    let mut list = Value::Null;
    list.push(1).unwrap();
    list.push("two").unwrap();
    value.insert("list", list).unwrap();
    assert_eq!(value.to_json(), r#"{"name":"plot","size":3,"list":[1,"two"]}"#);

    assert_eq!(value.remove("size"), Some(Value::from(3)));
    assert_eq!(value.remove("size"), None);
    assert!(Value::from(1).insert("k", 1).is_err());
}

#[test]
fn test_remove_comments_recursive() {
    let mut value = crate::parser::parse_document(
        r#"{"?a": 1, "b?": 2, "c": [{"?d": 3, "e": 4}], "f": {"g?": 5}}"#,
        crate::parser::ParseOptions::keep_comments(),
    )
    .unwrap()
    .into_root();
    value.remove_comments();
    assert_eq!(value.to_json(), r#"{"c":[{"e":4}],"f":{}}"#);
}

#[test]
fn test_numbers_compare_numerically() {
    assert_eq!(parse_str("1.0").unwrap(), parse_str("1").unwrap());
    assert_eq!(parse_str("1e2").unwrap(), Value::from(100));
    assert_ne!(parse_str("1").unwrap(), parse_str("2").unwrap());
    assert_ne!(parse_str("1").unwrap(), parse_str("\"1\"").unwrap());
}

#[test]
fn test_object_equality_ignores_key_order() {
    assert_eq!(
        parse_str(r#"{"a": 1, "b": 2}"#).unwrap(),
        parse_str(r#"{"b": 2, "a": 1}"#).unwrap()
    );
}

#[test]
fn test_document_access() {
    let document = Document::parse(r#"{"x": [1, 2]}"#).unwrap();
    assert_eq!(document.source(), r#"{"x": [1, 2]}"#);
    assert_eq!(document.get("x").len(), 2);
    assert_eq!(document.to_string(), r#"{"x":[1,2]}"#);
    assert!(document.root().is_object());
}
