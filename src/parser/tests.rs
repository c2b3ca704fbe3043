use super::*;
use crate::ast::Kind;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn parse_error(text: &str) -> (String, usize, usize) {
    match parse_str(text) {
        Err(RjsonError::ParseError {
            message,
            line,
            column,
            ..
        }) => (message, line, column),
        other => panic!("expected a parse error for {:?}, got {:?}", text, other),
    }
}

#[test]
fn test_parse_scalars() {
    assert_eq!(parse_str("  -2017").unwrap().to_string(), "-2017");
    assert_eq!(parse_str("true").unwrap(), Value::Bool(true));
    assert_eq!(parse_str(" false ").unwrap(), Value::Bool(false));
    assert_eq!(parse_str("null").unwrap(), Value::Null);
    assert_eq!(parse_str("\"x y\"").unwrap(), Value::from("x y"));
    assert_eq!(parse_str("1.5e3").unwrap().as_f64(), Some(1500.0));
}

#[test]
fn test_empty_input_is_null() {
    assert_eq!(parse_str("").unwrap(), Value::Null);
    assert_eq!(parse_str(" \n\t").unwrap(), Value::Null);
}

#[test]
fn test_number_classification() {
    let value = parse_str("[1, -2, 3.5, 1e5, +7]").unwrap();
    let kinds: Vec<bool> = value
        .array()
        .unwrap()
        .iter()
        .map(|v| match v {
            Value::Number(n) => n.is_integer(),
            other => panic!("not a number: {:?}", other),
        })
        .collect();
    assert_eq!(kinds, vec![true, true, false, false, true]);
}

#[test]
fn test_trailing_comma_tolerated() {
    assert_eq!(parse_str("{ \"a\" : null,}").unwrap().to_string(), r#"{"a":null}"#);
    assert_eq!(parse_str(r#"{"a":1,}"#).unwrap().to_string(), r#"{"a":1}"#);
    assert_eq!(parse_str("[1,2,]").unwrap().to_string(), "[1,2]");
}

#[test]
fn test_nested_structures() {
    let value = parse_str(
        r#"
{
    "name": "plot",
    "size": [800, 600],
    "style": {"fill": "red", "outline": null, "shown": true}
}
"#,
    )
    .unwrap();

    assert_eq!(value.kind(), Kind::Object);
    assert_eq!(value.get("name").as_str(), Some("plot"));
    assert_eq!(value.get("size").len(), 2);
    assert_eq!(value.get_path(&["style", "fill"]).as_str(), Some("red"));
    assert!(value.get_path(&["style", "outline"]).is_null());
    assert_eq!(value.get_path(&["style", "shown"]).as_bool(), Some(true));
}

#[test]
fn test_strings_are_zero_copy_unless_escaped() {
    let document = parse_document(r#"["plain", "with \"escape\"", "é"]"#, ParseOptions::default())
        .unwrap();
    let items = document.array().unwrap();

    match &items[0] {
        Value::String(text) => assert!(text.is_shared()),
        other => panic!("expected string, got {:?}", other),
    }
    match &items[1] {
        Value::String(text) => {
            assert!(!text.is_shared());
            assert_eq!(text.as_str(), "with \"escape\"");
        }
        other => panic!("expected string, got {:?}", other),
    }
    assert_eq!(items[2].as_str(), Some("\u{e9}"));
}

#[test]
fn test_values_outlive_document() {
    let value = {
        let document = Document::parse(r#"{"key": "kept alive"}"#).unwrap();
        document.get("key").clone()
    };
    assert_eq!(value.as_str(), Some("kept alive"));
}

#[test]
fn test_colon_expected_error() {
    let (message, line, column) = parse_error(r#"{"a","b"}"#);
    assert_eq!(message, "unexpected comma, colon is expected there");
    assert_eq!(line, 1);
    assert_eq!(column, 5);
}

#[test]
fn test_two_successive_commas() {
    let (message, _, column) = parse_error(r#"{"a":1,,"b":2}"#);
    assert_eq!(message, "unexpected comma -- two successive commas?");
    assert_eq!(column, 8);

    let (message, _, column) = parse_error("[1,,2]");
    assert_eq!(message, "unexpected comma -- two successive commas?");
    assert_eq!(column, 4);
}

#[test]
fn test_comma_after_opening() {
    let (message, _, _) = parse_error("{,}");
    assert_eq!(message, "unexpected comma right after the beginning of an object");
    let (message, _, _) = parse_error("[,1]");
    assert_eq!(message, "unexpected comma right after the beginning of an array");
}

#[test]
fn test_missing_comma() {
    let (message, _, column) = parse_error(r#"{"a":1 "b":2}"#);
    assert_eq!(message, "unexpected \" -- did you forget comma?");
    assert_eq!(column, 8);

    let (message, _, _) = parse_error("[1 2]");
    assert_eq!(message, "unexpected 2 -- did you forget comma?");
}

#[test]
fn test_error_position_on_later_line() {
    let (message, line, column) = parse_error("{\n  \"a\": 1,\n  #\n}");
    assert_eq!(message, "unexpected symbol: '#' (0x23)");
    assert_eq!(line, 3);
    assert_eq!(column, 3);
}

#[test]
fn test_unexpected_end_of_input() {
    for text in [r#"{"a":1"#, "[1, 2", r#""open"#, "tru", "{"] {
        let (message, _, _) = parse_error(text);
        assert_eq!(message, "unexpected end of input", "input {:?}", text);
    }
}

#[test]
fn test_invalid_literals_and_numbers() {
    let (message, _, _) = parse_error("nul");
    assert_eq!(message, "unexpected end of input");
    assert!(parse_error("trux").0.starts_with("unexpected symbol: 'x'"));
    assert!(parse_error("nulls").0.starts_with("unexpected symbol: 's'"));
    assert!(parse_error("[-]").0.starts_with("invalid number"));
    assert!(parse_error("1.2.3").0.starts_with("unexpected symbol: '.'"));
    assert!(parse_error("1e5e2").0.starts_with("unexpected symbol: 'e'"));
    assert!(parse_error("1-").0.starts_with("unexpected symbol: '-'"));
}

#[test]
fn test_nesting_limit() {
    let deepest = format!("{}{}", "[".repeat(MAX_NESTING), "]".repeat(MAX_NESTING));
    assert!(parse_str(&deepest).unwrap().is_array());

    let (message, line, column) = parse_error(&"[".repeat(MAX_NESTING + 1));
    assert!(message.starts_with("nesting too deep"));
    assert_eq!((line, column), (1, MAX_NESTING + 1));

    // fails fast instead of building a tree too deep to walk
    assert!(matches!(
        parse_str(&"[".repeat(100_000)),
        Err(RjsonError::ParseError { code: Some(112), .. })
    ));
    assert!(parse_error(&r#"{"a": "#.repeat(MAX_NESTING + 1)).0.starts_with("nesting too deep"));
}

#[test]
fn test_trailing_garbage() {
    assert!(parse_error("1 2").0.starts_with("unexpected symbol: '2'"));
    assert!(parse_error("{} x").0.starts_with("unexpected symbol: 'x'"));
}

#[test]
fn test_duplicate_keys_later_wins() {
    let value = parse_str(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
    assert_eq!(value.len(), 2);
    assert_eq!(value.get("a").as_i64(), Some(3));
}

#[test]
fn test_comment_keys() {
    let text = r#"{"_": "-*- js-indent-level: 2 -*-", "?off": 1, "on?": 2, "kept": {"?inner": 3, "x": 4}}"#;

    let stripped = parse_str(text).unwrap();
    assert_eq!(stripped.to_string(), r#"{"kept":{"x":4}}"#);

    let kept = parse_document(text, ParseOptions::keep_comments()).unwrap();
    assert!(kept.get("_").is_null());
    assert_eq!(kept.get("?off").as_i64(), Some(1));
    assert_eq!(kept.get_path(&["kept", "?inner"]).as_i64(), Some(3));
}

#[test]
fn test_parse_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, r#"{"list": [1, 2, 3]}"#).unwrap();

    let document = parse_file(&path, ParseOptions::default()).unwrap();
    assert_eq!(document.get("list").len(), 3);
    assert_eq!(document.source(), r#"{"list": [1, 2, 3]}"#);

    let missing = parse_file(dir.path().join("absent.json"), ParseOptions::default());
    assert!(matches!(missing, Err(RjsonError::FileError { code: Some(301), .. })));
}

fn arbitrary_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e12f64..1.0e12).prop_map(Value::from),
        "[a-z \"\\\\\n]{0,8}".prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{1,5}", inner), 0..5)
                .prop_map(|items| items.into_iter().collect::<Value>()),
        ]
    })
}

proptest! {
    #[test]
    fn test_format_parse_round_trip(value in arbitrary_value()) {
        let compact = value.to_string();
        let reparsed = parse_str(&compact).unwrap();
        prop_assert_eq!(&reparsed, &value);
        prop_assert_eq!(reparsed.to_string(), compact);

        let pretty = format!("{:#}", value);
        prop_assert_eq!(parse_str(&pretty).unwrap(), value);
    }
}
