//! End-to-end scenarios through the public API.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]

use braid::{parse, ParseOptions, ParseResult};
use braid_grammars::{expression, float, json, ArithToken, Value};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Run `work` on its own thread and fail if it outlives `limit`.
fn within<R: Send + 'static>(limit: Duration, work: impl FnOnce() -> R + Send + 'static) -> R {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || tx.send(work()).expect("receiver alive"));
    rx.recv_timeout(limit)
        .expect("parse finished within the time limit")
}

#[test]
fn float_skips_surrounding_blanks() {
    let grammar = float().unwrap();
    assert_eq!(
        parse(&grammar, "10123.1  asdsdas "),
        ParseResult::success(vec![Value::Number(10123.1)], "asdsdas ")
    );
}

#[test]
fn json_array_with_object() {
    let grammar = json().unwrap();
    let expected = Value::List(vec![
        Value::Number(1.0),
        Value::Number(2.0),
        Value::Number(3.0),
        Value::Number(4.0),
        Value::Number(5.0),
        Value::object([("whatever", Value::Bool(true))]),
    ]);
    assert_eq!(
        parse(&grammar, r#"[1,2,3,4,5, {"whatever": true}]"#),
        ParseResult::success(vec![expected], "")
    );
}

#[test]
fn json_null() {
    let grammar = json().unwrap();
    assert_eq!(
        parse(&grammar, "null"),
        ParseResult::success(vec![Value::Null], "")
    );
}

#[test]
fn json_rejects_leading_zeros() {
    let grammar = json().unwrap();
    assert_eq!(parse(&grammar, "0000.0"), ParseResult::Failure);
    assert_eq!(
        parse(&grammar, "0.0"),
        ParseResult::success(vec![Value::Number(0.0)], "")
    );
}

#[test]
fn json_mixed_number_forms() {
    let grammar = json().unwrap();
    let (tokens, rest) = parse(&grammar, r#"[1,2,3,4,55.546E-1, {"whatever": true}]"#).unwrap();
    assert_eq!(rest, "");
    let Some(Value::List(items)) = tokens.first() else {
        panic!("expected a list, got {tokens:?}");
    };
    assert_eq!(items[4], Value::Number(5.5546));
}

#[test]
fn grammar_is_reusable_and_shareable() {
    let grammar = json().unwrap();
    let inputs = ["[1, 2]", "{\"a\": null}", "true", "\"x\""];
    std::thread::scope(|scope| {
        for input in inputs {
            let grammar = &grammar;
            scope.spawn(move || {
                assert!(grammar.parse(input).is_complete(), "{input}");
                assert!(grammar.parse(input).is_complete(), "{input}");
            });
        }
    });
}

#[test]
fn deep_json_nesting_respects_depth_limit() {
    let (complete, limited) = within(Duration::from_secs(10), || {
        let grammar = json().unwrap();
        let input = format!("{}{}", "[".repeat(400), "]".repeat(400));
        let tight = ParseOptions::default().with_max_depth(200);
        (
            grammar.parse(&input).is_complete(),
            grammar.parse_with(&input, &tight).is_err(),
        )
    });
    assert!(complete);
    assert!(limited);
}

#[test]
fn thousand_nested_json_arrays_within_default_limit() {
    let complete = within(Duration::from_secs(10), || {
        let input = format!("{}{}", "[".repeat(1000), "]".repeat(1000));
        parse(&json().unwrap(), &input).is_complete()
    });
    assert!(complete);
}

#[test]
fn thousand_nested_json_objects_within_default_limit() {
    let complete = within(Duration::from_secs(10), || {
        let input = format!("{}1{}", r#"{"a": ["#.repeat(1000), "]}".repeat(1000));
        parse(&json().unwrap(), &input).is_complete()
    });
    assert!(complete);
}

#[test]
fn thousand_nested_parentheses_within_default_limit() {
    let value = within(Duration::from_secs(10), || {
        let input = format!("{}2{}", "(".repeat(1000), ")".repeat(1000));
        let (tokens, rest) = parse(&expression().unwrap(), &input).unwrap();
        assert_eq!(rest, "");
        match tokens.as_slice() {
            [ArithToken::Expr(expr)] => Some(expr.eval()),
            _ => None,
        }
    });
    assert_eq!(value, Some(2.0));
}

#[test]
fn arithmetic_evaluates() {
    let grammar = expression().unwrap();
    let (tokens, rest) = grammar.parse(" (1 + 2) * 3 - 4 / 2 ").unwrap();
    assert_eq!(rest, "");
    let [ArithToken::Expr(expr)] = tokens.as_slice() else {
        panic!("expected one expression, got {tokens:?}");
    };
    assert!((expr.eval() - 7.0).abs() < f64::EPSILON);
}

proptest! {
    #[test]
    fn json_integers_round_trip(n in -1_000_000_i64..1_000_000) {
        let grammar = json().unwrap();
        let text = n.to_string();
        #[allow(clippy::cast_precision_loss, reason = "values fit in f64 exactly")]
        let expected = Value::Number(n as f64);
        prop_assert_eq!(grammar.parse(&text), ParseResult::success(vec![expected], ""));
    }

    #[test]
    fn json_string_lists_round_trip(words in prop::collection::vec("[a-z ]{0,6}", 0..5)) {
        let grammar = json().unwrap();
        let body: Vec<String> = words.iter().map(|w| format!("\"{w}\"")).collect();
        let text = format!("[{}]", body.join(", "));
        let expected = Value::List(words.iter().cloned().map(Value::Str).collect());
        prop_assert_eq!(grammar.parse(&text), ParseResult::success(vec![expected], ""));
    }
}
