#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    reason = "test assertions compare exact results of small literals"
)]

use super::*;
use braid::ParseResult;
use pretty_assertions::assert_eq;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn parse_expr(input: &str) -> Expr {
    let grammar = expression().expect("arithmetic grammar assembles");
    let (mut tokens, rest) = grammar.parse(input).unwrap();
    assert_eq!(rest, "", "input not fully consumed: {input:?}");
    match tokens.pop() {
        Some(ArithToken::Expr(expr)) if tokens.is_empty() => expr,
        other => panic!("expected a single expression, got {other:?}"),
    }
}

fn n(value: f64) -> Expr {
    Expr::Number(value)
}

#[test]
fn single_number() {
    assert_eq!(parse_expr("  -12.5 "), n(-12.5));
}

#[test]
fn precedence() {
    assert_eq!(
        parse_expr("1 + 2 * 3"),
        Expr::binary(
            Operator::Add,
            n(1.0),
            Expr::binary(Operator::Multiply, n(2.0), n(3.0))
        )
    );
    assert_eq!(parse_expr("1 + 2 * 3").eval(), 7.0);
}

#[test]
fn left_associative() {
    assert_eq!(parse_expr("10 - 2 - 3").eval(), 5.0);
    assert_eq!(parse_expr("5 / 1 * 4").eval(), 20.0);
    assert_eq!(parse_expr("8 / 2 / 2").to_string(), "((8 / 2) / 2)");
}

#[test]
fn parentheses() {
    assert_eq!(parse_expr("(1 + 2) * 3").eval(), 9.0);
    assert_eq!(parse_expr("( ( 4 ) )").eval(), 4.0);
    assert_eq!(parse_expr("2 * (3 - (4 / 2))").to_string(), "(2 * (3 - (4 / 2)))");
}

#[test]
fn negative_operands() {
    assert_eq!(parse_expr("3 - -2").eval(), 5.0);
    assert_eq!(parse_expr("-3*-2").eval(), 6.0);
}

#[test]
fn division_by_zero_is_infinite() {
    assert!(parse_expr("1 / 0").eval().is_infinite());
}

#[test]
fn trailing_operator_left_unconsumed() {
    let grammar = expression().unwrap();
    let result = grammar.parse("1 + 2 +");
    assert_eq!(result.rest(), Some("+"));
}

#[test]
fn unbalanced_parenthesis_fails() {
    let grammar = expression().unwrap();
    assert_eq!(grammar.parse("(1 + 2"), ParseResult::Failure);
}

#[test]
fn extra_close_paren_left_over() {
    let grammar = expression().unwrap();
    assert_eq!(grammar.parse("5 / 1 * 4)").rest(), Some(")"));
}

#[test]
fn operator_symbols_round_trip() {
    for op in [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ] {
        assert_eq!(Operator::from_char(op.symbol()), Some(op));
    }
    assert_eq!(Operator::from_char('%'), None);
}

/// Run `work` on its own thread and fail if it outlives `limit`.
fn within<R: Send + 'static>(limit: Duration, work: impl FnOnce() -> R + Send + 'static) -> R {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || tx.send(work()).expect("receiver alive"));
    rx.recv_timeout(limit)
        .expect("parse finished within the time limit")
}

#[test]
fn deeply_nested_parentheses() {
    let value = within(Duration::from_secs(10), || {
        let depth = 1000;
        let input = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        parse_expr(&input).eval()
    });
    assert_eq!(value, 1.0);
}

#[test]
fn deeply_nested_operations() {
    let value = within(Duration::from_secs(10), || {
        let depth = 1000;
        let input = format!("{}1{}", "(1 + ".repeat(depth), ") * 1".repeat(depth));
        parse_expr(&input).eval()
    });
    assert_eq!(value, 1001.0);
}

#[test]
fn unbalanced_deep_nesting_fails_quickly() {
    let failed = within(Duration::from_secs(10), || {
        let depth = 1000;
        let input = format!("{}1{}", "(".repeat(depth), ")".repeat(depth - 1));
        expression().unwrap().parse(&input).is_err()
    });
    assert!(failed);
}
