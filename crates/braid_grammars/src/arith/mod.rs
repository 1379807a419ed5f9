//! Four-operator arithmetic.
//!
//! ```text
//! expr    := operand (op operand)*
//! operand := blanks ('(' blanks expr blanks ')' | float) blanks
//! op      := '+' | '-' | '*' | '/'
//! ```
//!
//! The grammar itself is flat; precedence (`*` and `/` before `+` and `-`,
//! both left associative) is applied by the converter that folds an
//! `expr`'s operand/operator run into an [`Expr`] tree.

use std::fmt;

use braid::{ConvertError, GrammarError, Parser};
use braid_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::common::{raw_float, spaces};

/// A binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// The operator spelled by `c`, if any.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Whether this operator binds tighter than `+` and `-`.
    pub fn is_multiplicative(self) -> bool {
        matches!(self, Operator::Multiply | Operator::Divide)
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => lhs / rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An arithmetic expression tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Binary {
        op: Operator,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: Operator, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Evaluate with `f64` semantics; dividing by zero yields an infinity
    /// or NaN rather than an error.
    pub fn eval(&self) -> f64 {
        ensure_sufficient_stack(|| match self {
            Expr::Number(n) => *n,
            Expr::Binary { op, lhs, rhs } => op.apply(lhs.eval(), rhs.eval()),
        })
    }
}

/// Fully parenthesised, so the tree shape is visible.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Expr::Number(n) => write!(f, "{n}"),
            Expr::Binary { op, lhs, rhs } => write!(f, "({lhs} {op} {rhs})"),
        })
    }
}

/// Token type of the arithmetic grammar.
#[derive(Clone, Debug, PartialEq)]
pub enum ArithToken {
    Char(char),
    Op(Operator),
    Expr(Expr),
}

impl From<char> for ArithToken {
    fn from(c: char) -> Self {
        ArithToken::Char(c)
    }
}

/// The expression grammar. A successful parse yields one
/// [`ArithToken::Expr`].
pub fn expression() -> Result<Parser<ArithToken>, GrammarError> {
    let blanks = spaces()?;
    let number = raw_float()?.convert(to_number);
    let operator = Parser::one_of("+-*/")?.convert(to_operator);

    Ok(Parser::recursive(|expr| {
        let group = Parser::literal('(').suppress()
            + blanks.clone()
            + expr
            + blanks.clone()
            + Parser::literal(')').suppress();
        let operand = blanks.clone() + (group | number) + blanks.clone();
        (operand.clone() + (operator + operand).zero_or_more()).convert(build_tree)
    }))
}

fn to_number(tokens: Vec<ArithToken>) -> Result<ArithToken, ConvertError> {
    let mut text = String::with_capacity(tokens.len());
    for token in &tokens {
        match token {
            ArithToken::Char(c) => text.push(*c),
            other => return Err(ConvertError::new(format!("unexpected {other:?} in number"))),
        }
    }
    text.parse::<f64>()
        .map(|n| ArithToken::Expr(Expr::Number(n)))
        .map_err(|e| ConvertError::new(format!("invalid number {text:?}: {e}")))
}

fn to_operator(tokens: Vec<ArithToken>) -> Result<ArithToken, ConvertError> {
    match tokens.as_slice() {
        [ArithToken::Char(c)] => Operator::from_char(*c)
            .map(ArithToken::Op)
            .ok_or_else(|| ConvertError::new(format!("{c:?} is not an operator"))),
        _ => Err(ConvertError::new("an operator is exactly one character")),
    }
}

/// Fold `operand (op operand)*` into a tree with precedence.
///
/// Multiplicative operators are applied as soon as they are seen; the
/// remaining additive chain is folded left to right at the end.
fn build_tree(tokens: Vec<ArithToken>) -> Result<ArithToken, ConvertError> {
    let mut tokens = tokens.into_iter();
    let first = expect_expr(tokens.next())?;

    let mut terms = vec![first];
    let mut additive = Vec::new();
    while let Some(token) = tokens.next() {
        let ArithToken::Op(op) = token else {
            return Err(ConvertError::new(format!("expected an operator, got {token:?}")));
        };
        let rhs = expect_expr(tokens.next())?;
        if op.is_multiplicative() {
            let lhs = terms
                .pop()
                .ok_or_else(|| ConvertError::new("operator without a left operand"))?;
            terms.push(Expr::binary(op, lhs, rhs));
        } else {
            additive.push(op);
            terms.push(rhs);
        }
    }

    let mut terms = terms.into_iter();
    let mut tree = terms
        .next()
        .ok_or_else(|| ConvertError::new("empty expression"))?;
    for (op, rhs) in additive.into_iter().zip(terms) {
        tree = Expr::binary(op, tree, rhs);
    }
    trace!(%tree, "folded arithmetic expression");
    Ok(ArithToken::Expr(tree))
}

fn expect_expr(token: Option<ArithToken>) -> Result<Expr, ConvertError> {
    match token {
        Some(ArithToken::Expr(expr)) => Ok(expr),
        Some(other) => Err(ConvertError::new(format!(
            "expected an operand, got {other:?}"
        ))),
        None => Err(ConvertError::new("expected an operand, got nothing")),
    }
}

#[cfg(test)]
mod tests;
