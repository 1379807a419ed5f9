//! JSON built from combinators.
//!
//! ```text
//! value   := blanks (number | bool | string | array | object | null) blanks
//! number  := int frac? exp?
//! int     := !zeros & !('-'? '0' digits) & ('-'? digits)
//! array   := '[' blanks (value (',' value)* ','?)? blanks ']'
//! object  := '{' blanks (member (',' blanks member)*)? blanks '}'
//! member  := string blanks ':' blanks value blanks
//! ```
//!
//! `int` uses negative lookahead to reject leading zeros (`00`, `0454`,
//! `0000.0`) while still accepting `0` and `0.5`. Arrays tolerate one
//! trailing comma.

use braid::{ConvertError, GrammarError, Parser};
use tracing::debug;

use crate::common::{digits, spaces, word};
use crate::convert::{quoted_string, to_bool, to_list, to_null, to_number, to_object};
use crate::value::Value;

/// Printable ASCII allowed unescaped inside a string.
const STRING_CHARS: &str = " !#$%&'()*+,-./0123456789:;<=>?@\
ABCDEFGHIJKLMNOPQRSTUVWXYZ[]^_`abcdefghijklmnopqrstuvwxyz{|}~";

/// The JSON grammar and its named sub-rules.
///
/// `value` is the entry point; the other rules are exposed so callers can
/// parse a fragment of a known kind. Every rule skips blanks around
/// itself.
#[derive(Clone, Debug)]
pub struct Json {
    pub value: Parser<Value>,
    pub number: Parser<Value>,
    pub boolean: Parser<Value>,
    pub string: Parser<Value>,
    pub null: Parser<Value>,
    pub array: Parser<Value>,
    pub object: Parser<Value>,
}

impl Json {
    /// Assemble the grammar.
    pub fn new() -> Result<Self, GrammarError> {
        let blanks = spaces()?;
        let padded = |p: Parser<Value>| &blanks + &p + blanks.clone();

        let number = padded(number()?);
        let boolean = padded((word("true")? | word("false")?).convert(to_bool));
        let string = padded(string()?);
        let null = padded(word("null")?.convert(to_null));

        let scalars = Scalars {
            number: number.clone(),
            boolean: boolean.clone(),
            string: string.clone(),
            null: null.clone(),
            blanks: blanks.clone(),
        };
        let value = Parser::recursive(|value| scalars.value(&value));
        let array = scalars.array(&value);
        let object = scalars.object(&value);
        debug!(grammar = ?value, "assembled JSON grammar");

        Ok(Json {
            value,
            number,
            boolean,
            string,
            null,
            array,
            object,
        })
    }
}

/// The JSON value grammar.
pub fn json() -> Result<Parser<Value>, GrammarError> {
    Ok(Json::new()?.value)
}

/// Non-recursive rules, reused while tying the recursive knot.
struct Scalars {
    number: Parser<Value>,
    boolean: Parser<Value>,
    string: Parser<Value>,
    null: Parser<Value>,
    blanks: Parser<Value>,
}

impl Scalars {
    fn value(&self, value: &Parser<Value>) -> Parser<Value> {
        let alternatives = self.number.clone()
            | self.boolean.clone()
            | self.string.clone()
            | self.array(value)
            | self.object(value)
            | self.null.clone();
        self.blanks.clone() + alternatives + self.blanks.clone()
    }

    fn array(&self, value: &Parser<Value>) -> Parser<Value> {
        let comma = Parser::literal(',').suppress();
        // every element is parsed exactly once
        let elements = (value.clone()
            + (&comma + value).zero_or_more()
            + comma.optional())
        .optional();
        let body = Parser::literal('[').suppress()
            + self.blanks.clone()
            + elements
            + self.blanks.clone()
            + Parser::literal(']').suppress();
        &self.blanks + &body.convert(to_list) + self.blanks.clone()
    }

    fn object(&self, value: &Parser<Value>) -> Parser<Value> {
        let member = self.string.clone()
            + self.blanks.clone()
            + Parser::literal(':').suppress()
            + self.blanks.clone()
            + value.clone()
            + self.blanks.clone();
        let more = Parser::literal(',').suppress() + self.blanks.clone() + member.clone();
        let members = (member + more.zero_or_more()).optional();
        let body = Parser::literal('{').suppress()
            + self.blanks.clone()
            + members
            + self.blanks.clone()
            + Parser::literal('}').suppress();
        &self.blanks + &body.convert(to_object) + self.blanks.clone()
    }
}

/// A JSON number without surrounding blanks.
fn number() -> Result<Parser<Value>, GrammarError> {
    let zero = || Parser::literal('0');
    let sign = || Parser::literal('-').optional();

    let zeros = zero() + zero().repeat();
    let padded_zero = sign() + zero() + digits()?;
    let int = !zeros & !padded_zero & (sign() + digits()?);

    let frac = Parser::literal('.') + digits()?;
    let exp = Parser::one_of("eE")? + Parser::one_of("+-")?.optional() + digits()?;

    Ok((int + frac.optional() + exp.optional()).convert(to_number))
}

/// A quoted JSON string without surrounding blanks.
fn string() -> Result<Parser<Value>, GrammarError> {
    let quote = || Parser::literal('"');
    let escape = (Parser::literal('\\') + Parser::one_of("\"\\/ntr")?).convert(unescape);
    let content = (escape | Parser::one_of(STRING_CHARS)?).zero_or_more();
    Ok((quote() + content + quote()).convert(quoted_string))
}

/// `[Char('\\'), Char(c)]` to the character the escape stands for.
fn unescape(tokens: Vec<Value>) -> Result<Value, ConvertError> {
    match tokens.as_slice() {
        [Value::Char('\\'), Value::Char(c)] => {
            let unescaped = match c {
                'n' => '\n',
                't' => '\t',
                'r' => '\r',
                other => *other,
            };
            Ok(Value::Char(unescaped))
        }
        _ => Err(ConvertError::new("malformed escape sequence")),
    }
}
