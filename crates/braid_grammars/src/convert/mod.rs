//! Semantic actions for [`Value`] grammars.
//!
//! Each helper folds the token run of a matched rule into one [`Value`], or
//! returns a [`ConvertError`] when the tokens are not the shape it expects.
//! An error makes the rule fail, so a grammar can fall back to another
//! alternative.

use braid::ConvertError;
use rustc_hash::FxHashMap;

use crate::value::Value;

/// Concatenate character and string tokens.
pub fn text_of(tokens: &[Value]) -> Result<String, ConvertError> {
    let mut text = String::new();
    for token in tokens {
        match token {
            Value::Char(c) => text.push(*c),
            Value::Str(s) => text.push_str(s),
            other => {
                return Err(ConvertError::new(format!(
                    "cannot join a {} token into text",
                    other.kind()
                )))
            }
        }
    }
    Ok(text)
}

/// Join a character run into one [`Value::Str`].
pub fn join_chars(tokens: Vec<Value>) -> Result<Value, ConvertError> {
    text_of(&tokens).map(Value::Str)
}

/// Read a character run as a number.
pub fn to_number(tokens: Vec<Value>) -> Result<Value, ConvertError> {
    let text = text_of(&tokens)?;
    text.parse::<f64>()
        .map(Value::Number)
        .map_err(|e| ConvertError::new(format!("invalid number {text:?}: {e}")))
}

/// Read exactly one `"true"` or `"false"` token.
pub fn to_bool(tokens: Vec<Value>) -> Result<Value, ConvertError> {
    match single_text(tokens)?.as_str() {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        other => Err(ConvertError::new(format!(
            "cannot convert {other:?} to a boolean"
        ))),
    }
}

/// Read exactly one `"null"` token.
pub fn to_null(tokens: Vec<Value>) -> Result<Value, ConvertError> {
    match single_text(tokens)?.as_str() {
        "null" => Ok(Value::Null),
        other => Err(ConvertError::new(format!("cannot convert {other:?} to null"))),
    }
}

/// Strip the surrounding quote tokens and join what is between them.
pub fn quoted_string(tokens: Vec<Value>) -> Result<Value, ConvertError> {
    let quote = Value::Char('"');
    match tokens.as_slice() {
        [first, inner @ .., last] if *first == quote && *last == quote => {
            text_of(inner).map(Value::Str)
        }
        _ => Err(ConvertError::new(
            "a string must start and end with a quote token",
        )),
    }
}

/// Pair up `key, value, key, value, ...` tokens into an object.
pub fn to_object(tokens: Vec<Value>) -> Result<Value, ConvertError> {
    if tokens.len() % 2 != 0 {
        return Err(ConvertError::new(format!(
            "an object needs an even number of tokens, got {}",
            tokens.len()
        )));
    }

    let mut entries = FxHashMap::default();
    let mut tokens = tokens.into_iter();
    while let (Some(key), Some(value)) = (tokens.next(), tokens.next()) {
        let Value::Str(key) = key else {
            return Err(ConvertError::new(format!(
                "object keys must be strings, got a {}",
                key.kind()
            )));
        };
        entries.insert(key, value);
    }
    Ok(Value::Object(entries))
}

/// Wrap all tokens in a list.
pub fn to_list(tokens: Vec<Value>) -> Result<Value, ConvertError> {
    Ok(Value::List(tokens))
}

fn single_text(tokens: Vec<Value>) -> Result<String, ConvertError> {
    match <[Value; 1]>::try_from(tokens) {
        Ok([token]) => text_of(std::slice::from_ref(&token)),
        Err(tokens) => Err(ConvertError::new(format!(
            "expected exactly one token, got {}",
            tokens.len()
        ))),
    }
}
