//! Token type shared by the text grammars.

use std::fmt;

use rustc_hash::FxHashMap;

/// A token produced by the float and JSON grammars.
///
/// Literals produce [`Value::Char`]; converters fold character runs into
/// the richer variants.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A single matched character.
    Char(char),
    /// Text, either a joined run of characters or a JSON string.
    Str(String),
    /// Any number; JSON integers are stored as `f64` as well.
    Number(f64),
    Bool(bool),
    Null,
    List(Vec<Value>),
    Object(FxHashMap<String, Value>),
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl Value {
    /// Short name of the variant, for conversion error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }

    /// Build an object from key/value pairs.
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }
}

/// Renders JSON-like text; object keys are sorted so output is stable.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Char(c) => write!(f, "{c:?}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Number(n) => write!(f, "{n:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => f.write_str("null"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(entries) => {
                let mut keys: Vec<&String> = entries.keys().collect();
                keys.sort();
                f.write_str("{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: ")?;
                    if let Some(value) = entries.get(key) {
                        write!(f, "{value}")?;
                    }
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests;
