use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A modelled field as the client sent it: the typed value when the JSON fits
/// `T`, otherwise the raw JSON, stored and echoed back untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field<T> {
    Typed(T),
    Raw(Value),
}

impl Field<String> {
    /// Text form: strings as they are, any other JSON in its serialized form.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Field::Typed(text) | Field::Raw(Value::String(text)) => Cow::Borrowed(text),
            Field::Raw(Value::Null) => Cow::Borrowed(""),
            Field::Raw(other) => Cow::Owned(other.to_string()),
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Typed(value)
    }
}

impl From<&str> for Field<String> {
    fn from(text: &str) -> Self {
        Field::Typed(text.to_string())
    }
}

impl<T: fmt::Display> fmt::Display for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Typed(value) => value.fmt(f),
            Field::Raw(Value::String(raw)) => f.write_str(raw),
            Field::Raw(other) => write!(f, "{other}"),
        }
    }
}
