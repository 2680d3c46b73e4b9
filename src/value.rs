//! The result map's value type.
//!
//! All of parsing is string-in, string-out: this crate never coerces a
//! matched value into an integer, a path or anything else application
//! specific. `Value` only distinguishes the shapes the engine itself
//! produces.

/// A single bound value in a parse result.
///
/// `Count` is reserved for a future repeated-flag counting feature and is
/// never produced by the current engine; it exists so that adding counting
/// later does not need a breaking change to this enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// A scalar option or argument value.
    Str(String),
    /// A flag or command presence bit.
    Bool(bool),
    /// A positional argument leaf that matched more than once.
    List(Vec<String>),
    /// Reserved, currently unused.
    Count(u32),
    /// An argument leaf that never matched and has no default.
    Null,
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(xs) => Some(xs),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::List(xs) => write!(f, "[{}]", xs.join(", ")),
            Value::Count(n) => write!(f, "{n}"),
            Value::Null => f.write_str("null"),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<String>> for Value {
    fn from(xs: Vec<String>) -> Self {
        Value::List(xs)
    }
}
