//! Parsed value representation.

use indexmap::IndexMap;
use std::fmt;

/// An ordered mapping of keys to values.
///
/// Key order is the order of first insertion, preserving document
/// order. A key that occurred more than once in its scope holds a
/// [`Value::List`] of every occurrence.
pub type Block = IndexMap<String, Value>;

/// A comparison or equality operator attached to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `==`
    Equals,
    /// `!=`
    NotEquals,
    /// `<`
    Less,
    /// `<=`
    LessOrEquals,
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEquals,
    /// `?=` (null-safe equals)
    MaybeEquals,
}

impl Operator {
    /// Resolve a token to an operator, or `None` for any other text.
    pub fn from_token(text: &str) -> Option<Operator> {
        match text {
            "==" => Some(Operator::Equals),
            "!=" => Some(Operator::NotEquals),
            "<" => Some(Operator::Less),
            "<=" => Some(Operator::LessOrEquals),
            ">" => Some(Operator::Greater),
            ">=" => Some(Operator::GreaterOrEquals),
            "?=" => Some(Operator::MaybeEquals),
            _ => None,
        }
    }

    /// The operator's source spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Equals => "==",
            Operator::NotEquals => "!=",
            Operator::Less => "<",
            Operator::LessOrEquals => "<=",
            Operator::Greater => ">",
            Operator::GreaterOrEquals => ">=",
            Operator::MaybeEquals => "?=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `key OP value` construct, distinct from plain assignment.
#[derive(Clone, PartialEq)]
pub struct Comparison {
    pub op: Operator,
    pub value: Box<Value>,
}

/// A parsed script value.
#[derive(Clone, PartialEq)]
pub enum Value {
    /// Boolean scalar (`yes` / `no`).
    Bool(bool),
    /// 64-bit integer scalar.
    Integer(i64),
    /// 64-bit floating-point scalar.
    Float(f64),
    /// UTF-8 string scalar.
    String(String),
    /// Ordered list of values, possibly heterogeneous.
    List(Vec<Value>),
    /// Ordered key-value mapping.
    Block(Block),
    /// Comparison expression, as in `x >= 5`.
    Comparison(Comparison),
}

impl Value {
    /// Coerce a raw token into a typed scalar.
    ///
    /// Case-insensitive `yes`/`no` become booleans. A token containing
    /// a `.` is tried as a float, anything else as an integer; a failed
    /// numeric parse falls back to the original text, so `1.2.3` stays
    /// a string. The empty token passes through as an empty string.
    pub fn from_token(token: &str) -> Value {
        if token.is_empty() {
            return Value::String(String::new());
        }
        if token.eq_ignore_ascii_case("yes") {
            return Value::Bool(true);
        }
        if token.eq_ignore_ascii_case("no") {
            return Value::Bool(false);
        }
        if token.contains('.') {
            if let Ok(f) = token.parse::<f64>() {
                return Value::Float(f);
            }
        } else if let Ok(n) = token.parse::<i64>() {
            return Value::Integer(n);
        }
        Value::String(token.to_string())
    }

    /// Returns the boolean value if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer value if this is an `Integer`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float value if this is a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a reference to the list if this is a `List`.
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns a reference to the block if this is a `Block`.
    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Value::Block(block) => Some(block),
            _ => None,
        }
    }

    /// Returns a reference to the comparison if this is a `Comparison`.
    pub fn as_comparison(&self) -> Option<&Comparison> {
        match self {
            Value::Comparison(cmp) => Some(cmp),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::List(items) => f.debug_list().entries(items).finish(),
            Value::Block(block) => f.debug_map().entries(block).finish(),
            Value::Comparison(cmp) => write!(f, "{:?}", cmp),
        }
    }
}

impl fmt::Debug for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.op, self.value)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Block> for Value {
    fn from(block: Block) -> Self {
        Value::Block(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_booleans() {
        assert_eq!(Value::from_token("yes"), Value::Bool(true));
        assert_eq!(Value::from_token("YES"), Value::Bool(true));
        assert_eq!(Value::from_token("no"), Value::Bool(false));
        assert_eq!(Value::from_token("No"), Value::Bool(false));
    }

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(Value::from_token("42"), Value::Integer(42));
        assert_eq!(Value::from_token("-5"), Value::Integer(-5));
        assert_eq!(Value::from_token("3.14"), Value::Float(3.14));
        assert_eq!(Value::from_token("-0.25"), Value::Float(-0.25));
        assert_eq!(Value::from_token("-.5"), Value::Float(-0.5));
    }

    #[test]
    fn test_coerce_fallback_to_string() {
        // More than one dot is a version string, not a number.
        assert_eq!(
            Value::from_token("1.2.3"),
            Value::String("1.2.3".to_string())
        );
        // No dot means no float attempt, and the integer parse fails.
        assert_eq!(Value::from_token("1e5"), Value::String("1e5".to_string()));
        assert_eq!(
            Value::from_token("religion:sanjiao"),
            Value::String("religion:sanjiao".to_string())
        );
        assert_eq!(Value::from_token(""), Value::String(String::new()));
    }

    #[test]
    fn test_operator_tokens() {
        assert_eq!(Operator::from_token(">="), Some(Operator::GreaterOrEquals));
        assert_eq!(Operator::from_token("?="), Some(Operator::MaybeEquals));
        assert_eq!(Operator::from_token("="), None);
        assert_eq!(Operator::from_token(""), None);
    }
}
