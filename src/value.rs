use serde::Serialize;

/// A literal bound to a placeholder.
///
/// Literals keep their declared kind and are never reinterpreted: a string
/// stays a string even if it looks like a number.
///
/// # Examples
///
/// ```
/// use pmql::Value;
///
/// let name = Value::String("Taylor".to_string());
/// let age = Value::Integer(42);
///
/// assert_eq!(serde_json::to_string(&name).unwrap(), r#""Taylor""#);
/// assert_eq!(serde_json::to_string(&age).unwrap(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// UTF-8 string
    String(String),

    /// Integer number
    Integer(i64),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}
