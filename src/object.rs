use std::cmp::Ordering;
use std::fmt;
use std::fmt::Formatter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
  Void,
  Integer(i64),
  String(String),
  Boolean(bool),
}

impl Value {
  pub fn type_name(&self) -> &'static str {
    match self {
      Value::Void => "void",
      Value::Integer(_) => "integer",
      Value::String(_) => "string",
      Value::Boolean(_) => "boolean",
    }
  }

  pub fn is_truthy(&self) -> bool {
    match self {
      Value::Void => false,
      Value::Integer(n) => *n != 0,
      Value::String(s) => !s.is_empty(),
      Value::Boolean(b) => *b,
    }
  }

  /// Ordering between values of the same kind; `None` when they are not comparable.
  pub fn compare(&self, other: &Value) -> Option<Ordering> {
    match (self, other) {
      (Value::Integer(left), Value::Integer(right)) => Some(left.cmp(right)),
      (Value::String(left), Value::String(right)) => Some(left.cmp(right)),
      (Value::Boolean(left), Value::Boolean(right)) => Some(left.cmp(right)),
      _ => None,
    }
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Value::Void => f.write_str("None"),
      Value::Integer(n) => write!(f, "{}", n),
      Value::String(s) => write!(f, "{}", s),
      Value::Boolean(true) => f.write_str("True"),
      Value::Boolean(false) => f.write_str("False"),
    }
  }
}
