use crate::function::{NativeFunction, ZeroFunction};

/// A zero runtime value: a closed, dynamically tagged union used throughout
/// evaluation. Exhaustive matching at every use site replaces any open
/// "any"-style container.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(i64),
    String(String),
    Function(ZeroFunction),
    Native(NativeFunction),
}

impl Value {
    /// The truthiness rule: `nil` and `false` are falsy, everything else
    /// (numbers, strings, callables) is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            _ => true,
        }
    }
}

impl PartialEq for Value {
    /// The structural equality rule: `nil` equals only `nil`; cross-type
    /// comparisons are false; same-type scalars compare by value; functions
    /// compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.is_same(b),
            (Value::Native(a), Value::Native(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    /// The stringify rule used by `print` and diagnostics.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),

            Value::Bool(b) => write!(f, "{}", b),

            Value::Number(n) => write!(f, "{}", n),

            Value::String(s) => write!(f, "{}", s),

            Value::Function(func) => write!(f, "<fn {}>", func.name()),

            Value::Native(_) => write!(f, "<native fn>"),
        }
    }
}
