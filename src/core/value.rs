//! Runtime values a `Constant` may wrap.
//!
//! The payload of a constant has no static type: it is whatever the caller
//! hands to the constructor, and the algebraic structures it satisfies are
//! discovered by probing it. `Value` is the closed set of shapes a payload
//! can take.

use crate::core::constant::Constant;
use crate::core::type_rep::{Builtin, TypeRep};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    /// Keys are kept sorted so ordering and display are deterministic.
    Object(BTreeMap<String, Value>),
    RegExp { source: String, flags: String },
    Function(Function),
    /// The trivial applicative: one value, no effects.
    Identity(Box<Value>),
    Constant(Constant),
    Foreign(Foreign),
}

impl Value {
    pub fn regexp(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Value::RegExp {
            source: source.into(),
            flags: flags.into(),
        }
    }

    pub fn identity(inner: impl Into<Value>) -> Self {
        Value::Identity(Box::new(inner.into()))
    }

    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// The representative of this value's runtime type.
    ///
    /// Nested constants report their own constructor, and foreign values
    /// report the representative they were built with.
    pub fn constructor(&self) -> TypeRep {
        match self {
            Value::Undefined => TypeRep::Builtin(Builtin::Undefined),
            Value::Null => TypeRep::Builtin(Builtin::Null),
            Value::Boolean(_) => TypeRep::Builtin(Builtin::Boolean),
            Value::Number(_) => TypeRep::Builtin(Builtin::Number),
            Value::String(_) => TypeRep::Builtin(Builtin::String),
            Value::Array(_) => TypeRep::Builtin(Builtin::Array),
            Value::Object(_) => TypeRep::Builtin(Builtin::Object),
            Value::RegExp { .. } => TypeRep::Builtin(Builtin::RegExp),
            Value::Function(_) => TypeRep::Builtin(Builtin::Function),
            Value::Identity(_) => TypeRep::Builtin(Builtin::Identity),
            Value::Constant(c) => TypeRep::Constant(c.constructor().clone()),
            Value::Foreign(f) => f.rep.clone(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(xs) => Some(xs),
            _ => None,
        }
    }

    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Value::Constant(c) => Some(c),
            _ => None,
        }
    }

    /// Length of a string (in chars) or an array.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.chars().count()),
            Value::Array(xs) => Some(xs.len()),
            _ => None,
        }
    }

    /// Applies a function payload. `None` when `self` is not a function.
    pub fn call(&self, arg: &Value) -> Option<Value> {
        match self {
            Value::Function(f) => Some(f.call(arg)),
            _ => None,
        }
    }
}

type Callable = dyn Fn(&Value) -> Value + Send + Sync;

/// A unary function value, optionally named and carrying its source text.
#[derive(Clone)]
pub struct Function {
    name: Option<String>,
    source: Option<String>,
    call: Arc<Callable>,
}

impl Function {
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Function {
            name: Some(name.into()),
            source: None,
            call: Arc::new(f),
        }
    }

    pub fn anonymous<F>(source: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Function {
            name: None,
            source: Some(source.into()),
            call: Arc::new(f),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn call(&self, arg: &Value) -> Value {
        (self.call)(arg)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.call, &other.call)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// A value of a caller-described type that satisfies no algebraic structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Foreign {
    rep: TypeRep,
    display: String,
}

impl Foreign {
    pub fn new(rep: TypeRep, display: impl Into<String>) -> Self {
        Foreign {
            rep,
            display: display.into(),
        }
    }

    pub fn rep(&self) -> &TypeRep {
        &self.rep
    }

    pub fn display(&self) -> &str {
        &self.display
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
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

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(xs: Vec<T>) -> Self {
        Value::Array(xs.into_iter().map(Into::into).collect())
    }
}

impl From<Constant> for Value {
    fn from(c: Constant) -> Self {
        Value::Constant(c)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<Foreign> for Value {
    fn from(f: Foreign) -> Self {
        Value::Foreign(f)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(xs) => Value::Array(xs.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}
