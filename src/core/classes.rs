//! Capability resolution for payloads.
//!
//! `TypeClasses` answers, for an arbitrary `Value`, whether it is a Setoid,
//! an Ord, or a Semigroup, and performs the corresponding operations. The
//! service is handed to every `ConstantType` explicitly; nothing here is
//! global.

use crate::core::error::ConstantError;
use crate::core::show;
use crate::core::type_rep::{Builtin, TypeRep};
use crate::core::value::Value;
use std::collections::BTreeMap;
use tracing::warn;

pub trait TypeClasses: Send + Sync {
    fn is_setoid(&self, value: &Value) -> bool;

    /// Implies `is_setoid`.
    fn is_ord(&self, value: &Value) -> bool;

    fn is_semigroup(&self, value: &Value) -> bool;

    fn equals(&self, a: &Value, b: &Value) -> bool;

    fn lte(&self, a: &Value, b: &Value) -> bool;

    /// Combines two values of the same shape. Mismatched shapes are
    /// unspecified.
    fn concat(&self, a: &Value, b: &Value) -> Value;

    /// The identity element of the monoid `rep` stands for.
    fn empty(&self, rep: &TypeRep) -> Result<Value, ConstantError>;

    /// Lifts `value` into the applicative `rep` stands for.
    fn of(&self, rep: &TypeRep, value: Value) -> Result<Value, ConstantError>;

    fn show(&self, value: &Value) -> String {
        show::show(value)
    }
}

/// The builtin instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardClasses;

impl TypeClasses for StandardClasses {
    fn is_setoid(&self, value: &Value) -> bool {
        match value {
            Value::Undefined
            | Value::Null
            | Value::Boolean(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::RegExp { .. } => true,
            Value::Array(xs) => xs.iter().all(|x| self.is_setoid(x)),
            Value::Object(map) => map.values().all(|x| self.is_setoid(x)),
            Value::Identity(inner) => self.is_setoid(inner),
            Value::Constant(c) => c.probe().is_setoid(),
            Value::Function(_) | Value::Foreign(_) => false,
        }
    }

    fn is_ord(&self, value: &Value) -> bool {
        match value {
            Value::Undefined
            | Value::Null
            | Value::Boolean(_)
            | Value::Number(_)
            | Value::String(_) => true,
            Value::Array(xs) => xs.iter().all(|x| self.is_ord(x)),
            Value::Object(map) => map.values().all(|x| self.is_ord(x)),
            Value::Identity(inner) => self.is_ord(inner),
            Value::Constant(c) => c.probe().is_ord(),
            Value::RegExp { .. } | Value::Function(_) | Value::Foreign(_) => false,
        }
    }

    fn is_semigroup(&self, value: &Value) -> bool {
        match value {
            Value::String(_) | Value::Array(_) | Value::Object(_) => true,
            Value::Identity(inner) => self.is_semigroup(inner),
            Value::Constant(c) => c.probe().semigroup,
            _ => false,
        }
    }

    fn equals(&self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Boolean(x), Value::Boolean(y)) => x == y,
            (Value::Number(x), Value::Number(y)) => (x.is_nan() && y.is_nan()) || x == y,
            (Value::String(x), Value::String(y)) => x == y,
            (
                Value::RegExp {
                    source: s1,
                    flags: f1,
                },
                Value::RegExp {
                    source: s2,
                    flags: f2,
                },
            ) => s1 == s2 && f1 == f2,
            (Value::Array(xs), Value::Array(ys)) => {
                xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| self.equals(x, y))
            }
            (Value::Object(xs), Value::Object(ys)) => {
                xs.len() == ys.len()
                    && xs
                        .iter()
                        .zip(ys)
                        .all(|((k1, v1), (k2, v2))| k1 == k2 && self.equals(v1, v2))
            }
            (Value::Identity(x), Value::Identity(y)) => self.equals(x, y),
            (Value::Constant(x), Value::Constant(y)) => x.equals(y).unwrap_or(false),
            _ => false,
        }
    }

    fn lte(&self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Boolean(x), Value::Boolean(y)) => x <= y,
            // NaN sorts before every other number.
            (Value::Number(x), Value::Number(y)) => x.is_nan() || x <= y,
            (Value::String(x), Value::String(y)) => x <= y,
            (Value::Array(xs), Value::Array(ys)) => {
                for (x, y) in xs.iter().zip(ys) {
                    if !self.equals(x, y) {
                        return self.lte(x, y);
                    }
                }
                xs.len() <= ys.len()
            }
            (Value::Object(xs), Value::Object(ys)) => self.lte_objects(xs, ys),
            (Value::Identity(x), Value::Identity(y)) => self.lte(x, y),
            (Value::Constant(x), Value::Constant(y)) => x.lte(y).unwrap_or(false),
            _ => false,
        }
    }

    fn concat(&self, a: &Value, b: &Value) -> Value {
        match (a, b) {
            (Value::String(x), Value::String(y)) => Value::String(format!("{}{}", x, y)),
            (Value::Array(xs), Value::Array(ys)) => {
                Value::Array(xs.iter().chain(ys).cloned().collect())
            }
            (Value::Object(xs), Value::Object(ys)) => {
                let mut merged = xs.clone();
                merged.extend(ys.iter().map(|(k, v)| (k.clone(), v.clone())));
                Value::Object(merged)
            }
            (Value::Identity(x), Value::Identity(y)) => Value::identity(self.concat(x, y)),
            (Value::Constant(x), Value::Constant(y)) => match x.concat(y) {
                Some(c) => Value::Constant(c),
                None => a.clone(),
            },
            _ => {
                warn!(
                    left = %a.constructor(),
                    right = %b.constructor(),
                    "concat of mismatched values; keeping left operand"
                );
                a.clone()
            }
        }
    }

    fn empty(&self, rep: &TypeRep) -> Result<Value, ConstantError> {
        match rep {
            TypeRep::Builtin(Builtin::Array) => Ok(Value::Array(Vec::new())),
            TypeRep::Builtin(Builtin::String) => Ok(Value::String(String::new())),
            TypeRep::Builtin(Builtin::Object) => Ok(Value::Object(BTreeMap::new())),
            TypeRep::Custom(custom) => custom
                .empty()
                .cloned()
                .ok_or_else(|| ConstantError::not_supported("Monoid", rep)),
            _ => Err(ConstantError::not_supported("Monoid", rep)),
        }
    }

    fn of(&self, rep: &TypeRep, value: Value) -> Result<Value, ConstantError> {
        match rep {
            TypeRep::Builtin(Builtin::Array) => Ok(Value::Array(vec![value])),
            TypeRep::Builtin(Builtin::Identity) => Ok(Value::identity(value)),
            TypeRep::Constant(ct) => ct
                .of(value)
                .map(Value::Constant)
                .ok_or_else(|| ConstantError::not_supported("Applicative", rep)),
            _ => Err(ConstantError::not_supported("Applicative", rep)),
        }
    }
}

impl StandardClasses {
    /// Compares sorted keys first, then the values under the first equal key
    /// whose values differ.
    fn lte_objects(&self, xs: &BTreeMap<String, Value>, ys: &BTreeMap<String, Value>) -> bool {
        let mut xs = xs.iter();
        let mut ys = ys.iter();
        loop {
            match (xs.next(), ys.next()) {
                (None, _) => return true,
                (Some(_), None) => return false,
                (Some((k1, v1)), Some((k2, v2))) => {
                    if k1 != k2 {
                        return k1 < k2;
                    }
                    if !self.equals(v1, v2) {
                        return self.lte(v1, v2);
                    }
                }
            }
        }
    }
}
