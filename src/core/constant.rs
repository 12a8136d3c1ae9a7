//! The `Constant` factory and its instances.
//!
//! A value of type `Constant a b` always contains exactly one value of type
//! `a`. Mapping over it has no effect because the `b -> c` function is never
//! applied.
//!
//! `ConstantType::new(rep, classes)` plays the role of the type constructor:
//! it fixes the representative of `a` and returns a factory whose
//! `construct` builds instances. Every instance carries a capability table
//! filled once, at construction, by probing the payload:
//!
//! | Structure   | Present when                                     |
//! |-------------|--------------------------------------------------|
//! | Setoid      | payload is a Setoid                              |
//! | Ord         | payload is an Ord                                |
//! | Semigroup   | payload is a Semigroup                           |
//! | Functor     | always                                           |
//! | Bifunctor   | always                                           |
//! | Apply       | payload is a Semigroup                           |
//! | Applicative | payload is a Semigroup and `rep` has an empty    |
//! | Foldable    | always                                           |
//! | Traversable | always                                           |
//!
//! Operations whose structure is absent return `None`.
//!
//! `equals`, `lte`, `concat` and `ap` assume both operands came from the
//! same representative. Mixing representatives is not checked and the result
//! is whatever the payload service makes of the two payloads.

use crate::core::classes::{StandardClasses, TypeClasses};
use crate::core::error::ConstantError;
use crate::core::ident::TYPE_IDENT;
use crate::core::type_rep::TypeRep;
use crate::core::value::Value;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetoidLevel {
    NotSetoid,
    Setoid,
    /// Setoid with a total order.
    Ord,
}

/// The classification of a payload, computed once per construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Probe {
    pub setoid: SetoidLevel,
    pub semigroup: bool,
}

impl Probe {
    pub fn run(classes: &dyn TypeClasses, value: &Value) -> Self {
        let setoid = if !classes.is_setoid(value) {
            SetoidLevel::NotSetoid
        } else if classes.is_ord(value) {
            SetoidLevel::Ord
        } else {
            SetoidLevel::Setoid
        };
        Probe {
            setoid,
            semigroup: classes.is_semigroup(value),
        }
    }

    pub fn is_setoid(&self) -> bool {
        self.setoid != SetoidLevel::NotSetoid
    }

    pub fn is_ord(&self) -> bool {
        self.setoid == SetoidLevel::Ord
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Capability {
    Setoid,
    Ord,
    Semigroup,
    Functor,
    Bifunctor,
    Apply,
    Applicative,
    Foldable,
    Traversable,
}

impl Capability {
    pub fn name(self) -> &'static str {
        match self {
            Capability::Setoid => "Setoid",
            Capability::Ord => "Ord",
            Capability::Semigroup => "Semigroup",
            Capability::Functor => "Functor",
            Capability::Bifunctor => "Bifunctor",
            Capability::Apply => "Apply",
            Capability::Applicative => "Applicative",
            Capability::Foldable => "Foldable",
            Capability::Traversable => "Traversable",
        }
    }
}

type Compare = fn(&dyn TypeClasses, &Value, &Value) -> bool;
type Combine = fn(&dyn TypeClasses, &Value, &Value) -> Value;

#[derive(Clone, Copy)]
struct SetoidOps {
    equals: Compare,
    lte: Option<Compare>,
}

#[derive(Clone, Copy)]
struct SemigroupOps {
    concat: Combine,
}

fn equals_payloads(classes: &dyn TypeClasses, a: &Value, b: &Value) -> bool {
    classes.equals(a, b)
}

fn lte_payloads(classes: &dyn TypeClasses, a: &Value, b: &Value) -> bool {
    classes.lte(a, b)
}

fn concat_payloads(classes: &dyn TypeClasses, a: &Value, b: &Value) -> Value {
    classes.concat(a, b)
}

struct Factory {
    rep: TypeRep,
    classes: Arc<dyn TypeClasses>,
    empty: Option<Value>,
}

/// A constant type constructor for one representative.
///
/// Each call to [`ConstantType::new`] yields a distinct constructor, even
/// for equal representatives; equality is identity.
#[derive(Clone)]
pub struct ConstantType(Arc<Factory>);

impl ConstantType {
    /// Builds the constructor for `rep`.
    ///
    /// The empty element of `rep` is looked up once here. When `rep` is not
    /// a monoid the lookup error is dropped and `of` is simply unavailable.
    pub fn new(rep: impl Into<TypeRep>, classes: Arc<dyn TypeClasses>) -> Self {
        let rep = rep.into();
        let empty = match classes.empty(&rep) {
            Ok(empty) => Some(empty),
            Err(err) => {
                debug!(rep = %rep, error = %err, "no empty element; `of` unavailable");
                None
            }
        };
        ConstantType(Arc::new(Factory {
            rep,
            classes,
            empty,
        }))
    }

    /// Builds the constructor for `rep` over the builtin instances.
    pub fn standard(rep: impl Into<TypeRep>) -> Self {
        Self::new(rep, Arc::new(StandardClasses))
    }

    pub fn rep(&self) -> &TypeRep {
        &self.0.rep
    }

    pub fn classes(&self) -> &Arc<dyn TypeClasses> {
        &self.0.classes
    }

    /// Wraps `value`, probing it for Setoid, Ord and Semigroup.
    pub fn construct(&self, value: impl Into<Value>) -> Constant {
        let value = value.into();
        let probe = Probe::run(self.0.classes.as_ref(), &value);
        debug!(rep = %self.0.rep, ?probe, "constructed constant");

        let setoid = probe.is_setoid().then(|| SetoidOps {
            equals: equals_payloads,
            lte: probe.is_ord().then_some(lte_payloads as Compare),
        });
        let semigroup = probe.semigroup.then_some(SemigroupOps {
            concat: concat_payloads,
        });

        Constant(Arc::new(Instance {
            constructor: self.clone(),
            setoid,
            semigroup,
            value,
        }))
    }

    pub fn has_of(&self) -> bool {
        self.0.empty.is_some()
    }

    /// `Constant (rep) (empty)`, ignoring `_value`. `None` unless `rep` is a
    /// monoid.
    pub fn of(&self, _value: impl Into<Value>) -> Option<Constant> {
        self.0.empty.as_ref().map(|empty| self.construct(empty.clone()))
    }

    pub fn ptr_eq(&self, other: &ConstantType) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ConstantType {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ConstantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstantType")
            .field("rep", &self.0.rep)
            .field("empty", &self.0.empty)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ConstantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constant ({})", self.0.rep)
    }
}

struct Instance {
    constructor: ConstantType,
    setoid: Option<SetoidOps>,
    semigroup: Option<SemigroupOps>,
    value: Value,
}

/// An immutable `Constant a b` holding one payload.
///
/// Cloning is cheap and shares the instance.
#[derive(Clone)]
pub struct Constant(Arc<Instance>);

impl Constant {
    pub fn constructor(&self) -> &ConstantType {
        &self.0.constructor
    }

    pub fn type_rep(&self) -> &TypeRep {
        self.0.constructor.rep()
    }

    pub fn value(&self) -> &Value {
        &self.0.value
    }

    pub fn type_ident(&self) -> &'static str {
        TYPE_IDENT
    }

    fn classes(&self) -> &dyn TypeClasses {
        self.0.constructor.classes().as_ref()
    }

    pub fn probe(&self) -> Probe {
        let setoid = match self.0.setoid {
            None => SetoidLevel::NotSetoid,
            Some(SetoidOps { lte: Some(_), .. }) => SetoidLevel::Ord,
            Some(_) => SetoidLevel::Setoid,
        };
        Probe {
            setoid,
            semigroup: self.0.semigroup.is_some(),
        }
    }

    pub fn capabilities(&self) -> Vec<Capability> {
        let probe = self.probe();
        let mut caps = Vec::with_capacity(9);
        if probe.is_setoid() {
            caps.push(Capability::Setoid);
        }
        if probe.is_ord() {
            caps.push(Capability::Ord);
        }
        if probe.semigroup {
            caps.push(Capability::Semigroup);
        }
        caps.push(Capability::Functor);
        caps.push(Capability::Bifunctor);
        if probe.semigroup {
            caps.push(Capability::Apply);
            if self.0.constructor.has_of() {
                caps.push(Capability::Applicative);
            }
        }
        caps.push(Capability::Foldable);
        caps.push(Capability::Traversable);
        caps
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Structural equality of the payloads.
    pub fn equals(&self, other: &Constant) -> Option<bool> {
        self.0
            .setoid
            .map(|ops| (ops.equals)(self.classes(), self.value(), other.value()))
    }

    pub fn lte(&self, other: &Constant) -> Option<bool> {
        self.0
            .setoid
            .and_then(|ops| ops.lte)
            .map(|lte| lte(self.classes(), self.value(), other.value()))
    }

    /// `Constant (A) (x) ++ Constant (A) (y) = Constant (A) (x ++ y)`.
    pub fn concat(&self, other: &Constant) -> Option<Constant> {
        self.0.semigroup.map(|ops| {
            let combined = (ops.concat)(self.classes(), self.value(), other.value());
            self.0.constructor.construct(combined)
        })
    }

    /// Apply degenerates to combination with the operands swapped:
    /// `ap(x, f) = concat(f, x)`.
    pub fn ap(&self, other: &Constant) -> Option<Constant> {
        self.0.semigroup.map(|ops| {
            let combined = (ops.concat)(self.classes(), other.value(), self.value());
            self.0.constructor.construct(combined)
        })
    }

    /// Returns this same instance; `_f` is never called.
    pub fn map<F>(&self, _f: F) -> Constant
    where
        F: FnOnce(&Value) -> Value,
    {
        self.clone()
    }

    /// Applies `f` to the payload. `_g` is never called.
    ///
    /// The representative of the result is the runtime constructor of
    /// `f`'s output, so a `Constant (String)` mapped through a length
    /// function comes back as a `Constant (Number)` with Number's
    /// capabilities.
    pub fn bimap<F, G>(&self, f: F, _g: G) -> Constant
    where
        F: FnOnce(&Value) -> Value,
        G: FnOnce(&Value) -> Value,
    {
        let mapped = f(self.value());
        ConstantType::new(mapped.constructor(), Arc::clone(self.0.constructor.classes()))
            .construct(mapped)
    }

    /// Returns `seed`; `_f` is never called.
    pub fn reduce<B, F>(&self, _f: F, seed: B) -> B
    where
        F: FnMut(B, &Value) -> B,
    {
        seed
    }

    /// Lifts this instance into the applicative `rep`; `_f` is never called.
    pub fn traverse<F>(&self, rep: &TypeRep, _f: F) -> Result<Value, ConstantError>
    where
        F: FnMut(&Value) -> Value,
    {
        self.classes().of(rep, Value::Constant(self.clone()))
    }

    /// `Constant (<rep>) (<payload>)`.
    pub fn show(&self) -> String {
        format!(
            "{} ({})",
            self.0.constructor,
            self.classes().show(self.value())
        )
    }

    pub fn ptr_eq(&self, other: &Constant) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.0.constructor == other.0.constructor && self.0.value == other.0.value)
    }
}

impl fmt::Debug for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constant")
            .field("rep", self.type_rep())
            .field("value", self.value())
            .finish()
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.show())
    }
}
