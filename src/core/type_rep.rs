//! Type representatives.
//!
//! A representative stands for the type of a payload. It is used to render
//! a constructor's display name and to derive the empty element of a monoid.

use crate::core::constant::ConstantType;
use crate::core::value::Value;
use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};

static FUNCTION_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*function ([$_A-Za-z][$_A-Za-z0-9]*)").expect("function name regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
    RegExp,
    Function,
    Identity,
}

impl Builtin {
    pub const ALL: [Builtin; 10] = [
        Builtin::Undefined,
        Builtin::Null,
        Builtin::Boolean,
        Builtin::Number,
        Builtin::String,
        Builtin::Array,
        Builtin::Object,
        Builtin::RegExp,
        Builtin::Function,
        Builtin::Identity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Undefined => "Undefined",
            Builtin::Null => "Null",
            Builtin::Boolean => "Boolean",
            Builtin::Number => "Number",
            Builtin::String => "String",
            Builtin::Array => "Array",
            Builtin::Object => "Object",
            Builtin::RegExp => "RegExp",
            Builtin::Function => "Function",
            Builtin::Identity => "Identity",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }
}

/// A caller-supplied representative.
///
/// `name` may be absent, in which case the display falls back to `source`.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomRep {
    name: Option<String>,
    source: String,
    empty: Option<Value>,
}

impl CustomRep {
    pub fn named(name: impl Into<String>, source: impl Into<String>) -> Self {
        CustomRep {
            name: Some(name.into()),
            source: source.into(),
            empty: None,
        }
    }

    pub fn anonymous(source: impl Into<String>) -> Self {
        CustomRep {
            name: None,
            source: source.into(),
            empty: None,
        }
    }

    /// Declares the identity element, making the representative a monoid.
    pub fn with_empty(mut self, empty: impl Into<Value>) -> Self {
        self.empty = Some(empty.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn empty(&self) -> Option<&Value> {
        self.empty.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeRep {
    Builtin(Builtin),
    /// The constructor produced by a `ConstantType`, used as a representative.
    Constant(ConstantType),
    Custom(Arc<CustomRep>),
}

impl TypeRep {
    pub fn custom(rep: CustomRep) -> Self {
        TypeRep::Custom(Arc::new(rep))
    }

    pub fn display(&self) -> RepDisplay {
        RepDisplay::resolve(self)
    }
}

impl From<Builtin> for TypeRep {
    fn from(b: Builtin) -> Self {
        TypeRep::Builtin(b)
    }
}

impl From<ConstantType> for TypeRep {
    fn from(ct: ConstantType) -> Self {
        TypeRep::Constant(ct)
    }
}

impl From<CustomRep> for TypeRep {
    fn from(rep: CustomRep) -> Self {
        TypeRep::custom(rep)
    }
}

impl fmt::Display for TypeRep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display().as_str())
    }
}

/// How a representative is rendered inside `Constant (...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepDisplay {
    Named(String),
    /// A constant constructor used as a representative renders recursively.
    NestedConstant(String),
    /// Unnamed, but `function <ident>` was found in the source.
    ParsedSource(String),
    /// Unnamed and unparseable: the raw source.
    Source(String),
}

impl RepDisplay {
    pub fn resolve(rep: &TypeRep) -> Self {
        match rep {
            TypeRep::Builtin(b) => RepDisplay::Named(b.name().to_string()),
            TypeRep::Constant(ct) => RepDisplay::NestedConstant(ct.to_string()),
            TypeRep::Custom(custom) => match custom.name() {
                Some(name) => RepDisplay::Named(name.to_string()),
                None => match FUNCTION_NAME.captures(custom.source()) {
                    Some(caps) => RepDisplay::ParsedSource(caps[1].to_string()),
                    None => RepDisplay::Source(custom.source().to_string()),
                },
            },
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RepDisplay::Named(s)
            | RepDisplay::NestedConstant(s)
            | RepDisplay::ParsedSource(s)
            | RepDisplay::Source(s) => s,
        }
    }
}
