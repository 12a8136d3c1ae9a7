//! Runtime type identifiers.
//!
//! Generic dispatchers recognise constants by a namespaced, versioned tag
//! rather than by nominal type: `<namespace>/<name>@<version>`. The tag is
//! the same for every representative.

use crate::core::value::Value;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

pub const TYPE_IDENT: &str = "constant/Constant@1";

static IDENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\s\S]+)/([\s\S]+?)(?:@([0-9]+))?$").expect("type identifier regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeIdent {
    pub namespace: Option<String>,
    pub name: String,
    pub version: u32,
}

impl TypeIdent {
    /// Splits a tag into its parts. A bare name parses with no namespace and
    /// version 0.
    pub fn parse(tag: &str) -> Option<TypeIdent> {
        if tag.is_empty() {
            return None;
        }
        match IDENT.captures(tag) {
            Some(caps) => {
                let version = match caps.get(3) {
                    Some(v) => v.as_str().parse().ok()?,
                    None => 0,
                };
                Some(TypeIdent {
                    namespace: Some(caps[1].to_string()),
                    name: caps[2].to_string(),
                    version,
                })
            }
            None => Some(TypeIdent {
                namespace: None,
                name: tag.to_string(),
                version: 0,
            }),
        }
    }
}

impl fmt::Display for TypeIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) if self.version > 0 => write!(f, "{}/{}@{}", ns, self.name, self.version),
            Some(ns) => write!(f, "{}/{}", ns, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// The tag of a constant, or the constructor name of any other value.
pub fn type_ident(value: &Value) -> String {
    match value {
        Value::Constant(c) => c.type_ident().to_string(),
        other => other.constructor().to_string(),
    }
}
