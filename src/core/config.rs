//! Representative configuration and name resolution.
//!
//! Custom representatives are declared in `constant.toml`:
//!
//! ```toml
//! [[rep]]
//! name = "Money"
//! source = "function Money(cents) {}"
//! empty = 0
//! ```

use crate::core::classes::{StandardClasses, TypeClasses};
use crate::core::constant::ConstantType;
use crate::core::error::ConstantError;
use crate::core::type_rep::{Builtin, CustomRep, TypeRep};
use crate::core::value::Value;
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::{Arc, LazyLock};

pub const CONFIG_FILE: &str = "constant.toml";

static NESTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*Constant\s*\((.*)\)\s*$").expect("nested rep regex"));

/// A custom representative from `constant.toml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepDef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub empty: Option<toml::Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub rep: Vec<RepDef>,
}

impl RepDef {
    pub fn to_rep(&self) -> Result<CustomRep, ConstantError> {
        let mut rep = match &self.name {
            Some(name) => CustomRep::named(name, &self.source),
            None => CustomRep::anonymous(&self.source),
        };
        if let Some(empty) = &self.empty {
            rep = rep.with_empty(Value::from(serde_json::to_value(empty)?));
        }
        Ok(rep)
    }
}

/// Load `constant.toml` from `dir`. No file means no custom representatives.
pub fn load_config(dir: &Path) -> Result<Config, ConstantError> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }
    load_config_file(&path)
}

pub fn load_config_file(path: &Path) -> Result<Config, ConstantError> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ConstantError::Config(e.to_string()))
}

/// Resolves representative names to `TypeRep`s.
///
/// Keys are display names, so an unnamed `function Foo() {}` registers as
/// `Foo` and an unparseable source registers under its full text.
/// `Constant (<name>)` resolves to a fresh constant constructor over
/// `<name>`.
pub struct RepRegistry {
    reps: FxHashMap<String, TypeRep>,
    classes: Arc<dyn TypeClasses>,
}

impl RepRegistry {
    pub fn builtins() -> Self {
        Self::with_classes(Arc::new(StandardClasses))
    }

    pub fn with_classes(classes: Arc<dyn TypeClasses>) -> Self {
        let mut registry = RepRegistry {
            reps: FxHashMap::default(),
            classes,
        };
        for b in Builtin::ALL {
            registry.register(TypeRep::Builtin(b));
        }
        registry
    }

    pub fn from_config(config: &Config) -> Result<Self, ConstantError> {
        let mut registry = Self::builtins();
        for def in &config.rep {
            registry.register(TypeRep::custom(def.to_rep()?));
        }
        Ok(registry)
    }

    pub fn register(&mut self, rep: TypeRep) {
        self.reps.insert(rep.to_string(), rep);
    }

    pub fn classes(&self) -> &Arc<dyn TypeClasses> {
        &self.classes
    }

    pub fn resolve(&self, name: &str) -> Result<TypeRep, ConstantError> {
        if let Some(rep) = self.reps.get(name.trim()) {
            return Ok(rep.clone());
        }
        if let Some(caps) = NESTED.captures(name) {
            let inner = self.constant_type(&caps[1])?;
            return Ok(TypeRep::Constant(inner));
        }
        Err(ConstantError::UnknownRep(name.to_string()))
    }

    pub fn constant_type(&self, name: &str) -> Result<ConstantType, ConstantError> {
        let rep = self.resolve(name)?;
        Ok(ConstantType::new(rep, Arc::clone(&self.classes)))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.reps.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
