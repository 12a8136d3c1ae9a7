//! Constant: a container that ignores its second type parameter.
//!
//! A value of type `Constant a b` always contains exactly one value of type
//! `a`. Mapping over a `Constant a b` has no effect because the `b -> c`
//! function is never applied.
//!
//! # Structures
//!
//! Every constant is a Functor, Bifunctor, Foldable and Traversable. The
//! rest depend on the payload, probed once when the constant is built:
//!
//! - **Setoid** / **Ord**: if the payload is
//! - **Semigroup** / **Apply**: if the payload is a Semigroup
//! - **Applicative**: if, in addition, the representative is a Monoid
//!
//! # Examples
//!
//! ```
//! use constant::{Builtin, ConstantType, Value};
//!
//! let array = ConstantType::standard(Builtin::Array);
//! let c = array.construct(vec!["foo", "bar", "baz"]);
//! assert_eq!(c.show(), r#"Constant (Array) (["foo", "bar", "baz"])"#);
//!
//! let joined = array
//!     .construct(vec![1, 2, 3])
//!     .concat(&array.construct(vec![4, 5, 6]))
//!     .expect("arrays are semigroups");
//! assert_eq!(joined.value(), &Value::from(vec![1, 2, 3, 4, 5, 6]));
//! ```
//!
//! ```bash
//! constant show Array '["foo", "bar", "baz"]'
//! constant probe Number 42 --format json
//! constant concat String '"abc"' '"def"'
//! ```
//!
//! # Crate Structure
//!
//! - [`core`]: values, representatives, the capability service, the factory
//! - `cli`: command-line surface of the `constant` binary

mod cli;
pub mod core;

pub use crate::core::classes::{StandardClasses, TypeClasses};
pub use crate::core::config::{Config, RepDef, RepRegistry};
pub use crate::core::constant::{Capability, Constant, ConstantType, Probe, SetoidLevel};
pub use crate::core::error::ConstantError;
pub use crate::core::ident::{TYPE_IDENT, TypeIdent, type_ident};
pub use crate::core::type_rep::{Builtin, CustomRep, RepDisplay, TypeRep};
pub use crate::core::value::{Foreign, Function, Value};

use clap::Parser;
use cli::{Cli, Command};
use colored::Colorize;
use std::path::Path;

fn load_registry(config: Option<&Path>) -> Result<RepRegistry, ConstantError> {
    let config = match config {
        Some(path) => crate::core::config::load_config_file(path)?,
        None => crate::core::config::load_config(Path::new("."))?,
    };
    RepRegistry::from_config(&config)
}

fn parse_value(json: &str) -> Result<Value, ConstantError> {
    let parsed: serde_json::Value = serde_json::from_str(json)?;
    Ok(Value::from(parsed))
}

fn print_constant(c: &Constant, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "type": c.type_ident(),
                "show": c.show(),
            })
        );
    } else {
        println!("{}", c.show());
    }
}

pub fn run() -> Result<(), ConstantError> {
    let cli = Cli::parse();
    let registry = load_registry(cli.config.as_deref())?;
    let json = cli.format == "json";

    match cli.command {
        Command::Show { rep, value } => {
            let c = registry.constant_type(&rep)?.construct(parse_value(&value)?);
            print_constant(&c, json);
        }
        Command::Probe { rep, value } => {
            let c = registry.constant_type(&rep)?.construct(parse_value(&value)?);
            let caps = c.capabilities();
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "show": c.show(),
                        "probe": c.probe(),
                        "capabilities": caps.iter().map(|cap| cap.name()).collect::<Vec<_>>(),
                    })
                );
            } else {
                println!("{}", c.show().bright_white().bold());
                for cap in [
                    Capability::Setoid,
                    Capability::Ord,
                    Capability::Semigroup,
                    Capability::Functor,
                    Capability::Bifunctor,
                    Capability::Apply,
                    Capability::Applicative,
                    Capability::Foldable,
                    Capability::Traversable,
                ] {
                    let mark = if caps.contains(&cap) {
                        "yes".green()
                    } else {
                        "no".red()
                    };
                    println!("  {:<12} {}", cap.name(), mark);
                }
            }
        }
        Command::Concat { rep, left, right } => {
            let ct = registry.constant_type(&rep)?;
            let left = ct.construct(parse_value(&left)?);
            let right = ct.construct(parse_value(&right)?);
            let combined = left
                .concat(&right)
                .ok_or_else(|| ConstantError::not_supported("Semigroup", left.show()))?;
            print_constant(&combined, json);
        }
        Command::Of { rep } => {
            let ct = registry.constant_type(&rep)?;
            let c = ct
                .of(Value::Undefined)
                .ok_or_else(|| ConstantError::not_supported("Monoid", ct.rep()))?;
            print_constant(&c, json);
        }
        Command::Ident => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "type": TYPE_IDENT,
                        "parsed": TypeIdent::parse(TYPE_IDENT),
                    })
                );
            } else {
                println!("{}", TYPE_IDENT);
            }
        }
        Command::Reps => {
            let names = registry.names();
            if json {
                println!("{}", serde_json::json!({ "reps": names }));
            } else {
                for name in names {
                    println!("{}", name);
                }
            }
        }
    }

    Ok(())
}
