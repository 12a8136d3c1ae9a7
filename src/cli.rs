//! CLI struct definitions for the `constant` command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "constant",
    version = env!("CARGO_PKG_VERSION"),
    about = "Wrap a JSON value in `Constant (<rep>)` and inspect what it supports"
)]
pub(crate) struct Cli {
    /// Config file declaring custom representatives (defaults to ./constant.toml).
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,
    /// Output format: 'text' or 'json'.
    #[clap(long, default_value = "text", global = true)]
    pub format: String,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Print the display form of `Constant (<rep>) (<value>)`
    Show {
        /// Representative name, e.g. `Array` or `Constant (Number)`.
        rep: String,
        /// Payload as JSON.
        value: String,
    },
    /// Print which algebraic structures the wrapped value satisfies
    Probe {
        rep: String,
        value: String,
    },
    /// Combine two payloads under one constructor
    Concat {
        rep: String,
        left: String,
        right: String,
    },
    /// Print `of` for a representative (monoids only)
    Of {
        rep: String,
    },
    /// Print the runtime type identifier shared by every constant
    Ident,
    /// List the known representatives
    Reps,
}
