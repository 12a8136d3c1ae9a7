//! Core modules: runtime values, representatives, the capability service
//! and the `Constant` factory built on them.

pub mod classes;
pub mod config;
pub mod constant;
pub mod error;
pub mod ident;
pub mod show;
pub mod type_rep;
pub mod value;
