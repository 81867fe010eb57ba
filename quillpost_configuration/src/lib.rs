//! Configuration loading and validation.
//!
//! Your starting point should probably be [`Configuration::load_from_default_path`].
//!
//! # Internals
//! The configuration file is first deserialized into an "unresolved" structure,
//! which mirrors the TOML file as written. That structure is then resolved into
//! [`Configuration`], which is where defaults are filled in and values are validated
//! (e.g. the logging filters must parse as [`EnvFilter`][tracing_subscriber::EnvFilter]s).

mod error;
mod structure;
mod traits;
mod utilities;

pub use error::*;
pub use structure::*;
