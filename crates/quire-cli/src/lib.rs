//! # quire-cli
//!
//! Command-line front end for Quire: configuration loading, the `fetch` and
//! `convert` commands, and `config` inspection helpers. The `quire` binary
//! is a thin wrapper over this crate.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;

pub use cli::{Cli, Command};
pub use config::QuireConfig;
