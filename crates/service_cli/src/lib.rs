//! # service_cli: JCT Payment Schedule CLI
//!
//! Library half of the `jct-schedule` binary: layered configuration,
//! command implementations and schedule rendering.
//!
//! # Commands
//!
//! - `jct-schedule generate` - Generate and render a payment schedule
//! - `jct-schedule check` - Validate a configuration and report date ordering problems
//! - `jct-schedule init` - Write a starter configuration

#![deny(missing_docs)]

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use error::{CliError, Result};
