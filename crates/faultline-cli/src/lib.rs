//! faultline-cli: the outermost boundary.
//!
//! Wires configuration, logging and a file-backed repository together, runs one command,
//! and turns whatever failure reaches the top into a report and an exit code.
pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod prompt;
pub mod tracing_setup;

pub use app::{Cli, Command};
pub use config::Config;
pub use error::CliError;
