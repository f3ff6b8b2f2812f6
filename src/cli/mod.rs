//! CLI layer: argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod dispatch;
pub mod error;
pub mod output;

pub use args::Cli;
pub use dispatch::Invocation;
pub use error::{CliError, CliResult};
