//! Command-line interface for confreport.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations
//! - [`setup`] - Loading of configuration and value sources for a run

pub mod args;
pub mod commands;
pub mod setup;

pub use args::{CatalogArgs, Cli, Commands, ReportArgs, SnapshotArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
pub use setup::ReportSetup;
