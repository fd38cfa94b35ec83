//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`confreport report`, `confreport snapshot`)
//! - Shared loading of configuration and value sources
//! - Consistent global flag handling

pub mod catalog;
pub mod dispatcher;
pub mod report;
pub mod snapshot;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
