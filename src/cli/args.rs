//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// confreport - Server environment diagnostics.
#[derive(Debug, Parser)]
#[command(name = "confreport")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default confreport.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate the environment (default if no command specified)
    Report(ReportArgs),

    /// Record background-context readings for later reports
    Snapshot(SnapshotArgs),

    /// List the built-in checks and verify the catalog
    Catalog(CatalogArgs),
}

/// Arguments for the `report` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ReportArgs {
    /// Only evaluate this category
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Only show failing checks
    #[arg(long)]
    pub failed_only: bool,
}

/// Arguments for the `snapshot` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SnapshotArgs {
    /// Write the snapshot here instead of the configured location
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `catalog` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CatalogArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
