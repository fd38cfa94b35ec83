//! Snapshot command implementation.
//!
//! The `confreport snapshot` command is run by the scheduled job. It reads
//! the background-applicable values of every category and persists them
//! for later interactive reports.

use std::path::{Path, PathBuf};

use crate::cli::args::SnapshotArgs;
use crate::cli::setup::load_for_command;
use crate::config::project_path;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The snapshot command implementation.
pub struct SnapshotCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: SnapshotArgs,
}

impl SnapshotCommand {
    /// Create a new snapshot command.
    pub fn new(project_root: &Path, args: SnapshotArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: None,
            args,
        }
    }

    /// Use an explicit config file.
    pub fn with_config(mut self, config_path: Option<&Path>) -> Self {
        self.config_path = config_path.map(Path::to_path_buf);
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

impl Command for SnapshotCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(setup) = load_for_command(&self.project_root, self.config_path.as_deref(), ui)?
        else {
            return Ok(CommandResult::failure(2));
        };

        let path = match &self.args.output {
            Some(output) => project_path(&self.project_root, output),
            None => setup.snapshot_path().to_path_buf(),
        };

        let snapshot = setup.assembler().get_for_background_snapshot();
        snapshot.save(&path)?;
        tracing::info!("Background snapshot written to {}", path.display());

        let values: usize = snapshot.iter().map(|(_, values)| values.len()).sum();
        ui.success(&format!("Recorded {} values to {}", values, path.display()));
        Ok(CommandResult::success())
    }
}
