//! Report command implementation.
//!
//! The `confreport report` command evaluates the environment and prints one
//! table per category, or the whole report as JSON.

use std::path::{Path, PathBuf};

use crate::catalog::Category;
use crate::cli::args::ReportArgs;
use crate::cli::setup::load_for_command;
use crate::error::Result;
use crate::report::{all_passed, Report};
use crate::ui::{Table, UserInterface};
use crate::validate::EvaluationResult;
use crate::value::RawValue;

use super::dispatcher::{Command, CommandResult};

/// The report command implementation.
pub struct ReportCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: ReportArgs,
}

impl ReportCommand {
    /// Create a new report command.
    pub fn new(project_root: &Path, args: ReportArgs) -> Self {
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

    /// Get the command arguments.
    pub fn args(&self) -> &ReportArgs {
        &self.args
    }

    fn render_tables(&self, report: &Report, ui: &mut dyn UserInterface) {
        for (category, results) in report {
            let rows: Vec<&EvaluationResult> = results
                .iter()
                .filter(|r| !self.args.failed_only || !r.status)
                .collect();
            if rows.is_empty() {
                continue;
            }

            ui.show_header(&title(*category));
            let mut table = Table::new(&[
                "Name",
                "Recommended",
                "Value",
                "Background",
                "Recorded",
                "Status",
            ]);
            for result in rows {
                let status = ui.theme().format_status(result.status);
                table.add_row(vec![
                    result.display_name().to_string(),
                    result.recommended.clone().unwrap_or_default(),
                    text(result.interactive.as_ref()),
                    text(result.background.as_ref()),
                    text(result.override_value.as_ref()),
                    status,
                ]);
            }
            ui.message(&table.render());
        }
    }
}

impl Command for ReportCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let category = self
            .args
            .category
            .as_deref()
            .map(str::parse::<Category>)
            .transpose()?;

        let Some(setup) = load_for_command(&self.project_root, self.config_path.as_deref(), ui)?
        else {
            return Ok(CommandResult::failure(2));
        };

        let assembler = setup.assembler();
        let report: Report = match category {
            Some(category) => Report::from([(category, assembler.get(category))]),
            None => assembler.get_all(),
        };
        let passed = all_passed(&report);

        if self.args.json {
            let shown: Report = if self.args.failed_only {
                report
                    .iter()
                    .map(|(c, results)| {
                        let failed = results.iter().filter(|r| !r.status).cloned().collect();
                        (*c, failed)
                    })
                    .collect()
            } else {
                report
            };
            ui.message(&serde_json::to_string_pretty(&shown)?);
        } else {
            self.render_tables(&report, ui);
            ui.message("");
            if passed {
                ui.success("All checks passed");
            } else {
                let failed = report.values().flatten().filter(|r| !r.status).count();
                ui.warning(&format!("{} check(s) below recommendation", failed));
            }
        }

        if passed {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

fn title(category: Category) -> String {
    let name = category.name();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn text(value: Option<&RawValue>) -> String {
    value.map(|v| v.as_text()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfReportError;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const RUNTIME: &str = r#"
version: 8.1.2
sapi: cli
modules: [curl, gd, mbstring]
settings:
  memory_limit: 128M
  log_errors: "1"
"#;

    fn setup_project() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("confreport.yml"),
            "runtime_snapshot: runtime.yml\n",
        )
        .unwrap();
        fs::write(temp.path().join("runtime.yml"), RUNTIME).unwrap();
        temp
    }

    fn args(category: Option<&str>, json: bool, failed_only: bool) -> ReportArgs {
        ReportArgs {
            category: category.map(str::to_string),
            json,
            failed_only,
        }
    }

    #[test]
    fn report_command_creation() {
        let temp = TempDir::new().unwrap();
        let cmd = ReportCommand::new(temp.path(), ReportArgs::default());
        assert_eq!(cmd.project_root(), temp.path());
        assert!(!cmd.args().json);
    }

    #[test]
    fn renders_one_table_per_category() {
        let temp = setup_project();
        let cmd = ReportCommand::new(temp.path(), ReportArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert_eq!(
            ui.headers(),
            ["Stability", "Security", "Libraries", "Database", "Performance"]
                .map(String::from)
                .as_slice()
        );
        assert!(ui.output().contains("memory_limit"));
    }

    #[test]
    fn below_recommendation_exits_with_one() {
        let temp = setup_project();
        let cmd = ReportCommand::new(temp.path(), args(Some("stability"), false, false));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
        assert_eq!(ui.warnings().len(), 1);
    }

    #[test]
    fn json_output_is_keyed_by_category() {
        let temp = setup_project();
        let cmd = ReportCommand::new(temp.path(), args(Some("libraries"), true, false));
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&ui.output()).unwrap();
        let libraries = parsed["libraries"].as_array().unwrap();
        assert!(libraries.iter().any(|r| r["name"] == "gd"));
        assert!(parsed.get("stability").is_none());
    }

    #[test]
    fn failed_only_hides_passing_rows() {
        let temp = setup_project();
        let cmd = ReportCommand::new(temp.path(), args(Some("stability"), true, true));
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&ui.output()).unwrap();
        let stability = parsed["stability"].as_array().unwrap();
        assert!(stability.iter().all(|r| r["status"] == false));
        assert!(stability.iter().any(|r| r["name"] == "memory_limit"));
        assert!(!stability.iter().any(|r| r["name"] == "log_errors"));
    }

    #[test]
    fn unknown_category_is_an_error() {
        let temp = setup_project();
        let cmd = ReportCommand::new(temp.path(), args(Some("network"), false, false));
        let mut ui = MockUI::new();

        let err = cmd.execute(&mut ui).unwrap_err();

        assert!(matches!(err, ConfReportError::UnknownCategory { .. }));
    }

    #[test]
    fn table_shows_recorded_value_next_to_normalized_background() {
        let temp = setup_project();
        fs::create_dir_all(temp.path().join("user_privileges")).unwrap();
        fs::write(
            temp.path().join("user_privileges/cron.json"),
            r#"{"stability":{"memory_limit":"2G"}}"#,
        )
        .unwrap();
        let cmd = ReportCommand::new(temp.path(), args(Some("stability"), false, false));
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let output = ui.output();
        assert!(output.contains("Recorded"));
        assert!(output.contains("2G"));
        assert!(output.contains("2.00 GB"));
    }

    #[test]
    fn title_capitalizes() {
        assert_eq!(title(Category::Performance), "Performance");
    }
}
