//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, ReportTheme, UserInterface};

/// Terminal UI implementation.
///
/// Report output goes to stdout; errors go to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: ReportTheme,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(colors: bool) -> Self {
        let theme = if colors {
            ReportTheme::new()
        } else {
            ReportTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
        }
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        writeln!(self.out, "\n{}", self.theme.format_header(title)).ok();
    }

    fn theme(&self) -> &ReportTheme {
        &self.theme
    }
}

/// Create the terminal UI, honoring `--no-color` and `NO_COLOR`.
pub fn create_ui(no_color: bool) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(!no_color && should_use_colors()))
}
