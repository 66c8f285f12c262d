//! Colored terminal output on stderr.

use std::fmt::Display;

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    label: Style,
    green: Style,
    red: Style,
    yellow: Style,
    dim: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().bold(),
            green: Style::new().green(),
            red: Style::new().red(),
            yellow: Style::new().yellow(),
            dim: Style::new().dim(),
        }
    }

    /// Print `label: value` with a bold label.
    pub(crate) fn field(&self, label: &str, value: impl Display) {
        let _ = self
            .term
            .write_line(&format!("{} {value}", self.label.apply_to(format!("{label}:"))));
    }

    /// Print an indented, dimmed list entry.
    pub(crate) fn item(&self, value: impl Display) {
        let _ = self
            .term
            .write_line(&format!("  {}", self.dim.apply_to(value)));
    }

    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }
}
