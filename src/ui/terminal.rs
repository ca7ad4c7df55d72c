//! Terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;

use super::{should_use_colors, OutputMode, SnipTheme, UserInterface};

/// Terminal UI implementation.
///
/// Primary output goes to stdout; status lines go to stderr so that
/// rendered HTML can be piped cleanly.
pub struct TerminalUI {
    out: Term,
    status: Term,
    theme: SnipTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let status = Term::stderr();
        // Styled lines only ever go to the status stream.
        let theme = if should_use_colors(&status) {
            SnipTheme::new()
        } else {
            SnipTheme::plain()
        };

        Self {
            out: Term::stdout(),
            status,
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn emit(&mut self, text: &str) {
        writeln!(self.out, "{}", text).ok();
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.status, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.status, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.status, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.status, "{}", self.theme.format_error(msg)).ok();
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        write!(self.status, "{} {} ", question, self.theme.dim.apply_to(hint))?;
        let answer = self.status.read_line()?;

        Ok(match answer.trim().to_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        })
    }

    fn is_interactive(&self) -> bool {
        self.status.is_term()
    }
}
