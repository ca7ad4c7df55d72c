//! Terminal output for the CLI.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for terminal usage
//! - [`MockUI`] for asserting on output in tests
//!
//! # Example
//!
//! ```
//! use snipcache::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.success("Cleared 3 entries");
//! assert!(ui.has_success("Cleared"));
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, SnipTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Write a command's primary output (rendered HTML, JSON), unstyled and
    /// regardless of output mode.
    fn emit(&mut self, text: &str);

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Ask a yes/no question.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}
