//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. Confirmation prompts answer with a
//! configured response.

use crate::error::Result;

use super::UserInterface;

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    interactive: bool,
    outputs: Vec<String>,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    confirm_response: Option<bool>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every confirmation with `response`.
    pub fn set_confirm_response(&mut self, response: bool) {
        self.confirm_response = Some(response);
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all primary output.
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    /// Get all confirmation questions that were shown.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if primary output contains `text`.
    pub fn has_output(&self, text: &str) -> bool {
        self.outputs.iter().any(|m| m.contains(text))
    }
}

impl UserInterface for MockUI {
    fn emit(&mut self, text: &str) {
        self.outputs.push(text.to_string());
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        self.prompts_shown.push(question.to_string());
        Ok(self.confirm_response.unwrap_or(default))
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_interactions() {
        let mut ui = MockUI::new();
        ui.emit("<figure>");
        ui.message("hello");
        ui.error("bad");

        assert!(ui.has_output("<figure>"));
        assert!(ui.has_message("hello"));
        assert!(ui.has_error("bad"));
        assert!(!ui.is_interactive());
    }

    #[test]
    fn confirm_uses_response_or_default() {
        let mut ui = MockUI::new();
        assert!(!ui.confirm("Clear?", false).unwrap());

        ui.set_confirm_response(true);
        assert!(ui.confirm("Clear?", false).unwrap());
        assert_eq!(ui.prompts_shown().len(), 2);
    }
}
