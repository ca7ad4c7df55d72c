//! Visual theme and styling.

use console::Style;

/// Styles for status lines.
#[derive(Debug, Clone)]
pub struct SnipTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
}

impl Default for SnipTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SnipTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }
}

/// Whether styled output written to `term` should carry colors.
pub fn should_use_colors(term: &console::Term) -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    colors_enabled(std::env::var_os("NO_COLOR").is_some(), term.is_term())
}

fn colors_enabled(no_color: bool, is_term: bool) -> bool {
    !no_color && is_term
}
