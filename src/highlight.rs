//! Formatting of fetched source text.
//!
//! Syntax highlighting is an external service behind the [`Highlighter`]
//! trait. When the remote API reports no language the snippet does not go
//! through the highlighter at all and is laid out by [`tableize_code`].

use maud::html;

use crate::error::Result;

/// Turns source text into HTML-safe markup.
pub trait Highlighter: Send + Sync {
    /// Highlight `code` written in `language` (lowercase).
    fn highlight(&self, code: &str, language: &str) -> Result<String>;
}

/// Highlighter that escapes the code and tags it with its language class.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Result<String> {
        Ok(tableize_code(code, language))
    }
}

/// Format a snippet, going through `highlighter` only when a language is known.
pub fn format_snippet(
    highlighter: &dyn Highlighter,
    raw: &str,
    language: Option<&str>,
) -> Result<String> {
    match language {
        Some(lang) => highlighter.highlight(raw, lang),
        None => Ok(tableize_code(raw.trim(), "")),
    }
}

/// Lay out source text as a table with a line-number gutter.
///
/// The text is escaped here; pass it raw.
pub fn tableize_code(code: &str, language: &str) -> String {
    let lines: Vec<&str> = code.split_inclusive('\n').collect();

    html! {
        div class="highlight" {
            table {
                tr {
                    td class="gutter" {
                        pre class="line-numbers" {
                            @for number in 1..=lines.len() {
                                span class="line-number" { (number) }
                                "\n"
                            }
                        }
                    }
                    td class="code" {
                        pre {
                            code class=(language) {
                                @for line in &lines {
                                    span class="line" { (line) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
    .into_string()
}
