//! HTML fragments produced for a rendered tag.

use maud::{html, PreEscaped};

use super::resolver::FormattedSnippet;

/// Wrap a formatted snippet in a captioned `<figure>` with a raw link.
///
/// The snippet body is already markup and is inserted as is.
pub fn figure(snippet: &FormattedSnippet) -> String {
    html! {
        figure class="code" {
            figcaption {
                span { (snippet.filename) }
                a href=(snippet.raw_url) { "raw" }
            }
            (PreEscaped(&snippet.html))
        }
    }
    .into_string()
}

/// Visible placeholder rendered in place of a snippet that failed to load.
pub fn error_marker(collection_id: &str) -> String {
    html! {
        p {
            code style="color:red" { "Error loading gist " (collection_id) }
        }
    }
    .into_string()
}
