//! Snippet resolution and tag rendering.
//!
//! - [`resolver`] - cache-or-fetch policy for one snippet reference
//! - [`tag`] - directive parsing and the `gist` / `gistnocache` / `gistbust` tags
//! - [`html`] - figure and error-marker fragments

pub mod html;
pub mod resolver;
pub mod tag;

pub use resolver::{
    FormattedSnippet, ResolveOptions, SnippetOrigin, SnippetReference, SnippetResolver,
};
pub use tag::{parse_directive, TagKind, TagRenderer};
