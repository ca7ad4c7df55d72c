//! snipcache - fetch, format and cache remote code snippets for static sites.
//!
//! A site build refers to a snippet by collection id and optional file name.
//! snipcache looks the reference up in a local content-addressed cache,
//! fetches and formats it from the remote snippet service on a miss, and
//! optionally revalidates cached copies against the remote modification time.
//!
//! # Modules
//!
//! - [`cache`] - Cache keys, stored artifacts, and the on-disk store
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Site config loading and proxy resolution
//! - [`error`] - Error types and result aliases
//! - [`highlight`] - Snippet formatting seam and the plain fallback
//! - [`remote`] - HTTP client for the snippet API
//! - [`render`] - Cache-or-fetch resolution and tag rendering
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use snipcache::cache::CacheKey;
//!
//! let key = CacheKey::derive("abc123", "fish_prompt.fish");
//! assert!(key.file_name().starts_with("abc123-fish_prompt.fish-"));
//! assert!(key.file_name().ends_with(".cache.json"));
//! ```
//!
//! For end-to-end resolution against a mock server, see the integration tests.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod highlight;
pub mod remote;
pub mod render;
pub mod ui;

pub use error::{RenderError, Result, SnipError};
