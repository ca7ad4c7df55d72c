//! Error types for snipcache operations.
//!
//! This module defines [`SnipError`], the primary error type used throughout
//! the crate, [`RenderError`], the umbrella error handed to a renderer, and a
//! [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Cache and remote failures get distinct variants so the resolver can log
//!   which layer failed
//! - Use `anyhow::Error` (via `SnipError::Other`) for unexpected errors
//! - Nothing in this module is ever written into rendered page output except
//!   the collection id carried by [`RenderError`]

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for snipcache operations.
#[derive(Debug, Error)]
pub enum SnipError {
    /// A cache entry exists but could not be read or decoded.
    #[error("Failed to read cache entry {path}: {message}")]
    CacheRead { path: PathBuf, message: String },

    /// A cache entry could not be written.
    #[error("Failed to write cache entry {path}: {message}")]
    CacheWrite { path: PathBuf, message: String },

    /// The collection has no files, so nothing can be selected.
    #[error("No file found in collection {collection_id} (selector: '{selector}')")]
    FileNotFound {
        collection_id: String,
        selector: String,
    },

    /// A network call or its response body failed.
    #[error("Remote request to {url} failed: {message}")]
    RemoteContent { url: String, message: String },

    /// The formatting service rejected the snippet.
    #[error("Failed to format snippet as '{language}': {message}")]
    Highlight { language: String, message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SnipError {
    /// Build a [`SnipError::RemoteContent`] from any displayable cause.
    pub fn remote(url: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::RemoteContent {
            url: url.into(),
            message: cause.to_string(),
        }
    }
}

/// Result type alias for snipcache operations.
pub type Result<T> = std::result::Result<T, SnipError>;

/// A failed snippet resolution, tagged with the collection it was for.
///
/// Only the collection id is part of the `Display` output; the underlying
/// cause is exposed through [`std::error::Error::source`] for logging.
#[derive(Debug, Error)]
#[error("Error loading gist {collection_id}")]
pub struct RenderError {
    pub collection_id: String,
    #[source]
    pub source: SnipError,
}

impl RenderError {
    pub fn new(collection_id: impl Into<String>, source: SnipError) -> Self {
        Self {
            collection_id: collection_id.into(),
            source,
        }
    }
}
