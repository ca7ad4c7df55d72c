//! Snippet caching.
//!
//! This module provides the durable side of the engine: stable cache keys
//! derived from a snippet reference, the persisted [`CachedArtifact`]
//! record, and stores that hold them. Stores never expire anything; the
//! resolver decides when a stored artifact is stale.

pub mod artifact;
pub mod key;
pub mod store;

pub use artifact::CachedArtifact;
pub use key::{derive, sanitize, CacheKey};
pub use store::{ArtifactStore, CacheStore, MemoryStore};

/// Cache directory used when the site config does not name one.
pub const DEFAULT_CACHE_DIR: &str = ".gist-cache";

/// Get the default cache directory.
pub fn default_cache_dir() -> std::path::PathBuf {
    std::path::PathBuf::from(DEFAULT_CACHE_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cache_dir_valid() {
        let path = default_cache_dir();
        assert!(path.ends_with(".gist-cache"));
    }
}
