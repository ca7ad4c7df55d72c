//! Cache key derivation for snippet references.

use sha2::{Digest, Sha256};
use std::fmt;

/// Stable on-disk identifier for one `(collection, selector)` pair.
///
/// Both components are sanitized down to `[A-Za-z0-9-_.]` before they
/// touch the digest or the file name, so a selector such as `../../etc`
/// can never steer where the entry is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    collection: String,
    selector: String,
    digest: String,
}

impl CacheKey {
    /// File extension used for cache entries on disk.
    pub const EXTENSION: &'static str = "cache.json";

    /// Derive the key for a collection id and optional selector.
    pub fn derive(collection_id: &str, selector: &str) -> Self {
        let collection = sanitize(collection_id);
        let selector = sanitize(selector);

        // ':' is outside the allow-set, so ("a-b", "") and ("a", "b") differ.
        let joined = format!("{}:{}", collection, selector);
        let hash = Sha256::digest(joined.as_bytes());
        let digest = hex::encode(&hash[..16]);

        Self {
            collection,
            selector,
            digest,
        }
    }

    /// Sanitized collection id.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Sanitized selector (empty for "first file").
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Hex digest (128 bits) of the sanitized pair.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// File name of this entry inside the cache directory.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self, Self::EXTENSION)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.collection, self.selector, self.digest)
    }
}

/// Shorthand for [`CacheKey::derive`].
pub fn derive(collection_id: &str, selector: &str) -> CacheKey {
    CacheKey::derive(collection_id, selector)
}

/// Strip every character outside `[A-Za-z0-9-_.]`.
pub fn sanitize(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect()
}
