//! Persisted snippet artifact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fetched, formatted snippet as stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedArtifact {
    /// Remote collection id (as given in the tag, not sanitized).
    pub collection_id: String,
    /// File name actually chosen from the collection.
    pub selector_resolved: String,
    /// Upstream raw location, used for the "raw" link.
    pub raw_url: String,
    /// Collection-level last-modified time reported by the remote API.
    pub updated_at: Option<DateTime<Utc>>,
    /// Lowercased language name, if the API reported one.
    pub language: Option<String>,
    /// Pre-rendered HTML.
    pub formatted_content: String,
    /// Original source text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,
    /// When this artifact was written.
    pub cached_at: DateTime<Utc>,
}

impl CachedArtifact {
    /// Whether this artifact still describes the remote collection.
    ///
    /// An artifact without a recorded modification time is never current.
    pub fn is_current(&self, remote_updated_at: Option<DateTime<Utc>>) -> bool {
        match (self.updated_at, remote_updated_at) {
            (Some(cached), Some(remote)) => cached == remote,
            _ => false,
        }
    }

    /// Size of the stored text in bytes.
    pub fn size_bytes(&self) -> u64 {
        let raw = self.raw_content.as_ref().map_or(0, |r| r.len());
        (self.formatted_content.len() + raw) as u64
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn artifact(collection_id: &str, updated: Option<DateTime<Utc>>) -> CachedArtifact {
        CachedArtifact {
            collection_id: collection_id.to_string(),
            selector_resolved: "a.rb".to_string(),
            raw_url: format!("https://gist.example.com/{}/raw/a.rb", collection_id),
            updated_at: updated,
            language: Some("ruby".to_string()),
            formatted_content: "<pre>puts 1</pre>".to_string(),
            raw_content: Some("puts 1".to_string()),
            cached_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::artifact;
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn current_when_times_match() {
        let t1 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let a = artifact("abc", Some(t1));
        assert!(a.is_current(Some(t1)));
    }

    #[test]
    fn stale_when_times_differ() {
        let t1 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let a = artifact("abc", Some(t1));
        assert!(!a.is_current(Some(t2)));
    }

    #[test]
    fn never_current_without_cached_time() {
        let t1 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let a = artifact("abc", None);
        assert!(!a.is_current(Some(t1)));
        assert!(!a.is_current(None));
    }

    #[test]
    fn json_omits_missing_raw_content() {
        let mut a = artifact("abc", None);
        a.raw_content = None;
        let json = serde_json::to_string(&a).unwrap();
        assert!(!json.contains("raw_content"));
        let back: CachedArtifact = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn size_counts_both_texts() {
        let a = artifact("abc", None);
        assert_eq!(a.size_bytes(), ("<pre>puts 1</pre>".len() + "puts 1".len()) as u64);
    }
}
