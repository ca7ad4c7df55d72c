//! Remote collection metadata as returned by the snippet API.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Per-file attributes from the metadata endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteFile {
    /// File name; filled from the mapping key when the API omits it.
    #[serde(default)]
    pub filename: String,
    /// Inline content. May be cut short when `truncated` is set.
    #[serde(default)]
    pub content: Option<String>,
    /// Location of the full file body.
    #[serde(default)]
    pub raw_url: String,
    /// Inline content is incomplete; fetch `raw_url` instead.
    #[serde(default)]
    pub truncated: bool,
    /// Language name as reported by the API.
    #[serde(default)]
    pub language: Option<String>,
}

/// One metadata response: the collection's modification time and its files
/// in the order the API listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteSnippetMetadata {
    pub collection_id: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub files: Vec<(String, RemoteFile)>,
}

#[derive(Deserialize)]
struct CollectionResponse {
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    files: Option<Map<String, Value>>,
}

impl RemoteSnippetMetadata {
    /// Parse a metadata response body.
    ///
    /// A missing or null `files` object parses as an empty collection.
    pub fn from_json(collection_id: &str, body: &str) -> serde_json::Result<Self> {
        let response: CollectionResponse = serde_json::from_str(body)?;

        let mut files = Vec::new();
        for (name, value) in response.files.unwrap_or_default() {
            let mut file: RemoteFile = serde_json::from_value(value)?;
            if file.filename.is_empty() {
                file.filename = name.clone();
            }
            files.push((name, file));
        }

        Ok(Self {
            collection_id: collection_id.to_string(),
            updated_at: response.updated_at.as_deref().and_then(parse_timestamp),
            files,
        })
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
