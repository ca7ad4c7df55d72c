//! Remote snippet retrieval.
//!
//! [`SnippetSource::fetch_metadata`] is one network call. Picking a file out
//! of the result ([`resolve_file`]) is local, and getting its full text
//! ([`materialize_content`]) costs a second call only when the API marked
//! the inline copy as truncated.

pub mod client;
pub mod metadata;

pub use client::{FetchConfig, GistClient, SnippetSource, DEFAULT_API_BASE};
pub use metadata::{RemoteFile, RemoteSnippetMetadata};

use crate::error::{Result, SnipError};

/// Pick the file named by `selector`, or the first file when the selector is
/// empty or names nothing in the collection.
///
/// "First" is whatever the API listed first; the API does not promise a
/// stable order, so neither does this.
pub fn resolve_file<'m>(
    metadata: &'m RemoteSnippetMetadata,
    selector: &str,
) -> Result<(&'m str, &'m RemoteFile)> {
    if !selector.is_empty() {
        if let Some((name, file)) = metadata.files.iter().find(|(n, _)| n == selector) {
            return Ok((name.as_str(), file));
        }
        tracing::debug!(
            "Selector '{}' not in collection {}, using first file",
            selector,
            metadata.collection_id
        );
    }

    metadata
        .files
        .first()
        .map(|(name, file)| (name.as_str(), file))
        .ok_or_else(|| SnipError::FileNotFound {
            collection_id: metadata.collection_id.clone(),
            selector: selector.to_string(),
        })
}

/// Full text of a file, fetching `raw_url` if the inline copy is truncated.
///
/// A file that is neither truncated nor carries inline content is a
/// malformed response.
pub fn materialize_content(source: &dyn SnippetSource, file: &RemoteFile) -> Result<String> {
    if file.truncated {
        if file.raw_url.is_empty() {
            return Err(SnipError::remote(
                &file.filename,
                "content is truncated and no raw URL was provided",
            ));
        }
        return source.fetch_raw(&file.raw_url);
    }

    file.content
        .clone()
        .ok_or_else(|| SnipError::remote(&file.raw_url, "file has no inline content"))
}
