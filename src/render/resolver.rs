//! Cache-or-fetch resolution of snippet references.

use chrono::Utc;

use crate::cache::{ArtifactStore, CacheKey, CachedArtifact};
use crate::error::{RenderError, Result};
use crate::highlight::{format_snippet, Highlighter};
use crate::remote::{materialize_content, resolve_file, RemoteSnippetMetadata, SnippetSource};

/// A snippet as written in a tag: a collection id and an optional file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetReference {
    pub collection_id: String,
    /// Empty means "first file".
    pub selector: String,
}

impl SnippetReference {
    pub fn new(collection_id: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            collection_id: collection_id.into(),
            selector: selector.into(),
        }
    }

    /// Cache key for this reference.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::derive(&self.collection_id, &self.selector)
    }
}

/// How a single resolution may use the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Check the remote modification time before trusting a cache hit.
    pub revalidate: bool,
    /// Neither read nor write the cache.
    pub bypass_cache: bool,
    /// Skip the cache read but store the fresh result.
    pub force_refresh: bool,
}

/// Where a resolved snippet came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetOrigin {
    /// Served from cache without contacting the remote.
    Cache,
    /// Served from cache after the remote confirmed it is unchanged.
    Revalidated,
    /// Fetched and formatted during this call.
    Fetched,
}

/// Ready-to-render result of a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedSnippet {
    pub collection_id: String,
    pub filename: String,
    pub raw_url: String,
    pub language: Option<String>,
    pub html: String,
    pub origin: SnippetOrigin,
}

impl FormattedSnippet {
    fn from_artifact(artifact: CachedArtifact, origin: SnippetOrigin) -> Self {
        Self {
            collection_id: artifact.collection_id,
            filename: artifact.selector_resolved,
            raw_url: artifact.raw_url,
            language: artifact.language,
            html: artifact.formatted_content,
            origin,
        }
    }
}

/// Decides, per reference, whether the cached artifact or a fresh fetch is
/// authoritative, and keeps the cache up to date.
pub struct SnippetResolver<'a> {
    store: &'a dyn ArtifactStore,
    source: &'a dyn SnippetSource,
    highlighter: &'a dyn Highlighter,
}

impl<'a> SnippetResolver<'a> {
    /// Create a new resolver.
    pub fn new(
        store: &'a dyn ArtifactStore,
        source: &'a dyn SnippetSource,
        highlighter: &'a dyn Highlighter,
    ) -> Self {
        Self {
            store,
            source,
            highlighter,
        }
    }

    /// Resolve a reference to formatted HTML.
    ///
    /// Every failure comes back as a [`RenderError`] naming the collection;
    /// nothing here panics or aborts the caller's build.
    pub fn resolve(
        &self,
        reference: &SnippetReference,
        options: ResolveOptions,
    ) -> std::result::Result<FormattedSnippet, RenderError> {
        self.try_resolve(reference, options)
            .map_err(|e| RenderError::new(&reference.collection_id, e))
    }

    fn try_resolve(
        &self,
        reference: &SnippetReference,
        options: ResolveOptions,
    ) -> Result<FormattedSnippet> {
        let key = reference.cache_key();
        let mut prefetched = None;

        if !options.bypass_cache && !options.force_refresh {
            match self.store.get(&key) {
                Ok(Some(cached)) if !options.revalidate => {
                    tracing::debug!("Cache hit for {}", key);
                    return Ok(FormattedSnippet::from_artifact(cached, SnippetOrigin::Cache));
                }
                Ok(Some(cached)) => {
                    // A failed check is a failed render; the stale copy is not served.
                    let metadata = self.source.fetch_metadata(&reference.collection_id)?;
                    if cached.is_current(metadata.updated_at) {
                        tracing::debug!("Cache entry {} is current", key);
                        return Ok(FormattedSnippet::from_artifact(
                            cached,
                            SnippetOrigin::Revalidated,
                        ));
                    }
                    tracing::info!("Cached gist modified: {}", reference.collection_id);
                    prefetched = Some(metadata);
                }
                Ok(None) => tracing::debug!("Cache miss for {}", key),
                Err(e) => tracing::warn!("Ignoring unreadable cache entry {}: {}", key, e),
            }
        }

        let metadata = match prefetched {
            Some(metadata) => metadata,
            None => self.source.fetch_metadata(&reference.collection_id)?,
        };

        let artifact = self.build_artifact(reference, &metadata)?;

        if !options.bypass_cache {
            self.store.put(&key, &artifact)?;
            tracing::debug!("Cached {} as {}", reference.collection_id, key);
        }

        Ok(FormattedSnippet::from_artifact(artifact, SnippetOrigin::Fetched))
    }

    fn build_artifact(
        &self,
        reference: &SnippetReference,
        metadata: &RemoteSnippetMetadata,
    ) -> Result<CachedArtifact> {
        let (_, file) = resolve_file(metadata, &reference.selector)?;
        let raw = materialize_content(self.source, file)?;
        let language = file.language.as_deref().map(str::to_lowercase);
        let formatted = format_snippet(self.highlighter, &raw, language.as_deref())?;

        Ok(CachedArtifact {
            collection_id: reference.collection_id.clone(),
            selector_resolved: file.filename.clone(),
            raw_url: file.raw_url.clone(),
            updated_at: metadata.updated_at,
            language,
            formatted_content: formatted,
            raw_content: Some(raw),
            cached_at: Utc::now(),
        })
    }
}
