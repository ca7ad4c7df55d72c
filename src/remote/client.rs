//! HTTP access to the remote snippet API.
//!
//! Provides the [`SnippetSource`] seam used by the resolver and
//! [`GistClient`], its blocking HTTP implementation.

use reqwest::blocking::Client;
use reqwest::Proxy;
use std::time::Duration;

use super::metadata::RemoteSnippetMetadata;
use crate::cache::sanitize;
use crate::error::{Result, SnipError};

/// Default metadata API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Where snippets come from.
///
/// Each method is exactly one network round trip and is never retried.
pub trait SnippetSource: Send + Sync {
    /// Fetch a collection's metadata and inline file contents.
    fn fetch_metadata(&self, collection_id: &str) -> Result<RemoteSnippetMetadata>;

    /// Fetch the literal body of a raw file URL.
    fn fetch_raw(&self, url: &str) -> Result<String>;
}

/// Settings for [`GistClient`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// API root, without trailing `/gists`.
    pub api_base: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Outbound proxy URL. No proxy is used when `None`.
    pub proxy: Option<String>,
    /// Skip certificate validation (legacy behavior, insecure).
    pub accept_invalid_certs: bool,
    /// User-Agent header; the API rejects requests without one.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
            proxy: None,
            accept_invalid_certs: false,
            user_agent: format!("snipcache/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Fetches snippet collections over HTTPS.
pub struct GistClient {
    client: Client,
    config: FetchConfig,
}

impl GistClient {
    /// Build a client. The process environment is never consulted for
    /// proxies; pass one through [`FetchConfig::proxy`].
    pub fn new(config: FetchConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout);

        builder = match &config.proxy {
            Some(proxy) => {
                let proxy = Proxy::all(proxy).map_err(|e| SnipError::remote(proxy, e))?;
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        if config.accept_invalid_certs {
            tracing::warn!("TLS certificate validation is disabled for snippet requests");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| SnipError::remote(&config.api_base, e))?;

        Ok(Self { client, config })
    }

    /// Get the configuration this client was built with.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Metadata URL for a collection.
    pub fn metadata_url(&self, collection_id: &str) -> String {
        format!(
            "{}/gists/{}",
            self.config.api_base.trim_end_matches('/'),
            sanitize(collection_id)
        )
    }

    fn get_text(&self, url: &str, accept: Option<&str>) -> Result<String> {
        let mut request = self.client.get(url);
        if let Some(accept) = accept {
            request = request.header("Accept", accept);
        }

        let response = request.send().map_err(|e| SnipError::remote(url, e))?;

        if !response.status().is_success() {
            return Err(SnipError::remote(url, format!("HTTP {}", response.status())));
        }

        response.text().map_err(|e| SnipError::remote(url, e))
    }
}

impl SnippetSource for GistClient {
    fn fetch_metadata(&self, collection_id: &str) -> Result<RemoteSnippetMetadata> {
        let url = self.metadata_url(collection_id);
        tracing::debug!("Fetching snippet metadata from {}", url);

        let body = self.get_text(&url, Some("application/vnd.github+json"))?;

        RemoteSnippetMetadata::from_json(collection_id, &body)
            .map_err(|e| SnipError::remote(&url, format!("invalid metadata: {}", e)))
    }

    fn fetch_raw(&self, url: &str) -> Result<String> {
        tracing::debug!("Fetching raw snippet content from {}", url);
        self.get_text(url, None)
    }
}
