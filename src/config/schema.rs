//! Site configuration keys read by the snippet engine.
//!
//! The engine only reads its own `gist_*` keys from the site's config file;
//! every other key in that file is ignored.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::DEFAULT_CACHE_DIR;
use crate::remote::{FetchConfig, DEFAULT_API_BASE};

/// Snippet settings from the site config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Check the remote modification time on every render of a cached snippet.
    #[serde(skip_serializing_if = "is_false")]
    pub gist_check_update: bool,

    /// Directory holding cached artifacts.
    #[serde(default = "default_cache_dir")]
    pub gist_cache_dir: PathBuf,

    /// Snippet API root.
    #[serde(default = "default_api_base")]
    pub gist_api_base: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub gist_timeout_secs: u64,

    /// Accept any TLS certificate. Reproduces legacy behavior; insecure.
    #[serde(skip_serializing_if = "is_false")]
    pub gist_insecure_tls: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            gist_check_update: false,
            gist_cache_dir: default_cache_dir(),
            gist_api_base: default_api_base(),
            gist_timeout_secs: default_timeout(),
            gist_insecure_tls: false,
        }
    }
}

impl SiteConfig {
    /// HTTP settings for the snippet client, with an explicitly resolved proxy.
    pub fn fetch_config(&self, proxy: Option<String>) -> FetchConfig {
        FetchConfig {
            api_base: self.gist_api_base.clone(),
            timeout: Duration::from_secs(self.gist_timeout_secs),
            proxy,
            accept_invalid_certs: self.gist_insecure_tls,
            ..FetchConfig::default()
        }
    }
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_DIR)
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn is_false(v: &bool) -> bool {
    !*v
}
