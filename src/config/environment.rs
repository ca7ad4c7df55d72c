//! Environment variable handling.
//!
//! The outbound proxy comes from `http_proxy`-style variables. It is
//! resolved here from an explicit map so nothing downstream reads the
//! process environment on its own.

use std::collections::HashMap;

/// Proxy variables, in lookup order.
pub const PROXY_VARS: &[&str] = &["https_proxy", "HTTPS_PROXY", "http_proxy", "HTTP_PROXY"];

/// Load environment variables from system.
pub fn load_system_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// First non-empty proxy variable in `env`.
pub fn proxy_from_env(env: &HashMap<String, String>) -> Option<String> {
    PROXY_VARS
        .iter()
        .filter_map(|name| env.get(*name))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .map(String::from)
}
