//! Configuration loading for snipcache.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Proxy resolution from environment variables in [`environment`]
//!
//! # Example
//!
//! ```
//! use snipcache::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("_config.yml"), "gist_check_update: true").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert!(config.gist_check_update);
//! ```

pub mod environment;
pub mod loader;
pub mod schema;

pub use environment::{load_system_env, proxy_from_env, PROXY_VARS};
pub use loader::{load_config, load_config_file, parse_config, DEFAULT_CONFIG_FILE};
pub use schema::SiteConfig;
