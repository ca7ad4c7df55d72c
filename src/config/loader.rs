//! Site configuration loading.

use crate::config::schema::SiteConfig;
use crate::error::{Result, SnipError};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "_config.yml";

/// Load a single config file and parse it into SiteConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<SiteConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SnipError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SnipError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into SiteConfig.
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<SiteConfig> {
    if content.trim().is_empty() {
        return Ok(SiteConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| SnipError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// A named file must exist. Without an override, `_config.yml` in `site_root`
/// is used if present and defaults apply otherwise.
pub fn load_config(site_root: &Path, config_override: Option<&Path>) -> Result<SiteConfig> {
    if let Some(override_path) = config_override {
        return load_config_file(override_path);
    }

    let default_path: PathBuf = site_root.join(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        load_config_file(&default_path)
    } else {
        tracing::debug!("No {} in {:?}, using defaults", DEFAULT_CONFIG_FILE, site_root);
        Ok(SiteConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_config_file_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load_config_file(&temp.path().join("missing.yml")).unwrap_err();
        assert!(matches!(err, SnipError::ConfigNotFound { .. }));
    }

    #[test]
    fn load_config_file_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("_config.yml");
        fs::write(&path, "gist_check_update: [not, a, bool]").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, SnipError::ConfigParseError { .. }));
    }

    #[test]
    fn load_config_uses_site_default_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("_config.yml"), "gist_check_update: true\n").unwrap();

        let config = load_config(temp.path(), None).unwrap();
        assert!(config.gist_check_update);
    }

    #[test]
    fn load_config_without_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_config_override_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("site.yml");
        assert!(load_config(temp.path(), Some(&missing)).is_err());
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("\n", Path::new("_config.yml")).unwrap();
        assert_eq!(config, SiteConfig::default());
    }
}
