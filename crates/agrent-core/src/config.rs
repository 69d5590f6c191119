//! Configuration management for agrent.
//!
//! Loads configuration from ${AGRENT_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Remote API configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the rental API server.
    /// The `AGRENT_API_URL` environment variable takes precedence.
    pub base_url: Option<String>,
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default tracing filter applied when `AGRENT_LOG` is not set.
    pub log_filter: String,

    /// Remote API configuration.
    #[serde(default)]
    pub api: ApiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: Self::DEFAULT_LOG_FILTER.to_string(),
            api: ApiConfig::default(),
        }
    }
}

impl Config {
    const DEFAULT_LOG_FILTER: &str = "warn";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the default config template to the default path.
    ///
    /// If a config file already exists, its values are merged into the latest
    /// template so new sections and comments show up without losing user edits.
    pub fn init() -> Result<()> {
        Self::init_at(&paths::config_path())
    }

    /// Writes the config template to a specific path, preserving user values.
    pub fn init_at(path: &Path) -> Result<()> {
        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// New comments/sections from the template are always present while the
/// user's customized values win.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from the source table into the target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for agrent configuration and data directories.
    //!
    //! AGRENT_HOME resolution order:
    //! 1. AGRENT_HOME environment variable (if set)
    //! 2. ~/.config/agrent (default)

    use std::path::PathBuf;

    /// Returns the user's home directory.
    pub fn home_dir() -> Option<PathBuf> {
        #[cfg(unix)]
        {
            std::env::var_os("HOME").map(PathBuf::from)
        }
        #[cfg(not(unix))]
        {
            std::env::var_os("USERPROFILE").map(PathBuf::from)
        }
    }

    /// Returns the agrent home directory.
    ///
    /// Checks the AGRENT_HOME env var first, falls back to ~/.config/agrent.
    pub fn agrent_home() -> PathBuf {
        if let Some(home) = std::env::var_os("AGRENT_HOME") {
            return PathBuf::from(home);
        }

        home_dir()
            .map(|h| h.join(".config").join("agrent"))
            .unwrap_or_else(|| PathBuf::from(".agrent"))
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        agrent_home().join("config.toml")
    }

    /// Returns the path to the persisted session file.
    pub fn session_path() -> PathBuf {
        agrent_home().join("session.json")
    }

    /// Returns the directory where log files are written.
    pub fn logs_dir() -> PathBuf {
        agrent_home().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.log_filter, "warn");
        assert!(config.api.base_url.is_none());
    }

    #[test]
    fn template_parses_as_config() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("http://localhost:5000")
        );
    }

    #[test]
    fn parses_partial_config() {
        let config: Config = toml::from_str("[api]\nbase_url = \"http://10.0.0.2:5000\"\n").unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("http://10.0.0.2:5000"));
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn init_preserves_user_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "log_filter = \"debug\"\n").unwrap();

        Config::init_at(&path).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.log_filter, "debug");
        // Template sections appear after the merge.
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("http://localhost:5000")
        );
    }
}
