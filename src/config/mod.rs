//! Configuration management for cloudeff

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Help link shown in the footer when none is configured
pub const DEFAULT_HELP_LINK: &str = "https://github.com/Symantec/cloudefficiency/wiki";

/// Footer label for the help link
pub const DEFAULT_HELP_TEXT: &str = "Help";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the report server (e.g. `https://cloudeff.example.com`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Report snapshot used when `--bootstrap` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootstrap_path: Option<String>,

    /// Leadership roster shown when no user is selected
    #[serde(default)]
    pub leadership: Vec<String>,

    /// Deployment environment tag attached to analytics events
    #[serde(default = "default_env")]
    pub env: String,

    #[serde(default = "default_help_link")]
    pub help_link: String,

    #[serde(default = "default_help_text")]
    pub help_text: String,

    /// Reuse downloaded instance lists for an hour (same as `--cache`)
    #[serde(default)]
    pub cache: bool,

    /// Append analytics events as JSON lines to this file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics_log: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

fn default_env() -> String {
    "dev".to_string()
}

fn default_help_link() -> String {
    DEFAULT_HELP_LINK.to_string()
}

fn default_help_text() -> String {
    DEFAULT_HELP_TEXT.to_string()
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".cloudeff").join("config.yaml"))
    }

    /// Resolve an optional override to a concrete path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an override path or the default location
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Like [`Config::load_at`], but a missing file yields defaults
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match Self::load_at(path) {
            Err(crate::error::Error::Config(ConfigError::NotFound)) => {
                log::debug!("No config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an override path or the default location
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        Ok(())
    }

    /// Report server base URL without a trailing slash
    pub fn require_api_host(&self) -> Result<&str> {
        self.api_host
            .as_deref()
            .map(|h| h.trim_end_matches('/'))
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ConfigError::MissingApiHost.into())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_host: None,
            bootstrap_path: None,
            leadership: Vec::new(),
            env: default_env(),
            help_link: default_help_link(),
            help_text: default_help_text(),
            cache: false,
            analytics_log: None,
            preferences: Preferences::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_host.is_none());
        assert!(config.leadership.is_empty());
        assert_eq!(config.env, "dev");
        assert_eq!(config.help_text, DEFAULT_HELP_TEXT);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = Config {
            api_host: Some("https://reports.example.com/".to_string()),
            leadership: vec!["vp_one".to_string(), "vp_two".to_string()],
            env: "prod".to_string(),
            ..Config::default()
        };
        config.save_to(path.clone()).unwrap();

        let loaded = Config::load_from(path).unwrap();
        assert_eq!(loaded.leadership, vec!["vp_one", "vp_two"]);
        assert_eq!(loaded.env, "prod");
        assert_eq!(loaded.require_api_host().unwrap(), "https://reports.example.com");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(dir.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().contains("cloudeff init"));
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let config = Config::load_or_default(path.to_str()).unwrap();
        assert!(config.leadership.is_empty());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("leadership: [a, b]\n").unwrap();
        assert_eq!(config.leadership, vec!["a", "b"]);
        assert_eq!(config.help_link, DEFAULT_HELP_LINK);
    }

    #[test]
    fn test_require_api_host_missing() {
        let config = Config::default();
        assert!(config.require_api_host().is_err());
    }
}
