//! Configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use dictation_content::{DEFAULT_AUDIO_BASE, DEFAULT_ENDPOINT};

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictationConfig {
    /// Path to configuration file
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Attempts database (None = platform data directory)
    pub database_path: Option<String>,

    /// Upstream content API endpoint
    pub content_endpoint: String,

    /// Base URL that relative audio paths are joined onto
    pub audio_base_url: String,

    /// HTTP request timeout (seconds)
    pub request_timeout_secs: u64,

    /// Rows shown by `history` when no limit is given
    pub history_limit: usize,
}

impl Default for DictationConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            database_path: None,
            content_endpoint: DEFAULT_ENDPOINT.to_string(),
            audio_base_url: DEFAULT_AUDIO_BASE.to_string(),
            request_timeout_secs: 30,
            history_limit: 20,
        }
    }
}

impl DictationConfig {
    /// Load configuration from the platform config path, or create default
    pub fn load() -> Result<Self> {
        let config_path =
            dictation_paths::get_config_path().context("Failed to resolve config path")?;
        Self::load_from(config_path)
    }

    /// Load configuration from `config_path`, writing defaults there if missing
    pub fn load_from(config_path: impl Into<PathBuf>) -> Result<Self> {
        let config_path = config_path.into();

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file {}", config_path.display()))?;

            let mut config: DictationConfig =
                toml::from_str(&contents).context("Failed to parse config file")?;

            config.config_path = config_path;
            Ok(config)
        } else {
            let config = Self {
                config_path,
                ..Self::default()
            };
            config.save().context("Failed to save default config")?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                dictation_paths::ensure_dir(parent).context("Failed to create config directory")?;
            }
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&self.config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Database location: the configured path, or the platform default
    pub fn resolve_database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => dictation_paths::get_database_path(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}
