use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Service the printer gets linked to when no prefix has been configured
pub const DEFAULT_ENDPOINT_PREFIX: &str = "https://app.thespaghettidetective.com";

const APP_DIR_NAME: &str = "PairingWizard";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the local printer host (the OctoPrint instance)
    pub octoprint_url: String,

    /// Path of the plugin command endpoint, relative to `octoprint_url`
    pub command_path: String,

    /// API key sent as `X-Api-Key`, if the host requires one
    pub api_key: Option<String>,

    /// Remote service URL sent along with the security code
    pub endpoint_prefix: String,

    /// Overall timeout for a command request. None waits indefinitely.
    pub request_timeout_secs: Option<u64>,

    /// Quiet period after the last name edit before it is saved
    pub name_debounce_ms: u64,

    /// How long the saved/error indicator stays up after a name save
    pub save_status_display_ms: u64,

    /// Interval between feature slides on the welcome step
    pub feature_slide_interval_ms: u64,

    /// Number of feature slides the welcome step shows
    pub feature_slide_count: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            octoprint_url: "http://127.0.0.1:5000".to_string(),
            command_path: "api/plugin/thespaghettidetective".to_string(),
            api_key: None,
            endpoint_prefix: DEFAULT_ENDPOINT_PREFIX.to_string(),
            request_timeout_secs: None,
            name_debounce_ms: 1000,
            save_status_display_ms: 2000,
            feature_slide_interval_ms: 3000,
            feature_slide_count: 3,
        }
    }
}

impl Config {
    /// Load configuration from the platform-specific config directory.
    /// Creates default config if file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from an explicit path, writing defaults if absent
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            tracing::info!("Created default config at: {}", path.display());
            return Ok(config);
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;
        config.validate()?;

        tracing::info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to the platform-specific config directory
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::DirectoryCreationFailed {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        fs::write(path, json).map_err(|e| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        Ok(())
    }

    /// Reject values the wizard cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.octoprint_url.trim().is_empty() {
            return Err(ConfigError::Invalid("octoprint_url must not be empty".into()));
        }
        if self.feature_slide_count == 0 {
            return Err(ConfigError::Invalid("feature_slide_count must be > 0".into()));
        }
        if self.name_debounce_ms == 0
            || self.save_status_display_ms == 0
            || self.feature_slide_interval_ms == 0
        {
            return Err(ConfigError::Invalid("timer intervals must be > 0".into()));
        }
        Ok(())
    }

    /// Full URL of the plugin command endpoint
    pub fn command_url(&self) -> String {
        format!(
            "{}/{}",
            self.octoprint_url.trim_end_matches('/'),
            self.command_path.trim_start_matches('/')
        )
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn name_debounce(&self) -> Duration {
        Duration::from_millis(self.name_debounce_ms)
    }

    pub fn save_status_display(&self) -> Duration {
        Duration::from_millis(self.save_status_display_ms)
    }

    pub fn feature_slide_interval(&self) -> Duration {
        Duration::from_millis(self.feature_slide_interval_ms)
    }

    /// Directory holding config.json and the log folder
    pub fn app_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME))
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        Self::app_dir()
            .map(|dir| dir.join("config.json"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Get the config file path (for display purposes)
    pub fn config_path_display() -> String {
        Self::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "unknown".to_string())
    }
}
