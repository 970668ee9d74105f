use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::api::DEFAULT_BASE_URL;

/// API server configuration stored locally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server_url: String,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_BASE_URL.to_string(),
            last_updated: chrono::Utc::now(),
        }
    }
}

/// Configuration manager for the .postboard directory
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Create a config manager rooted at ~/.postboard
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Self::with_dir(config_dir)
    }

    /// Create a config manager rooted at an explicit directory
    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Result<Self> {
        let config_dir = config_dir.into();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        }

        Ok(Self { config_dir })
    }

    /// Get the .postboard configuration directory path
    fn get_config_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home_dir.join(".postboard"))
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    fn get_server_config_file(&self) -> PathBuf {
        self.config_dir.join("server_config.json")
    }

    /// Save server configuration
    pub fn save_server_config(&self, config: &ServerConfig) -> Result<()> {
        let config_file = self.get_server_config_file();
        let json =
            serde_json::to_string_pretty(config).context("Failed to serialize server config")?;

        fs::write(&config_file, json).context("Failed to write server config file")?;

        Ok(())
    }

    /// Load server configuration
    pub fn load_server_config(&self) -> Result<Option<ServerConfig>> {
        let config_file = self.get_server_config_file();

        if !config_file.exists() {
            return Ok(None);
        }

        let json =
            fs::read_to_string(&config_file).context("Failed to read server config file")?;

        let config: ServerConfig =
            serde_json::from_str(&json).context("Failed to parse server config")?;

        Ok(Some(config))
    }
}
