use crate::api::DEFAULT_BASE_URL;
use crate::config::{ConfigManager, ServerConfig};
use anyhow::Result;

/// Environment variable overriding the API base URL
pub const SERVER_URL_ENV: &str = "POSTBOARD_API_URL";

/// Server configuration utility for managing the API base URL
pub struct ServerConfigManager {
    config_manager: ConfigManager,
}

impl ServerConfigManager {
    /// Create a new server configuration manager
    pub fn new() -> Result<Self> {
        let config_manager = ConfigManager::new()?;
        Ok(Self { config_manager })
    }

    pub fn with_config_manager(config_manager: ConfigManager) -> Self {
        Self { config_manager }
    }

    /// Determine the server URL to use based on priority:
    /// 1. CLI argument (highest priority)
    /// 2. Environment variable POSTBOARD_API_URL
    /// 3. Saved configuration file
    /// 4. Public JSONPlaceholder instance (lowest priority)
    pub fn determine_server_url(&self, cli_override: Option<String>) -> Result<String> {
        if let Some(url) = cli_override {
            return Ok(url);
        }

        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            if !url.trim().is_empty() {
                return Ok(url);
            }
        }

        if let Some(config) = self.config_manager.load_server_config()? {
            return Ok(config.server_url);
        }

        Ok(DEFAULT_BASE_URL.to_string())
    }

    /// Save server URL to configuration file
    pub fn save_server_url(&self, server_url: String) -> Result<()> {
        let config = ServerConfig {
            server_url,
            last_updated: chrono::Utc::now(),
        };
        self.config_manager.save_server_config(&config)
    }

    /// Get a display-friendly description of the current server configuration
    pub fn get_server_description(&self, current_url: &str) -> String {
        if current_url.trim_end_matches('/') == DEFAULT_BASE_URL {
            "JSONPlaceholder (default)".to_string()
        } else if current_url.contains("localhost") || current_url.contains("127.0.0.1") {
            "Local Server".to_string()
        } else {
            "Custom Server".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn manager_in(dir: &tempfile::TempDir) -> ServerConfigManager {
        ServerConfigManager::with_config_manager(ConfigManager::with_dir(dir.path()).unwrap())
    }

    // Environment-dependent cases share one test so they cannot race each other
    #[test]
    fn test_server_url_priority() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(&dir);
        let original = env::var(SERVER_URL_ENV).ok();
        env::remove_var(SERVER_URL_ENV);

        // Nothing configured: public default
        assert_eq!(manager.determine_server_url(None).unwrap(), DEFAULT_BASE_URL);

        // Saved file beats the default
        manager
            .save_server_url("http://saved:3000".to_string())
            .unwrap();
        assert_eq!(manager.determine_server_url(None).unwrap(), "http://saved:3000");

        // Environment beats the saved file
        env::set_var(SERVER_URL_ENV, "http://env-override:3000");
        assert_eq!(
            manager.determine_server_url(None).unwrap(),
            "http://env-override:3000"
        );

        // CLI beats everything
        assert_eq!(
            manager
                .determine_server_url(Some("http://cli-override:3000".to_string()))
                .unwrap(),
            "http://cli-override:3000"
        );

        match original {
            Some(value) => env::set_var(SERVER_URL_ENV, value),
            None => env::remove_var(SERVER_URL_ENV),
        }
    }

    #[test]
    fn test_server_description() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(&dir);

        let desc = manager.get_server_description("https://jsonplaceholder.typicode.com/");
        assert!(desc.contains("default"));

        let desc = manager.get_server_description("http://localhost:3000");
        assert_eq!(desc, "Local Server");

        let desc = manager.get_server_description("https://custom.example.com");
        assert_eq!(desc, "Custom Server");
    }
}
