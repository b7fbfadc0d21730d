//! Application configuration loaded from environment variables.
//!
//! Two secrets (the Telegram bot token and the GitHub token) must be present;
//! everything else has a fixed default matching the deployed setup.

use std::env;

/// Default raw-content URL of the directory document.
const DEFAULT_RAW_URL: &str =
    "https://raw.githubusercontent.com/WolfT31/LoginSystem/main/LoginID.json";

/// Default contents-API URL used for revision lookup and write-back.
const DEFAULT_API_URL: &str =
    "https://api.github.com/repos/WolfT31/LoginSystem/contents/LoginID.json";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram Bot API credential (secret)
    pub telegram_bot_token: String,
    /// GitHub bearer credential for the contents API (secret)
    pub github_token: String,
    /// Unauthenticated read URL of the directory document
    pub directory_raw_url: String,
    /// Authenticated contents-API URL of the directory document
    pub directory_api_url: String,
    /// Local path the /export command writes to
    pub export_path: String,
    /// Health endpoint port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN")
                .map_err(|_| ConfigError::Missing("TELEGRAM_BOT_TOKEN"))?,
            github_token: env::var("GITHUB_TOKEN")
                .map_err(|_| ConfigError::Missing("GITHUB_TOKEN"))?,
            directory_raw_url: env::var("DIRECTORY_RAW_URL")
                .unwrap_or_else(|_| DEFAULT_RAW_URL.to_string()),
            directory_api_url: env::var("DIRECTORY_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            export_path: env::var("EXPORT_PATH")
                .unwrap_or_else(|_| "exported_users.txt".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .unwrap_or(10000),
        })
    }

    /// Fixed config for tests.
    pub fn test_default() -> Self {
        Self {
            telegram_bot_token: "test_bot_token".to_string(),
            github_token: "test_github_token".to_string(),
            directory_raw_url: "http://localhost/LoginID.json".to_string(),
            directory_api_url: "http://localhost/api/LoginID.json".to_string(),
            export_path: "exported_users.txt".to_string(),
            port: 10000,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("TELEGRAM_BOT_TOKEN", "tg_token");
        env::set_var("GITHUB_TOKEN", "gh_token");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.telegram_bot_token, "tg_token");
        assert_eq!(config.github_token, "gh_token");
        assert_eq!(config.port, 10000);
        assert!(config.directory_raw_url.starts_with("https://raw.githubusercontent.com/"));
    }
}
