//! Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Configuration for reel
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default model to use
    pub model: Option<String>,
    /// Use the offline rule-based normalizer by default
    pub offline: Option<bool>,
    /// API keys (alternative to environment variables)
    #[serde(default)]
    pub api_keys: ApiKeys,
}

/// API key configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeys {
    pub google: Option<String>,
}

impl Config {
    /// Get the config directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("reel")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        // Check for REEL_CONFIG_PATH env var first
        if let Ok(path) = std::env::var("REEL_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// Load config from file
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, content)
    }

    /// Create a default config file if it doesn't exist
    pub fn init() -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        if path.exists() {
            return Ok(path);
        }

        let default_config = Config {
            model: Some("gemini-2.5-flash".to_string()),
            offline: Some(false),
            api_keys: ApiKeys::default(),
        };

        default_config.save()?;
        Ok(path)
    }

    /// Get the Google API key, checking config then env
    pub fn google_api_key(&self) -> Option<String> {
        if let Some(key) = self.api_keys.google.clone() {
            return Some(key);
        }

        std::env::var("GOOGLE_API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .ok()
    }
}

/// Generate example config content
pub fn example_config() -> &'static str {
    r#"# reel configuration file
# Place at ~/.config/reel/config.toml (Linux/Mac) or %APPDATA%\reel\config.toml (Windows)

# Default model to use
model = "gemini-2.5-flash"

# Use the offline rule-based normalizer instead of a live model
offline = false

# API keys (optional - can also use environment variables)
# It's recommended to use environment variables instead for security
[api_keys]
# google = "..."
"#
}
