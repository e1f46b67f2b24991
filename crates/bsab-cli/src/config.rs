//! Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Configuration for bsab
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend base URL (e.g. http://localhost:5001/api)
    pub base_url: Option<String>,
    /// Greeting shown when a session starts; set to "" to disable
    pub greeting: Option<String>,
}

impl Config {
    /// Get the config directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bsab")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        // Check for BSAB_CONFIG_PATH env var first
        if let Ok(path) = std::env::var("BSAB_CONFIG_PATH") {
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
            base_url: Some(bsab_api::DEFAULT_BASE_URL.to_string()),
            greeting: None,
        };

        default_config.save()?;
        Ok(path)
    }
}

/// Resolve the backend base URL from all sources.
/// Precedence: CLI flag > environment variable > config file > default.
pub fn resolve_base_url(flag: Option<String>, env: Option<String>, cfg: &Config) -> String {
    flag.or(env)
        .or_else(|| cfg.base_url.clone())
        .unwrap_or_else(|| bsab_api::DEFAULT_BASE_URL.to_string())
}

/// Example configuration shown after --init-config
pub fn example_config() -> &'static str {
    r#"# bsab configuration
base_url = "http://localhost:5001/api"
# greeting = "Hello! I'm the Building Safety Act Bot. How can I help you today?"
"#
}
