//! Configuration file management for CyberSaathi.
//!
//! Supports reading settings from `~/.config/cybersaathi/config.json`,
//! with environment variables as a fallback.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default public backend instance.
pub const DEFAULT_BASE_URL: &str = "https://cyber-saathi-backend.onrender.com";

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "SAATHI_BACKEND_URL";

/// Settings for reaching the backend proxy.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl BackendConfig {
    /// Resolves the configuration.
    ///
    /// Priority:
    /// 1. `~/.config/cybersaathi/config.json`
    /// 2. `SAATHI_BACKEND_URL` environment variable
    /// 3. The built-in default backend URL
    pub fn resolve() -> Self {
        if let Some(config) = load_config_file() {
            return config;
        }

        if let Ok(base_url) = env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                return Self { base_url };
            }
        }

        Self::default()
    }
}

fn load_config_file() -> Option<BackendConfig> {
    load_from(&config_path()?)
}

/// Reads and parses a config file, returning `None` (with a warning) when
/// it is missing or invalid; a broken config never blocks startup.
fn load_from(path: &Path) -> Option<BackendConfig> {
    if !path.exists() {
        return None;
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Failed to read config file at {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file at {}: {}", path.display(), e);
            None
        }
    }
}

/// Returns the path to the configuration file: ~/.config/cybersaathi/config.json
fn config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("cybersaathi").join("config.json"))
}
