//! Configuration file management
//!
//! Values are read from `~/.ai-content-generator/config.toml` (or the path in
//! `AICG_CONFIG`) and can be overridden by environment variables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::env::apis as env_apis;
use crate::env::config as env_config;
use crate::services::google_ai::{GenerationDefaults, GoogleAiConfig};

/// Configuration structure matching config.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default)]
    pub parameters: GenerationDefaults,
}

impl Config {
    /// Get the config file path
    pub fn get_config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(env_config::CONFIG_PATH) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        let home_dir = dirs::home_dir().context("Could not find home directory")?;
        Ok(home_dir.join(".ai-content-generator").join("config.toml"))
    }

    /// Load configuration from the default location
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        // Owner read/write only, the file holds an API key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(config_path, permissions).with_context(|| {
                format!(
                    "Failed to set permissions on config file: {}",
                    config_path.display()
                )
            })?;
        }

        Ok(())
    }

    /// Get a config value by key
    pub fn get(&self, key: &str) -> Option<String> {
        match normalize_key(key).as_str() {
            "gemini_api_key" => self.gemini_api_key.clone(),
            "default_model" => self.default_model.clone(),
            "base_url" => self.base_url.clone(),
            "temperature" => Some(self.parameters.temperature.to_string()),
            "max_output_tokens" => Some(self.parameters.max_output_tokens.to_string()),
            "top_p" => Some(self.parameters.top_p.to_string()),
            "top_k" => Some(self.parameters.top_k.to_string()),
            _ => None,
        }
    }

    /// Set a config value by key
    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        match normalize_key(key).as_str() {
            "gemini_api_key" => self.gemini_api_key = Some(value),
            "default_model" => self.default_model = Some(value),
            "base_url" => self.base_url = Some(value),
            "temperature" => {
                self.parameters.temperature = value
                    .parse()
                    .with_context(|| format!("Invalid temperature: {value}"))?;
            }
            "max_output_tokens" => {
                self.parameters.max_output_tokens = value
                    .parse()
                    .with_context(|| format!("Invalid max_output_tokens: {value}"))?;
            }
            "top_p" => {
                self.parameters.top_p = value
                    .parse()
                    .with_context(|| format!("Invalid top_p: {value}"))?;
            }
            "top_k" => {
                self.parameters.top_k = value
                    .parse()
                    .with_context(|| format!("Invalid top_k: {value}"))?;
            }
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    /// Unset a config value by key; generation parameters return to their defaults
    pub fn unset(&mut self, key: &str) -> Result<()> {
        let defaults = GenerationDefaults::default();
        match normalize_key(key).as_str() {
            "gemini_api_key" => self.gemini_api_key = None,
            "default_model" => self.default_model = None,
            "base_url" => self.base_url = None,
            "temperature" => self.parameters.temperature = defaults.temperature,
            "max_output_tokens" => self.parameters.max_output_tokens = defaults.max_output_tokens,
            "top_p" => self.parameters.top_p = defaults.top_p,
            "top_k" => self.parameters.top_k = defaults.top_k,
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    /// Get all config values as key-value pairs, with the API key masked
    pub fn list(&self) -> Vec<(String, String)> {
        let mut items = Vec::new();

        if let Some(ref key) = self.gemini_api_key {
            items.push(("gemini-api-key".to_string(), mask_api_key(key)));
        }
        if let Some(ref model) = self.default_model {
            items.push(("default-model".to_string(), model.clone()));
        }
        if let Some(ref base_url) = self.base_url {
            items.push(("base-url".to_string(), base_url.clone()));
        }

        items.push((
            "temperature".to_string(),
            self.parameters.temperature.to_string(),
        ));
        items.push((
            "max-output-tokens".to_string(),
            self.parameters.max_output_tokens.to_string(),
        ));
        items.push(("top-p".to_string(), self.parameters.top_p.to_string()));
        items.push(("top-k".to_string(), self.parameters.top_k.to_string()));

        items
    }

    /// Client configuration with priority: environment variable > config file > built-in default
    pub fn to_client_config(&self) -> GoogleAiConfig {
        self.merge_env(|name| std::env::var(name).ok())
    }

    /// Empty environment values count as unset.
    fn merge_env(&self, lookup: impl Fn(&str) -> Option<String>) -> GoogleAiConfig {
        let env = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let mut client_config = GoogleAiConfig::new(String::new()).with_defaults(self.parameters);

        client_config.api_key = env(env_apis::GEMINI_API_KEY)
            .or_else(|| self.gemini_api_key.clone())
            .unwrap_or_default();

        if let Some(model) = env(env_apis::GEMINI_DEFAULT_MODEL).or_else(|| self.default_model.clone())
        {
            client_config.model = model;
        }

        if let Some(base_url) = env(env_apis::GEMINI_BASE_URL).or_else(|| self.base_url.clone()) {
            client_config.base_url = base_url;
        }

        client_config
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('-', "_")
}

/// Mask API key for display (show first 4 and last 4 characters)
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
