use crate::constants::{CLAUDE_API_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use crate::errors::{ShopclerkError, ShopclerkResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_key: String,
    pub api_base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub catalog_path: String,
    pub shortlist_size: usize,
    pub token_limit_threshold: u32,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: CLAUDE_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.7,
            catalog_path: "demos/catalog.json".to_string(),
            shortlist_size: 5,
            token_limit_threshold: 100_000,
            log_level: "info".to_string(),
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

pub fn initialize_config() -> ShopclerkResult<()> {
    let config_path = get_config_path()?;

    // If config exists, load it
    if config_path.exists() {
        let config_str = fs::read_to_string(&config_path).map_err(|e| {
            ShopclerkError::config_error(format!("Failed to read config file: {}", e))
        })?;

        let mut config: Config = serde_json::from_str(&config_str)
            .map_err(|e| ShopclerkError::config_error(format!("Failed to parse config: {}", e)))?;

        // The API key is never stored in the file; it always comes from the
        // environment.
        if let Ok(key) = env::var("ANTHROPIC_API_KEY") {
            config.api_key = key;
        }

        validate_config(&config)?;

        *CONFIG.write().unwrap() = config;
    } else {
        // Create default config
        let mut config = Config::default();

        if let Ok(key) = env::var("ANTHROPIC_API_KEY") {
            config.api_key = key;
        }

        // Save default config (without the key)
        fs::create_dir_all(config_path.parent().unwrap()).map_err(|e| {
            ShopclerkError::config_error(format!("Failed to create config directory: {}", e))
        })?;

        let stored = Config {
            api_key: String::new(),
            ..config.clone()
        };
        let config_str = serde_json::to_string_pretty(&stored).map_err(|e| {
            ShopclerkError::config_error(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&config_path, config_str).map_err(|e| {
            ShopclerkError::config_error(format!("Failed to write config file: {}", e))
        })?;

        validate_config(&config)?;

        *CONFIG.write().unwrap() = config;
    }

    Ok(())
}

fn get_config_path() -> ShopclerkResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ShopclerkError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("shopclerk").join("config.json"))
}

pub fn validate_config(config: &Config) -> ShopclerkResult<()> {
    if config.api_key.is_empty() {
        return Err(ShopclerkError::config_error(
            "API key is required (set ANTHROPIC_API_KEY)",
        ));
    }

    if config.model.is_empty() {
        return Err(ShopclerkError::config_error("Model name is required"));
    }

    if config.api_base_url.is_empty() {
        return Err(ShopclerkError::config_error("API base URL is required"));
    }

    if config.temperature < 0.0 || config.temperature > 1.0 {
        return Err(ShopclerkError::config_error(
            "Temperature must be between 0.0 and 1.0",
        ));
    }

    if config.max_tokens == 0 {
        return Err(ShopclerkError::config_error(
            "max_tokens must be greater than 0",
        ));
    }

    if config.catalog_path.is_empty() {
        return Err(ShopclerkError::config_error("Catalog path is required"));
    }

    if config.shortlist_size == 0 {
        return Err(ShopclerkError::config_error(
            "shortlist_size must be greater than 0",
        ));
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}
