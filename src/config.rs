use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

/// API key value shipped in sample configurations, never valid against the real service
pub const PLACEHOLDER_API_KEY: &str = "your_dev_key_here";

#[derive(Deserialize)]
pub struct OpenWeatherParameters {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_units")]
    pub units: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: u64,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: LevelFilter,
    #[serde(default)]
    pub log_to_stdout: bool,
}

impl Default for General {
    fn default() -> Self {
        General { log_path: None, log_level: default_log_level(), log_to_stdout: false }
    }
}

#[derive(Deserialize)]
pub struct Config {
    pub openweather: OpenWeatherParameters,
    #[serde(default)]
    pub general: General,
}

fn default_base_url() -> String { "https://api.openweathermap.org".to_string() }
fn default_units() -> String { "metric".to_string() }
fn default_timeout_secs() -> u64 { 10 }
fn default_max_response_bytes() -> u64 { 1024 * 1024 }
fn default_log_level() -> LevelFilter { LevelFilter::Info }

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
/// * 'env_api_key' - API key from the environment, overrides the one in the file if given
pub fn load_config(config_path: &str, env_api_key: Option<String>) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;

    parse_config(&toml, env_api_key)
}

/// Parses and validates a configuration document
///
/// # Arguments
///
/// * 'toml' - the configuration as a toml string
/// * 'env_api_key' - API key from the environment, overrides the one in the document if given
pub fn parse_config(toml: &str, env_api_key: Option<String>) -> Result<Config, ConfigError> {
    let mut config: Config = toml::from_str(toml)?;

    if let Some(api_key) = env_api_key.filter(|k| !k.trim().is_empty()) {
        config.openweather.api_key = api_key;
    }
    config.openweather.api_key = config.openweather.api_key.trim().to_string();

    if config.openweather.api_key.is_empty() || config.openweather.api_key == PLACEHOLDER_API_KEY {
        return Err(ConfigError::from("OpenWeatherMap API key is not set"));
    }
    if config.openweather.timeout_secs == 0 {
        return Err(ConfigError::from("timeout_secs must be greater than zero"));
    }
    if config.openweather.max_response_bytes == 0 {
        return Err(ConfigError::from("max_response_bytes must be greater than zero"));
    }

    Ok(config)
}
