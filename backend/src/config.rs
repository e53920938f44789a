//! Configuration management for the Farm Advisor backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with FA_ prefix

use std::path::Path;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Mandi price table configuration
    pub prices: PriceConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Disease model configuration
    pub model: ModelConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,

    /// Maximum request body size in megabytes (image uploads)
    pub body_limit_mb: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PriceConfig {
    /// Path to the commodity price CSV
    pub csv_path: String,
}

impl PriceConfig {
    /// File name shown to clients when the table is missing
    pub fn file_name(&self) -> String {
        Path::new(&self.csv_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.csv_path.clone())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key; empty disables weather lookups
    pub api_key: String,

    /// ISO country code appended to every location query
    pub country_code: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// Path to the ONNX disease model
    pub path: String,

    /// Square input edge in pixels
    pub input_size: u32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("FA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.body_limit_mb", 10)?
            .set_default("prices.csv_path", "latest_stock_data.csv")?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.api_key", "")?
            .set_default("weather.country_code", "IN")?
            .set_default("model.path", "plant_disease_model.onnx")?
            .set_default("model.input_size", 224)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FA_ prefix)
            .add_source(
                Environment::with_prefix("FA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn body_limit_bytes(&self) -> usize {
        self.server.body_limit_mb * 1024 * 1024
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
            body_limit_mb: 10,
        }
    }
}
