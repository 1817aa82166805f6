//! Configuration management for the roast simulator server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with ROAST_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Log output configuration
    pub log: LogConfig,

    /// In-memory session registry
    pub sessions: SessionConfig,

    /// Defaults applied to simulated roasts
    pub simulation: SimulationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Maximum number of live sessions held in memory
    pub max_sessions: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    /// Batch size used when a start request names no batch size
    pub default_batch_size_g: u32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("ROAST_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("log.format", "pretty")?
            .set_default("sessions.max_sessions", 64)?
            .set_default("simulation.default_batch_size_g", 250)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (ROAST_ prefix)
            .add_source(
                Environment::with_prefix("ROAST")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            log: LogConfig {
                format: LogFormat::Pretty,
            },
            sessions: SessionConfig { max_sessions: 64 },
            simulation: SimulationConfig {
                default_batch_size_g: 250,
            },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
