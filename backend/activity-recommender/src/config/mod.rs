use anyhow::{anyhow, Result};
use serde::Deserialize;

use crate::services::{ColdStartStrategy, EngineConfig};

/// Service configuration, read once at startup from the environment
/// (`HTTP_PORT`, `MAX_TOP_N`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // HTTP server config
    #[serde(default = "default_http_host")]
    pub http_host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_app_env")]
    pub app_env: String,
    #[serde(default = "default_json_payload_limit")]
    pub json_payload_limit_bytes: usize,

    // Request defaults
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
    #[serde(default = "default_max_top_n")]
    pub max_top_n: usize,
    #[serde(default = "default_cold_start_strategy")]
    pub default_cold_start_strategy: String,

    // Engine
    #[serde(default)]
    pub popular_from_engagement: bool,
}

fn default_http_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8000
}

fn default_service_name() -> String {
    "activity-recommender".to_string()
}

fn default_app_env() -> String {
    "development".to_string()
}

fn default_json_payload_limit() -> usize {
    16 * 1024 * 1024
}

fn default_top_n() -> usize {
    10
}

fn default_max_top_n() -> usize {
    500
}

fn default_cold_start_strategy() -> String {
    ColdStartStrategy::Popular.as_str().to_string()
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenv::dotenv().ok();
        envy::from_env::<Config>()
    }

    /// Builds config from explicit key/value pairs (keys as env var names).
    pub fn from_iter<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
    }

    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            return Err(anyhow!("HTTP port must be greater than 0"));
        }
        if self.max_top_n == 0 {
            return Err(anyhow!("MAX_TOP_N must be greater than 0"));
        }
        if self.default_top_n > self.max_top_n {
            return Err(anyhow!(
                "DEFAULT_TOP_N ({}) exceeds MAX_TOP_N ({})",
                self.default_top_n,
                self.max_top_n
            ));
        }
        Ok(())
    }

    pub fn cold_start_strategy(&self) -> ColdStartStrategy {
        ColdStartStrategy::normalize(&self.default_cold_start_strategy)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            popular_from_engagement: self.popular_from_engagement,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}
