use std::time::Duration;

use anyhow::Context;
use floorplan_vision::client::{DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:8080,http://127.0.0.1:8080,http://localhost:5173,http://127.0.0.1:5173";

/// Server settings, read from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// CORS origins; empty allows any origin
    pub allowed_origins: Vec<String>,
    pub max_body_bytes: usize,
    /// Vision import is disabled when unset
    pub openai_api_key: Option<String>,
    pub vision_model: Option<String>,
    pub vision_api_base: String,
    pub vision_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            allowed_origins: split_origins(DEFAULT_ALLOWED_ORIGINS),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            openai_api_key: None,
            vision_model: None,
            vision_api_base: DEFAULT_API_BASE.to_string(),
            vision_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    /// `BIND_ADDR`, `ALLOWED_ORIGINS`, `MAX_BODY_BYTES`, `OPENAI_API_KEY`,
    /// `VISION_MODEL`, `VISION_API_BASE`, `VISION_TIMEOUT_SECS`
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let max_body_bytes = match std::env::var("MAX_BODY_BYTES") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid MAX_BODY_BYTES: {}", raw))?,
            Err(_) => defaults.max_body_bytes,
        };
        let vision_timeout = match std::env::var("VISION_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.parse()
                    .with_context(|| format!("Invalid VISION_TIMEOUT_SECS: {}", raw))?,
            ),
            Err(_) => defaults.vision_timeout,
        };

        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .map(|raw| split_origins(&raw))
                .unwrap_or(defaults.allowed_origins),
            max_body_bytes,
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            vision_model: std::env::var("VISION_MODEL").ok(),
            vision_api_base: std::env::var("VISION_API_BASE").unwrap_or(defaults.vision_api_base),
            vision_timeout,
        })
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
