// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub backend: BackendConfig,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_address")]
    pub address: IpAddr,
    pub port: u16,
}

/// Where the tracking backend lives and how long to wait for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: AppConfig,
    production: AppConfig,
}

fn default_address() -> IpAddr {
    IpAddr::from([127, 0, 0, 1])
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl BackendConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Load the section of `path` matching the current environment
    pub fn load(path: &Path) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        Self::load_from_file(path, &environment)
    }

    fn get_environment() -> String {
        std::env::var("JOBSY_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn load_from_file(path: &Path, environment: &str) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "{} not found. The gateway cannot start without configuration.",
                path.display()
            );
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_yaml(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile =
            serde_yaml::from_str(content).context("Invalid configuration YAML")?;

        let mut config = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        config.backend.base_url = config.backend.base_url.trim_end_matches('/').to_string();
        if config.backend.base_url.is_empty() {
            anyhow::bail!("backend.base_url must not be empty");
        }

        Ok(config)
    }
}
