//! Configuration loading.
//!
//! Config is YAML, discovered in the working directory (`contextgrid.yaml`)
//! or the platform config directory, with an environment variable override
//! for the path. CLI flags override individual values after loading.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file path.
pub const CONFIG_PATH_ENV: &str = "CONTEXTGRID_CONFIG_PATH";

/// Default port for the HTTP server.
pub const DEFAULT_PORT: u16 = 8724;

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            host: default_host(),
            port: default_port(),
        }
    }
}

/// CLI client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the API the CLI talks to.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub client: ClientConfig,
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("contextgrid")
        .join("contextgrid.db")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_api_url() -> String {
    format!("http://127.0.0.1:{}", DEFAULT_PORT)
}

impl Config {
    /// Load configuration, checking in order: an explicit path, the env var
    /// override, a `contextgrid.yaml` in the working directory, then the
    /// platform config directory. Missing files yield defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::load_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Self::load_file(Path::new(&path));
        }

        let cwd_path = PathBuf::from("contextgrid.yaml");
        if cwd_path.exists() {
            return Self::load_file(&cwd_path);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("contextgrid").join("config.yaml");
            if path.exists() {
                return Self::load_file(&path);
            }
        }

        Ok(Self::default())
    }

    fn load_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Create the database's parent directory if needed.
    pub fn ensure_db_dir(&self) -> Result<()> {
        if let Some(parent) = self.server.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create database directory {}", parent.display())
                })?;
            }
        }
        Ok(())
    }
}
