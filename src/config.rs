//! Configuration resolution for revaudit
//!
//! Settings resolve with ENV → TOML priority. The provider API key is
//! an injected secret with no compiled-in default: startup fails when
//! neither source supplies one.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Default HTTP port when `PORT` is unset
const DEFAULT_PORT: u16 = 8000;

/// Default SQLite database path
const DEFAULT_DB_PATH: &str = "revaudit.db";

/// TOML config file shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// SerpApi API key
    pub serpapi_api_key: Option<String>,
    /// SQLite database file path
    pub database_path: Option<String>,
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub port: u16,
    /// SQLite database file path
    pub database_path: PathBuf,
    /// SerpApi API key
    pub serpapi_api_key: String,
}

impl Config {
    /// Load configuration from environment and TOML file.
    pub fn load() -> Result<Self> {
        let toml_config = load_toml_config()?;

        let port = resolve_port()?;
        let database_path = resolve_database_path(&toml_config);
        let serpapi_api_key = resolve_serpapi_api_key(&toml_config)?;

        Ok(Self {
            port,
            database_path,
            serpapi_api_key,
        })
    }
}

/// Config file location: `REVAUDIT_CONFIG` override, else
/// `<config dir>/revaudit/config.toml`.
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("REVAUDIT_CONFIG") {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir().map(|d| d.join("revaudit").join("config.toml"))
}

/// Read the TOML config file if present; a missing file is not an error.
fn load_toml_config() -> Result<TomlConfig> {
    let Some(path) = config_file_path() else {
        return Ok(TomlConfig::default());
    };

    if !path.exists() {
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Read config file failed: {}", e)))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse config file failed: {}", e)))?;

    info!("Configuration loaded from {}", path.display());
    Ok(config)
}

fn resolve_port() -> Result<u16> {
    match std::env::var("PORT") {
        Ok(value) => value
            .parse()
            .map_err(|_| Error::Config(format!("Invalid PORT value: {}", value))),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

fn resolve_database_path(toml_config: &TomlConfig) -> PathBuf {
    if let Ok(path) = std::env::var("REVAUDIT_DB") {
        return PathBuf::from(path);
    }

    if let Some(path) = &toml_config.database_path {
        return PathBuf::from(path);
    }

    PathBuf::from(DEFAULT_DB_PATH)
}

/// Resolve the SerpApi API key with ENV → TOML priority.
pub fn resolve_serpapi_api_key(toml_config: &TomlConfig) -> Result<String> {
    let env_key = std::env::var("SERPAPI_KEY").ok().filter(|k| is_valid_key(k));
    let toml_key = toml_config
        .serpapi_api_key
        .clone()
        .filter(|k| is_valid_key(k));

    if env_key.is_some() && toml_key.is_some() {
        warn!("SerpApi API key found in both environment and TOML. Using environment (highest priority).");
    }

    if let Some(key) = env_key {
        info!("SerpApi API key loaded from environment variable");
        return Ok(key);
    }

    if let Some(key) = toml_key {
        info!("SerpApi API key loaded from TOML config");
        return Ok(key);
    }

    Err(Error::Config(
        "SerpApi API key not configured. Please configure using one of:\n\
         1. Environment: SERPAPI_KEY=your-key-here\n\
         2. TOML config: ~/.config/revaudit/config.toml (serpapi_api_key = \"your-key\")\n\
         \n\
         Obtain API key at: https://serpapi.com/manage-api-key"
            .to_string(),
    ))
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
