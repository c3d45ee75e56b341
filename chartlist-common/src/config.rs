//! Bootstrap configuration: TOML file model, config file discovery and
//! ENV → TOML setting resolution.
//!
//! # Settings Sources Priority
//!
//! 1. Environment variables (a `.env` file in the working directory is
//!    loaded into the environment first)
//! 2. TOML configuration file
//! 3. Built-in defaults (code constants)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit TOML config file
pub const CONFIG_PATH_ENV: &str = "CHARTLIST_CONFIG";

/// Bootstrap configuration loaded from TOML file
///
/// Every field is optional. Missing fields fall back to built-in defaults,
/// secrets fall back to nothing and are reported by the caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// HTTP server port (bind host is always all interfaces)
    #[serde(default)]
    pub port: Option<u16>,

    /// Chart page URL with a `{date}` placeholder
    #[serde(default)]
    pub chart_url_template: Option<String>,

    /// User-Agent header sent to the chart source
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Delay between catalog searches, in milliseconds
    #[serde(default)]
    pub search_delay_ms: Option<u64>,

    /// How `search_delay_ms` is applied: "fixed_delay" or "min_interval"
    #[serde(default)]
    pub search_pacing: Option<String>,

    /// Where the OAuth token is persisted between runs
    #[serde(default)]
    pub token_cache_path: Option<PathBuf>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Spotify application credentials (optional, ENV takes priority)
    #[serde(default)]
    pub spotify: SpotifyToml,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// `[spotify]` table of the TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpotifyToml {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load `.env` from the working directory into the process environment
///
/// A missing `.env` file is normal; only the outcome is logged.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!("Ignoring unreadable .env file: {}", e),
    }
}

/// Locate the TOML config file
///
/// `$CHARTLIST_CONFIG` wins; otherwise `<config dir>/chartlist/config.toml`.
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if is_valid_key(&path) {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir().map(|d| d.join("chartlist").join("config.toml"))
}

/// Read and parse the TOML config file
///
/// A missing file yields the defaults. A file that exists but cannot be
/// read or parsed is a configuration error.
pub fn load_toml_config(path: Option<&Path>) -> Result<TomlConfig> {
    let Some(path) = path else {
        debug!("No config file location available, using defaults");
        return Ok(TomlConfig::default());
    };

    if !path.exists() {
        debug!("Config file {} not found, using defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML {} failed: {}", path.display(), e)))?;

    info!("Loaded config file {}", path.display());
    Ok(config)
}

/// Resolve one setting from environment and TOML
///
/// **Priority:** ENV → TOML. Blank values count as absent.
pub fn resolve_setting(
    name: &str,
    env_value: Option<String>,
    toml_value: Option<&String>,
) -> Option<String> {
    let env_value = env_value.filter(|v| is_valid_key(v));
    let toml_value = toml_value.filter(|v| is_valid_key(v));

    match (env_value, toml_value) {
        (Some(env), Some(_)) => {
            warn!(
                "{} found in both environment and TOML config. Using environment.",
                name
            );
            Some(env)
        }
        (Some(env), None) => Some(env),
        (None, Some(toml)) => {
            debug!("{} loaded from TOML config", name);
            Some(toml.clone())
        }
        (None, None) => None,
    }
}

/// Validate a setting value (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
