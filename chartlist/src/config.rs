//! chartlist service configuration
//!
//! Resolved once at startup from `.env`, the process environment and the
//! optional TOML file, then shared read-only with every handler.

use chartlist_common::config::{resolve_setting, TomlConfig};
use chartlist_common::{Error, Result};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

pub const CLIENT_ID_ENV: &str = "SPOTIFY_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "SPOTIFY_CLIENT_SECRET";
pub const REDIRECT_URI_ENV: &str = "SPOTIFY_REDIRECT_URI";

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CHART_URL_TEMPLATE: &str = "https://www.billboard.com/charts/hot-100/{date}";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_SEARCH_DELAY_MS: u64 = 200;
pub const DEFAULT_TOKEN_CACHE_PATH: &str = ".spotify_token_cache.json";

/// Placeholder replaced by the chart date in `chart_url_template`
pub const DATE_PLACEHOLDER: &str = "{date}";

/// How searches are spaced out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacingPolicy {
    /// Sleep the delay between every two searches
    FixedDelay(Duration),
    /// Keep at least the delay between search starts
    MinInterval(Duration),
}

impl PacingPolicy {
    fn parse(mode: Option<&str>, delay: Duration) -> Result<Self> {
        match mode.map(str::trim) {
            None | Some("fixed_delay") => Ok(PacingPolicy::FixedDelay(delay)),
            Some("min_interval") => Ok(PacingPolicy::MinInterval(delay)),
            Some(other) => Err(Error::Config(format!(
                "search_pacing must be \"fixed_delay\" or \"min_interval\", got \"{}\"",
                other
            ))),
        }
    }
}

/// Spotify application credentials
#[derive(Debug, Clone)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub spotify: SpotifyCredentials,
    pub bind_addr: SocketAddr,
    pub chart_url_template: String,
    pub user_agent: String,
    pub pacing: PacingPolicy,
    pub token_cache_path: PathBuf,
}

impl Config {
    /// Resolve configuration from the process environment and a parsed TOML file
    pub fn load(toml: &TomlConfig) -> Result<Self> {
        Self::from_sources(|name| std::env::var(name).ok(), toml)
    }

    /// Resolve configuration from an arbitrary environment lookup
    ///
    /// Fails with a configuration error naming every missing credential.
    pub fn from_sources<F>(env: F, toml: &TomlConfig) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = resolve_setting(
            CLIENT_ID_ENV,
            env(CLIENT_ID_ENV),
            toml.spotify.client_id.as_ref(),
        );
        let client_secret = resolve_setting(
            CLIENT_SECRET_ENV,
            env(CLIENT_SECRET_ENV),
            toml.spotify.client_secret.as_ref(),
        );
        let redirect_uri = resolve_setting(
            REDIRECT_URI_ENV,
            env(REDIRECT_URI_ENV),
            toml.spotify.redirect_uri.as_ref(),
        );

        let (client_id, client_secret, redirect_uri) = match (client_id, client_secret, redirect_uri) {
            (Some(id), Some(secret), Some(uri)) => (id, secret, uri),
            (id, secret, uri) => {
                let missing: Vec<&str> = [
                    (id.is_none(), CLIENT_ID_ENV),
                    (secret.is_none(), CLIENT_SECRET_ENV),
                    (uri.is_none(), REDIRECT_URI_ENV),
                ]
                .into_iter()
                .filter_map(|(absent, name)| absent.then_some(name))
                .collect();

                return Err(Error::Config(format!(
                    "Missing Spotify API credentials: {}. Set them in the environment, \
                     a .env file, or the [spotify] table of the TOML config.",
                    missing.join(", ")
                )));
            }
        };

        let chart_url_template = toml
            .chart_url_template
            .clone()
            .unwrap_or_else(|| DEFAULT_CHART_URL_TEMPLATE.to_string());
        if !chart_url_template.contains(DATE_PLACEHOLDER) {
            return Err(Error::Config(format!(
                "chart_url_template must contain {}: {}",
                DATE_PLACEHOLDER, chart_url_template
            )));
        }

        let pacing = PacingPolicy::parse(
            toml.search_pacing.as_deref(),
            Duration::from_millis(toml.search_delay_ms.unwrap_or(DEFAULT_SEARCH_DELAY_MS)),
        )?;

        Ok(Self {
            spotify: SpotifyCredentials {
                client_id,
                client_secret,
                redirect_uri,
            },
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, toml.port.unwrap_or(DEFAULT_PORT))),
            chart_url_template,
            user_agent: toml
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            pacing,
            token_cache_path: toml
                .token_cache_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_CACHE_PATH)),
        })
    }
}
