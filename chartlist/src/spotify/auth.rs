//! Spotify identity provider
//!
//! Authorization-code flow with a token persisted to a JSON cache file:
//! 1. No token: `access_token` fails with `AuthorizationRequired` carrying
//!    the URL the user must visit.
//! 2. Spotify redirects back to `/callback?code=...`; `exchange_code` trades
//!    the code for a token and stores it.
//! 3. Expired token: refreshed with the stored refresh token.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use super::models::{TokenErrorBody, TokenResponse};
use super::{SpotifyError, SCOPE};
use crate::config::SpotifyCredentials;
use crate::types::TokenProvider;

const SPOTIFY_AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";
const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Tokens closer than this to expiry are refreshed
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Token as persisted in the cache file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub scope: Option<String>,
}

impl CachedToken {
    fn from_response(response: TokenResponse, previous_refresh: Option<String>) -> Self {
        Self {
            access_token: response.access_token,
            // Refresh responses may omit the refresh token; keep the old one
            refresh_token: response.refresh_token.or(previous_refresh),
            expires_at: Utc::now() + Duration::seconds(response.expires_in),
            scope: response.scope,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }
}

/// Authorization-code identity provider backed by a token cache file
pub struct SpotifyAuth {
    http_client: reqwest::Client,
    credentials: SpotifyCredentials,
    token_url: String,
    cache_path: PathBuf,
    token: Mutex<Option<CachedToken>>,
}

impl SpotifyAuth {
    /// Create the provider, loading any token already cached at `cache_path`
    pub fn new(credentials: SpotifyCredentials, cache_path: PathBuf) -> Result<Self, SpotifyError> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        let token = load_cached_token(&cache_path);

        Ok(Self {
            http_client,
            credentials,
            token_url: SPOTIFY_TOKEN_URL.to_string(),
            cache_path,
            token: Mutex::new(token),
        })
    }

    /// Point token requests at another accounts service (tests)
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// URL the user visits to grant `playlist-modify-private`
    pub fn authorize_url(&self) -> String {
        Url::parse_with_params(
            SPOTIFY_AUTHORIZE_URL,
            &[
                ("client_id", self.credentials.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.credentials.redirect_uri.as_str()),
                ("scope", SCOPE),
            ],
        )
        .map(String::from)
        .unwrap_or_else(|_| SPOTIFY_AUTHORIZE_URL.to_string())
    }

    /// Whether a token (possibly expired but refreshable) is held
    pub async fn has_token(&self) -> bool {
        self.token.lock().await.is_some()
    }

    /// Trade an authorization code for a token and persist it
    pub async fn exchange_code(&self, code: &str) -> Result<(), SpotifyError> {
        let response = self
            .request_token(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.credentials.redirect_uri.as_str()),
            ])
            .await?;

        let token = CachedToken::from_response(response, None);
        self.store(&token).await;
        *self.token.lock().await = Some(token);

        info!("Spotify authorization completed");
        Ok(())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<CachedToken, SpotifyError> {
        debug!("Refreshing Spotify access token");

        let response = self
            .request_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .await?;

        let token = CachedToken::from_response(response, Some(refresh_token.to_string()));
        self.store(&token).await;
        Ok(token)
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse, SpotifyError> {
        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .form(form)
            .send()
            .await
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<TokenErrorBody>(&body) {
                Ok(err) => match err.error_description {
                    Some(description) => format!("{}: {}", err.error, description),
                    None => err.error,
                },
                Err(_) => body,
            };
            return Err(SpotifyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| SpotifyError::Parse(e.to_string()))
    }

    /// Write the token to the cache file (best-effort)
    async fn store(&self, token: &CachedToken) {
        let result = match serde_json::to_vec_pretty(token) {
            Ok(bytes) => tokio::fs::write(&self.cache_path, bytes)
                .await
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match result {
            Ok(()) => debug!("Token cached at {}", self.cache_path.display()),
            Err(e) => warn!(
                "Could not write token cache {} (token kept in memory): {}",
                self.cache_path.display(),
                e
            ),
        }
    }

    /// Remove the token cache file (best-effort)
    async fn discard_cache(&self) {
        match tokio::fs::remove_file(&self.cache_path).await {
            Ok(()) => info!("Removed stale token cache {}", self.cache_path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Could not remove token cache {}: {}",
                self.cache_path.display(),
                e
            ),
        }
    }
}

/// The accounts service no longer honours the refresh token (revoked or
/// expired grant); only a fresh authorization helps
fn is_rejected_grant(err: &SpotifyError) -> bool {
    matches!(err, SpotifyError::Api { status: 400, message } if message.starts_with("invalid_grant"))
}

#[async_trait]
impl TokenProvider for SpotifyAuth {
    async fn access_token(&self) -> Result<String, SpotifyError> {
        let mut guard = self.token.lock().await;

        if let Some(token) = guard.as_ref() {
            if !token.is_expired(Utc::now()) {
                return Ok(token.access_token.clone());
            }

            if let Some(refresh_token) = token.refresh_token.clone() {
                match self.refresh(&refresh_token).await {
                    Ok(refreshed) => {
                        let access_token = refreshed.access_token.clone();
                        *guard = Some(refreshed);
                        return Ok(access_token);
                    }
                    Err(e) if is_rejected_grant(&e) => {
                        warn!("Spotify refused the stored refresh token: {}", e);
                        *guard = None;
                        self.discard_cache().await;
                    }
                    Err(e) => return Err(e),
                }
            } else {
                warn!("Cached Spotify token expired and cannot be refreshed");
            }
        }

        Err(SpotifyError::AuthorizationRequired {
            authorize_url: self.authorize_url(),
        })
    }
}

/// Read a cached token, treating anything unreadable as absent
fn load_cached_token(path: &Path) -> Option<CachedToken> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No token cache at {}", path.display());
            return None;
        }
        Err(e) => {
            warn!("Could not read token cache {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(token) => {
            info!("Loaded cached Spotify token from {}", path.display());
            Some(token)
        }
        Err(e) => {
            warn!("Ignoring malformed token cache {}: {}", path.display(), e);
            None
        }
    }
}
