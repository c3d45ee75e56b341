//! Spotify Web API integration
//!
//! - `auth`: authorization-code identity provider with a persisted token
//! - `client`: catalog search and playlist calls
//! - `models`: wire types

pub mod auth;
pub mod client;
pub mod models;

pub use auth::SpotifyAuth;
pub use client::SpotifyClient;

use thiserror::Error;

/// Scope needed to create and fill a private playlist
pub const SCOPE: &str = "playlist-modify-private";

/// Spotify provider errors
#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("Network error: {0}")]
    Network(String),

    /// Error reported by the Web API or the accounts service
    #[error("http status: {status}, {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    /// No usable token; the user has to visit `authorize_url` first
    #[error("Authorization required")]
    AuthorizationRequired { authorize_url: String },
}

impl SpotifyError {
    /// True when the provider rejected the application credentials
    pub fn is_invalid_client(&self) -> bool {
        self.to_string().contains("Invalid client")
    }
}
