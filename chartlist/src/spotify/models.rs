//! Spotify Web API and accounts service wire types
//!
//! Only the fields this service reads are modelled.

use serde::{Deserialize, Serialize};

/// GET /me
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    pub id: String,
}

/// GET /search?type=track
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<Paging<Track>>,
}

/// Paged result container
#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
}

/// Track object (abridged)
#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub uri: String,
}

/// POST /users/{user_id}/playlists body
#[derive(Debug, Clone, Serialize)]
pub struct NewPlaylist<'a> {
    pub name: &'a str,
    pub public: bool,
    pub description: &'a str,
}

/// Playlist object (abridged)
#[derive(Debug, Clone, Deserialize)]
pub struct Playlist {
    pub id: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

/// POST /playlists/{playlist_id}/tracks body
#[derive(Debug, Clone, Serialize)]
pub struct AddItems<'a> {
    pub uris: Vec<&'a str>,
}

/// POST /playlists/{playlist_id}/tracks response
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    pub snapshot_id: String,
}

/// Web API error body: `{"error": {"status": 401, "message": "..."}}` (status comes from the response)
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
}

/// Accounts service error body: `{"error": "invalid_client", "error_description": "Invalid client"}`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenErrorBody {
    pub error: String,
    pub error_description: Option<String>,
}

/// POST /api/token response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
}
