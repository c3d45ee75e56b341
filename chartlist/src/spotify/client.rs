//! Spotify Web API client
//!
//! Implements the `Catalog` seam: current user lookup, year-constrained
//! track search, private playlist creation and batch track addition.

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::models::{
    AddItems, ApiErrorBody, CurrentUser, NewPlaylist, Playlist, SearchResponse, Snapshot,
};
use super::SpotifyError;
use crate::types::{Catalog, CreatedPlaylist, PlaylistRequest, TokenProvider, TrackRef};

const SPOTIFY_API_BASE_URL: &str = "https://api.spotify.com/v1";
const PLAYLIST_WEB_URL: &str = "https://open.spotify.com/playlist";

/// Upper bound of URIs accepted by one add-items call
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

/// Search query restricted to one release year
pub fn search_query(title: &str, year: i32) -> String {
    format!("track:{} year:{}", title, year)
}

/// Spotify Web API client acting for the user behind `tokens`
pub struct SpotifyClient {
    http_client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl SpotifyClient {
    pub fn new(tokens: Arc<dyn TokenProvider>) -> Result<Self, SpotifyError> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: SPOTIFY_API_BASE_URL.to_string(),
            tokens,
        })
    }

    /// Point API calls at another base URL (tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Authorize, send and decode one API call
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SpotifyError> {
        let token = self.tokens.access_token().await?;

        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
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
}

#[async_trait]
impl Catalog for SpotifyClient {
    async fn current_user_id(&self) -> Result<String, SpotifyError> {
        let url = format!("{}/me", self.base_url);
        let user: CurrentUser = self.send(self.http_client.get(&url)).await?;
        Ok(user.id)
    }

    async fn search_track(&self, title: &str, year: i32) -> Result<Option<TrackRef>, SpotifyError> {
        let url = format!("{}/search", self.base_url);
        let query = search_query(title, year);

        tracing::debug!(query = %query, "Searching Spotify");

        let result: SearchResponse = self
            .send(self.http_client.get(&url).query(&[
                ("q", query.as_str()),
                ("type", "track"),
                ("limit", "1"),
            ]))
            .await?;

        Ok(result
            .tracks
            .and_then(|page| page.items.into_iter().next())
            .map(|track| TrackRef(track.uri)))
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &PlaylistRequest,
    ) -> Result<CreatedPlaylist, SpotifyError> {
        let url = format!("{}/users/{}/playlists", self.base_url, user_id);
        let body = NewPlaylist {
            name: &request.name,
            public: request.public,
            description: &request.description,
        };

        let playlist: Playlist = self.send(self.http_client.post(&url).json(&body)).await?;

        let url = playlist
            .external_urls
            .spotify
            .unwrap_or_else(|| format!("{}/{}", PLAYLIST_WEB_URL, playlist.id));

        Ok(CreatedPlaylist {
            id: playlist.id,
            url,
        })
    }

    async fn add_tracks(&self, playlist_id: &str, tracks: &[TrackRef]) -> Result<(), SpotifyError> {
        let url = format!("{}/playlists/{}/tracks", self.base_url, playlist_id);
        let body = AddItems {
            uris: tracks.iter().map(TrackRef::as_str).collect(),
        };

        let snapshot: Snapshot = self.send(self.http_client.post(&url).json(&body)).await?;

        tracing::debug!(
            playlist_id = %playlist_id,
            snapshot_id = %snapshot.snapshot_id,
            count = tracks.len(),
            "Added tracks to playlist"
        );
        Ok(())
    }
}
