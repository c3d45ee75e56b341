//! Base traits and types shared by the pipeline stages
//!
//! The traits mark the seams to the outside world (chart source, catalog,
//! identity provider, pacing) so the pipeline can run against fakes.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::error::FetchError;
use crate::spotify::SpotifyError;

/// Date format accepted from the form and used in chart URLs
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated chart date (never later than the day it was validated on)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartDate(NaiveDate);

impl ChartDate {
    pub(crate) fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Release year used to constrain catalog searches
    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl fmt::Display for ChartDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// Opaque catalog identifier of a recording (a Spotify track URI)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRef(pub String);

impl TrackRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Parameters of a playlist to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

impl PlaylistRequest {
    /// Private playlist named after the chart date
    pub fn for_chart(date: ChartDate) -> Self {
        Self {
            name: format!("{} Billboard 100", date),
            description: format!("Top 100 songs from Billboard on {}", date),
            public: false,
        }
    }
}

/// A playlist as created by the catalog service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPlaylist {
    pub id: String,
    pub url: String,
}

/// Source of chart markup for a date
#[async_trait]
pub trait ChartSource: Send + Sync {
    /// Fetch the raw chart page for `date`
    async fn fetch_chart(&self, date: ChartDate) -> Result<String, FetchError>;
}

/// Identity provider collaborator
///
/// Produces an access token for the end user from stored or refreshed
/// credentials. How the token was obtained is not the caller's concern.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, SpotifyError>;
}

/// Catalog and playlist service of the authenticated user
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Id of the user owning the access token
    async fn current_user_id(&self) -> Result<String, SpotifyError>;

    /// First track matching `title` released in `year`, if any
    async fn search_track(&self, title: &str, year: i32) -> Result<Option<TrackRef>, SpotifyError>;

    /// Create a playlist owned by `user_id`
    async fn create_playlist(
        &self,
        user_id: &str,
        request: &PlaylistRequest,
    ) -> Result<CreatedPlaylist, SpotifyError>;

    /// Append `tracks` to a playlist in one call
    async fn add_tracks(&self, playlist_id: &str, tracks: &[TrackRef]) -> Result<(), SpotifyError>;
}

/// Pacing policy awaited right before each catalog search
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pace(&self);
}
