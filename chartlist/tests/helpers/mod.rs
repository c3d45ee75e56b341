//! Shared test helpers: in-process fakes for the pipeline seams, chart
//! fixtures, and a local HTTP server launcher.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chartlist::config::SpotifyCredentials;
use chartlist::error::FetchError;
use chartlist::services::ChartPlaylistPipeline;
use chartlist::spotify::{SpotifyAuth, SpotifyError};
use chartlist::types::{
    Catalog, ChartDate, ChartSource, CreatedPlaylist, Pacer, PlaylistRequest, TrackRef,
};
use chartlist::AppState;

// =============================================================================
// Chart fixtures
// =============================================================================

/// Chart page in the Billboard nested-list layout
pub fn chart_html(titles: &[String]) -> String {
    let entries: String = titles
        .iter()
        .enumerate()
        .map(|(rank, title)| {
            format!(
                r#"<li class="o-chart-results-list-row">
                     <span class="rank">{}</span>
                     <ul><li class="lrv-u-width-100p"><h3 class="c-title"> {} </h3><span>Artist</span></li></ul>
                   </li>"#,
                rank + 1,
                title
            )
        })
        .collect();

    format!(
        "<html><head><title>Hot 100</title></head><body><h3>Billboard Hot 100</h3>\
         <div class=\"chart-results\"><ul>{}</ul></div></body></html>",
        entries
    )
}

/// "Song 1" .. "Song n"
pub fn numbered_titles(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("Song {}", i)).collect()
}

// =============================================================================
// Chart source fake
// =============================================================================

pub enum ChartResponse {
    Page(String),
    Status(u16),
    Network(String),
}

pub struct FakeChartSource {
    response: ChartResponse,
    pub requested: Mutex<Vec<String>>,
}

impl FakeChartSource {
    pub fn page(html: String) -> Self {
        Self::with(ChartResponse::Page(html))
    }

    pub fn with(response: ChartResponse) -> Self {
        Self {
            response,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requested.lock().unwrap().len()
    }
}

#[async_trait]
impl ChartSource for FakeChartSource {
    async fn fetch_chart(&self, date: ChartDate) -> Result<String, FetchError> {
        self.requested.lock().unwrap().push(date.to_string());

        match &self.response {
            ChartResponse::Page(html) => Ok(html.clone()),
            ChartResponse::Status(status) => Err(FetchError::Status {
                status: *status,
                reason: "Error".to_string(),
                url: format!("https://chart.test/{}", date),
            }),
            ChartResponse::Network(message) => Err(FetchError::Network(message.clone())),
        }
    }
}

// =============================================================================
// Catalog fake
// =============================================================================

/// Catalog resolving every title except the unmatched/failing ones
#[derive(Default)]
pub struct FakeCatalog {
    pub unmatched: HashSet<String>,
    pub failing: HashSet<String>,
    /// Error message returned by the current user lookup
    pub user_error: Option<String>,
    /// Error message returned by playlist creation
    pub create_error: Option<String>,

    pub searches: Mutex<Vec<(String, i32)>>,
    pub created: Mutex<Vec<(String, PlaylistRequest)>>,
    pub added: Mutex<Vec<(String, Vec<TrackRef>)>>,
    pub user_lookups: AtomicUsize,
}

impl FakeCatalog {
    pub fn resolving_all() -> Self {
        Self::default()
    }

    pub fn without(titles: &[String]) -> Self {
        Self {
            unmatched: titles.iter().cloned().collect(),
            ..Self::default()
        }
    }

    pub fn uri_for(title: &str) -> TrackRef {
        TrackRef(format!("spotify:track:{}", title.replace(' ', "_")))
    }

    /// Every call of any kind made against the catalog
    pub fn total_calls(&self) -> usize {
        self.user_lookups.load(Ordering::SeqCst)
            + self.searches.lock().unwrap().len()
            + self.created.lock().unwrap().len()
            + self.added.lock().unwrap().len()
    }

    /// All tracks added, over every add call, in order
    pub fn added_tracks(&self) -> Vec<TrackRef> {
        self.added
            .lock()
            .unwrap()
            .iter()
            .flat_map(|(_, tracks)| tracks.clone())
            .collect()
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn current_user_id(&self) -> Result<String, SpotifyError> {
        self.user_lookups.fetch_add(1, Ordering::SeqCst);
        match &self.user_error {
            Some(message) => Err(SpotifyError::Api {
                status: 400,
                message: message.clone(),
            }),
            None => Ok("test-user".to_string()),
        }
    }

    async fn search_track(&self, title: &str, year: i32) -> Result<Option<TrackRef>, SpotifyError> {
        self.searches.lock().unwrap().push((title.to_string(), year));

        if self.failing.contains(title) {
            return Err(SpotifyError::Api {
                status: 500,
                message: "search backend failure".to_string(),
            });
        }
        if self.unmatched.contains(title) {
            return Ok(None);
        }
        Ok(Some(Self::uri_for(title)))
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &PlaylistRequest,
    ) -> Result<CreatedPlaylist, SpotifyError> {
        if let Some(message) = &self.create_error {
            return Err(SpotifyError::Api {
                status: 403,
                message: message.clone(),
            });
        }

        let mut created = self.created.lock().unwrap();
        created.push((user_id.to_string(), request.clone()));
        let id = format!("playlist{}", created.len());

        Ok(CreatedPlaylist {
            url: format!("https://open.spotify.com/playlist/{}", id),
            id,
        })
    }

    async fn add_tracks(&self, playlist_id: &str, tracks: &[TrackRef]) -> Result<(), SpotifyError> {
        self.added
            .lock()
            .unwrap()
            .push((playlist_id.to_string(), tracks.to_vec()));
        Ok(())
    }
}

// =============================================================================
// Pacing and wiring
// =============================================================================

pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn pace(&self) {}
}

pub fn pipeline(chart: Arc<FakeChartSource>, catalog: Arc<FakeCatalog>) -> ChartPlaylistPipeline {
    ChartPlaylistPipeline::new(chart, catalog, Arc::new(NoPacing))
}

pub fn credentials(redirect_uri: &str) -> SpotifyCredentials {
    SpotifyCredentials {
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string(),
        redirect_uri: redirect_uri.to_string(),
    }
}

/// App state over fakes; the identity provider caches into `cache_dir`
pub fn app_state(
    chart: Arc<FakeChartSource>,
    catalog: Arc<FakeCatalog>,
    cache_dir: &std::path::Path,
) -> AppState {
    let auth = SpotifyAuth::new(
        credentials("http://localhost:5000/callback"),
        cache_dir.join("token.json"),
    )
    .unwrap();

    AppState::new(Arc::new(pipeline(chart, catalog)), Arc::new(auth))
}

// =============================================================================
// Local HTTP server
// =============================================================================

/// Serve `router` on an ephemeral localhost port, returning its base URL
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}
