//! chartlist library interface
//!
//! Turns a Billboard Hot 100 chart date into a private Spotify playlist.
//! Exposes the router and pipeline for the binary and integration tests.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod spotify;
pub mod types;

pub use crate::error::PipelineError;

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::{ChartPlaylistPipeline, HttpChartSource};
use crate::spotify::{SpotifyAuth, SpotifyClient};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Chart-to-playlist stages and their collaborators
    pub pipeline: Arc<ChartPlaylistPipeline>,
    /// Spotify identity provider (authorization callback, health)
    pub auth: Arc<SpotifyAuth>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(pipeline: Arc<ChartPlaylistPipeline>, auth: Arc<SpotifyAuth>) -> Self {
        Self {
            pipeline,
            auth,
            startup_time: Utc::now(),
        }
    }

    /// Wire the production collaborators described by `config`
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let auth = Arc::new(SpotifyAuth::new(
            config.spotify.clone(),
            config.token_cache_path.clone(),
        )?);
        let catalog = Arc::new(SpotifyClient::new(auth.clone())?);
        let chart_source = Arc::new(HttpChartSource::new(
            config.chart_url_template.clone(),
            &config.user_agent,
        )?);

        let pipeline = ChartPlaylistPipeline::new(chart_source, catalog, config.pacing.pacer());

        Ok(Self::new(Arc::new(pipeline), auth))
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // UI routes (HTML pages)
        .merge(api::ui_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
