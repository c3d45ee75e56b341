//! Chart-to-playlist pipeline
//!
//! Runs the stages for one submitted date, strictly in sequence:
//!
//! 1. Validate the date (no network before this succeeds)
//! 2. Fetch the chart page
//! 3. Parse titles (an empty chart stops here, before any catalog call)
//! 4. Authenticate: current user lookup through the token provider
//! 5. Resolve titles to tracks
//! 6. Create the playlist and add the tracks
//!
//! Every stage returns its own error type; the first failure ends the run.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

use super::{build_playlist, parse_chart, resolve_tracks, validate_date, Resolution};
use crate::error::PipelineError;
use crate::types::{Catalog, ChartDate, ChartSource, CreatedPlaylist, Pacer};

/// Number of chart titles shown back to the user
pub const PREVIEW_LEN: usize = 10;

/// Successful run
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub date: ChartDate,
    pub playlist: CreatedPlaylist,
    /// Every parsed chart title, in rank order
    pub titles: Vec<String>,
    pub resolution: Resolution,
}

impl PipelineOutcome {
    /// First titles of the original chart (not the resolved tracks)
    pub fn preview(&self) -> &[String] {
        &self.titles[..self.titles.len().min(PREVIEW_LEN)]
    }
}

/// Stages wired to their collaborators
pub struct ChartPlaylistPipeline {
    chart_source: Arc<dyn ChartSource>,
    catalog: Arc<dyn Catalog>,
    pacer: Arc<dyn Pacer>,
}

impl ChartPlaylistPipeline {
    pub fn new(
        chart_source: Arc<dyn ChartSource>,
        catalog: Arc<dyn Catalog>,
        pacer: Arc<dyn Pacer>,
    ) -> Self {
        Self {
            chart_source,
            catalog,
            pacer,
        }
    }

    /// Run all stages for the raw `input` date, judged against `today`
    pub async fn run(&self, input: &str, today: NaiveDate) -> Result<PipelineOutcome, PipelineError> {
        let date = validate_date(input, today)?;
        info!(date = %date, "Building chart playlist");

        let html = self.chart_source.fetch_chart(date).await?;
        let titles = parse_chart(&html)?;

        let user_id = self.catalog.current_user_id().await?;

        let resolution =
            resolve_tracks(self.catalog.as_ref(), self.pacer.as_ref(), &titles, date.year()).await;

        let playlist =
            build_playlist(self.catalog.as_ref(), &user_id, date, &resolution.tracks).await?;

        Ok(PipelineOutcome {
            date,
            playlist,
            titles,
            resolution,
        })
    }
}
