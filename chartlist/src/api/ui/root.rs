//! Root page handlers - the date form and its submission

use axum::extract::State;
use axum::response::Html;
use axum::Form;
use chrono::Local;
use serde::Deserialize;
use tracing::{error, info, warn};

use super::render::{render_page, render_result};
use crate::error::PipelineError;
use crate::AppState;

/// Form body of POST /
#[derive(Debug, Deserialize)]
pub struct DateForm {
    /// Missing field is treated like an empty (invalid) date
    #[serde(default)]
    pub date: String,
}

/// GET /
pub async fn root_page() -> Html<String> {
    Html(render_page(""))
}

/// POST /
///
/// Runs the whole pipeline for the submitted date and renders the outcome
/// below the form.
pub async fn submit_date(State(state): State<AppState>, Form(form): Form<DateForm>) -> Html<String> {
    let today = Local::now().date_naive();
    let result = state.pipeline.run(&form.date, today).await;

    match &result {
        Ok(outcome) => info!(
            date = %outcome.date,
            playlist_id = %outcome.playlist.id,
            titles = outcome.titles.len(),
            tracks = outcome.resolution.tracks.len(),
            "Playlist request completed"
        ),
        Err(e) => match e {
            PipelineError::Date(_) => info!(stage = e.stage(), "Rejected date input: {}", e),
            PipelineError::Fetch(_) => {
                error!(stage = e.stage(), "Error fetching Billboard data: {}", e)
            }
            _ => warn!(stage = e.stage(), "Playlist request failed: {}", e),
        },
    }

    Html(render_page(&render_result(&result)))
}
