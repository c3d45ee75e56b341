//! Error types for chartlist
//!
//! One error type per pipeline stage. `PipelineError` carries whichever
//! stage failed so the request handler can pick the inline message.

use chrono::NaiveDate;
use thiserror::Error;

use crate::spotify::SpotifyError;

/// Input validation failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("'{0}' is not a date in YYYY-MM-DD format")]
    Unparsable(String),

    #[error("{0} is in the future")]
    InFuture(NaiveDate),
}

/// Chart page retrieval failures
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Network(String),

    /// Non-success HTTP status from the chart source
    #[error("{status} {reason} for url: {url}")]
    Status {
        status: u16,
        reason: String,
        url: String,
    },
}

/// Chart markup parsing failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("No songs found in chart page")]
    NoSongs,
}

/// Failure of one request's pipeline, tagged by stage
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Validation error: {0}")]
    Date(#[from] DateError),

    #[error("Chart fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Chart parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Spotify error: {0}")]
    Provider(#[from] SpotifyError),
}

impl PipelineError {
    /// Short stage label for logs
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Date(_) => "validate",
            PipelineError::Fetch(_) => "fetch",
            PipelineError::Parse(_) => "parse",
            PipelineError::Provider(_) => "spotify",
        }
    }
}
