//! Pipeline stages for turning a chart date into a playlist
//!
//! Stages run strictly in order, one request at a time:
//! validate → fetch → parse → resolve → build. `pipeline` wires them.

pub mod chart_fetcher;
pub mod chart_parser;
pub mod date_validator;
pub mod pacing;
pub mod pipeline;
pub mod playlist_builder;
pub mod track_resolver;

pub use chart_fetcher::HttpChartSource;
pub use chart_parser::parse_chart;
pub use date_validator::validate_date;
pub use pacing::{FixedDelay, MinInterval};
pub use pipeline::{ChartPlaylistPipeline, PipelineOutcome, PREVIEW_LEN};
pub use playlist_builder::build_playlist;
pub use track_resolver::{resolve_tracks, Resolution};
