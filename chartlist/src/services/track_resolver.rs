//! Resolution of chart titles to catalog tracks
//!
//! One search per title, constrained to the chart year, first hit wins.
//! A failing search is logged and skipped; it never aborts the batch.

use tracing::{debug, error, info};

use crate::types::{Catalog, Pacer, TrackRef};

/// Outcome of resolving a chart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved tracks, in chart order
    pub tracks: Vec<TrackRef>,
    /// Titles the search answered with no result
    pub unmatched: usize,
    /// Titles whose search call failed
    pub failed: usize,
}

/// Resolve `titles` to tracks released in `year`
///
/// `pacer` runs right before each search. Unresolved titles are simply
/// omitted, so `tracks` keeps the relative chart order of the matches.
pub async fn resolve_tracks(
    catalog: &dyn Catalog,
    pacer: &dyn Pacer,
    titles: &[String],
    year: i32,
) -> Resolution {
    let mut resolution = Resolution::default();

    for title in titles {
        pacer.pace().await;

        match catalog.search_track(title, year).await {
            Ok(Some(track)) => {
                debug!(title = %title, uri = %track.as_str(), "Resolved title");
                resolution.tracks.push(track);
            }
            Ok(None) => {
                debug!(title = %title, year, "No catalog match");
                resolution.unmatched += 1;
            }
            Err(e) => {
                error!("Error searching for song '{}': {}", title, e);
                resolution.failed += 1;
            }
        }
    }

    info!(
        total = titles.len(),
        resolved = resolution.tracks.len(),
        unmatched = resolution.unmatched,
        failed = resolution.failed,
        "Resolved chart titles"
    );

    resolution
}
