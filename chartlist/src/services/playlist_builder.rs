//! Playlist creation for a resolved chart

use tracing::{debug, info};

use crate::spotify::client::MAX_TRACKS_PER_REQUEST;
use crate::spotify::SpotifyError;
use crate::types::{Catalog, ChartDate, CreatedPlaylist, PlaylistRequest, TrackRef};

/// Create the private chart playlist for `user_id` and fill it with `tracks`
///
/// A Hot-100 chart fits a single add call. Longer lists are split at the
/// service's per-call limit; an empty list skips the add call entirely.
pub async fn build_playlist(
    catalog: &dyn Catalog,
    user_id: &str,
    date: ChartDate,
    tracks: &[TrackRef],
) -> Result<CreatedPlaylist, SpotifyError> {
    let request = PlaylistRequest::for_chart(date);
    let playlist = catalog.create_playlist(user_id, &request).await?;

    info!(playlist_id = %playlist.id, name = %request.name, "Created playlist");

    for chunk in tracks.chunks(MAX_TRACKS_PER_REQUEST) {
        catalog.add_tracks(&playlist.id, chunk).await?;
    }

    debug!("Spotify playlist URL: {}", playlist.url);
    Ok(playlist)
}
