use crate::{
    engine::{
        FilterError, FilterSettings, FilterSource,
        pager::{self, LikedSongs, PlaylistItems},
    },
    info,
    spotify::SpotifyApi,
    types::FilterSet,
    warning,
};

const FILTER_PLAYLIST_FIELDS: &str = "items(track(id)),next";

/// Builds the union of track ids across all filter sources.
pub async fn collect<C>(
    api: &C,
    sources: &[FilterSource],
    settings: &FilterSettings,
) -> Result<FilterSet, FilterError>
where
    C: SpotifyApi + ?Sized,
{
    let mut filter_set = FilterSet::new();

    for source in sources {
        match source {
            FilterSource::LikedSongs => {
                info!("Fetching liked songs...");
                let pager = LikedSongs { api };
                pager::walk(&pager, settings.liked_songs_page_size, |item| {
                    if let Some(track) = item.into_track_ref() {
                        filter_set.insert(track.id);
                    }
                })
                .await?;
            }
            FilterSource::Playlist(playlist_id) => {
                // the name is only for progress output
                match api.get_playlist_metadata(playlist_id, "name").await {
                    Ok(meta) => info!("Fetching songs from filter playlist '{}'...", meta.name),
                    Err(e) => warning!(
                        "Could not resolve name of filter playlist {}: {}",
                        playlist_id,
                        e
                    ),
                }

                let pager = PlaylistItems {
                    api,
                    playlist_id,
                    fields: FILTER_PLAYLIST_FIELDS,
                };
                pager::walk(&pager, settings.playlist_page_size, |item| {
                    if let Some(track) = item.into_track_ref() {
                        filter_set.insert(track.id);
                    }
                })
                .await?;
            }
        }
    }

    info!("Total unique songs in filter: {}", filter_set.len());
    Ok(filter_set)
}
