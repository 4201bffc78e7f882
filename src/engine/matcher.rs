use crate::{
    engine::{FilterError, FilterSettings, pager::{self, PlaylistItems}},
    info,
    spotify::SpotifyApi,
    types::{FilterSet, PlaylistRef, TrackRef},
};

const TARGET_PLAYLIST_FIELDS: &str = "items(track(id,name)),next";

/// Returns every track of the target playlist whose id is in `filter_set`.
///
/// Order follows the playlist and a track listed twice is returned twice.
/// Nothing is modified, so this is safe to repeat.
pub async fn find_matches<C>(
    api: &C,
    target: &PlaylistRef,
    filter_set: &FilterSet,
    settings: &FilterSettings,
) -> Result<Vec<TrackRef>, FilterError>
where
    C: SpotifyApi + ?Sized,
{
    info!("Scanning target playlist '{}'", target.name);

    let mut matches = Vec::new();
    let pager = PlaylistItems {
        api,
        playlist_id: &target.id,
        fields: TARGET_PLAYLIST_FIELDS,
    };

    pager::walk(&pager, settings.playlist_page_size, |item| {
        let Some(track) = item.into_track_ref() else {
            return;
        };
        if filter_set.contains(&track.id) {
            info!("  -> Found match: {}", track.name);
            matches.push(track);
        }
    })
    .await?;

    Ok(matches)
}
