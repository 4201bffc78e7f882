use crate::{
    engine::{FilterError, FilterSettings},
    info,
    spotify::SpotifyApi,
    success,
    types::{PlaylistRef, RemovalReport, TrackRef},
    utils,
};

/// Removes the matched tracks from the target playlist in sequential batches.
///
/// Each call asks Spotify to drop every occurrence of the listed ids. Batches
/// go out one at a time in match order. When a batch fails after an earlier
/// one succeeded the error is [`FilterError::PartialRemoval`] with the number
/// of completed batches.
pub async fn remove<C>(
    api: &C,
    target: &PlaylistRef,
    matches: Vec<TrackRef>,
    settings: &FilterSettings,
) -> Result<RemovalReport, FilterError>
where
    C: SpotifyApi + ?Sized,
{
    if matches.is_empty() {
        return Ok(RemovalReport::nothing_removed(&target.name));
    }

    let ids: Vec<String> = matches.iter().map(|t| t.id.clone()).collect();
    let total = utils::batch_count(ids.len(), settings.removal_batch_size);

    if settings.dry_run {
        info!(
            "Dry run: would remove {} songs in {} batches",
            ids.len(),
            total
        );
    } else {
        info!("Removing {} songs...", ids.len());

        for (index, batch) in utils::batches(&ids, settings.removal_batch_size).enumerate() {
            if let Err(source) = api.remove_all_occurrences(&target.id, batch).await {
                return Err(if index == 0 {
                    FilterError::UpstreamUnavailable(source)
                } else {
                    FilterError::PartialRemoval {
                        completed: index,
                        total,
                        source,
                    }
                });
            }
            success!("Removed batch {}/{}", index + 1, total);
        }
    }

    Ok(RemovalReport {
        target_playlist_name: target.name.clone(),
        removed_count: matches.len(),
        removed_track_names: matches.into_iter().map(|t| t.name).collect(),
        dry_run: settings.dry_run,
    })
}
