use thiserror::Error;

use crate::spotify::ApiError;

/// Everything that can stop a filter run.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("'{0}' is not a Spotify playlist link")]
    InvalidTargetLink(String),

    #[error("could not find target playlist {playlist_id}: {source}")]
    TargetPlaylistNotFound {
        playlist_id: String,
        #[source]
        source: ApiError,
    },

    #[error("Spotify is unavailable: {0}")]
    UpstreamUnavailable(#[from] ApiError),

    /// The playlist is left partially cleaned; earlier batches are not rolled back.
    #[error(
        "removal stopped after {completed} of {total} batches, the playlist is only partially cleaned: {source}"
    )]
    PartialRemoval {
        completed: usize,
        total: usize,
        #[source]
        source: ApiError,
    },

    #[error("not authenticated: {0}")]
    Unauthenticated(String),
}

impl FilterError {
    /// Stable identifier used by the web surface.
    pub fn kind(&self) -> &'static str {
        match self {
            FilterError::InvalidTargetLink(_) => "invalid_target_link",
            FilterError::TargetPlaylistNotFound { .. } => "target_playlist_not_found",
            FilterError::UpstreamUnavailable(_) => "upstream_unavailable",
            FilterError::PartialRemoval { .. } => "partial_removal",
            FilterError::Unauthenticated(_) => "unauthenticated",
        }
    }
}
