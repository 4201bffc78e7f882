use async_trait::async_trait;
use thiserror::Error;

use crate::types::{CurrentUser, Page, PlaylistMetadata, SimplifiedPlaylist, TrackItem};

/// Error returned by any call to the Spotify Web API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Spotify responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid API url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::InvalidUrl(_) => None,
        }
    }
}

/// Capabilities the diff engine needs from Spotify.
///
/// Paging calls take a `limit` and an `offset` and return whatever the
/// service hands back; end-of-list detection is the caller's job.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    async fn get_current_user(&self) -> Result<CurrentUser, ApiError>;

    /// `GET /me/tracks`, at most 50 per page.
    async fn page_liked_songs(&self, limit: u32, offset: u32) -> Result<Page<TrackItem>, ApiError>;

    /// `GET /playlists/{id}/tracks`, at most 100 per page.
    async fn page_playlist_items(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
        fields: &str,
    ) -> Result<Page<TrackItem>, ApiError>;

    async fn get_playlist_metadata(
        &self,
        playlist_id: &str,
        fields: &str,
    ) -> Result<PlaylistMetadata, ApiError>;

    /// Removes every occurrence of each listed track, at most 100 ids per call.
    async fn remove_all_occurrences(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), ApiError>;

    /// `GET /me/playlists`, at most 50 per page.
    async fn page_user_playlists(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Page<SimplifiedPlaylist>, ApiError>;
}
