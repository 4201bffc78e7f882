//! # Playlist Diff Engine
//!
//! Removes from a target playlist every track that also appears in one or
//! more filter sources. A run has three sequential stages:
//!
//! 1. [`collector`] pages through the filter sources and builds a [`FilterSet`]
//! 2. [`matcher`] pages through the target and keeps tracks found in the set
//! 3. [`remover`] deletes the matches in batches of at most 100
//!
//! Every upstream call is awaited before the next one is issued. Nothing is
//! kept between runs.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let request = FilterRequest {
//!     target_link: "https://open.spotify.com/playlist/37i9dQZF1DX0XUsuxWHRQd".into(),
//!     filter_playlist_ids: vec![],
//!     include_liked_songs: true,
//! };
//! let report = PlaylistFilter::new(&client, FilterSettings::default())
//!     .run(&request)
//!     .await?;
//! println!("{}", report);
//! ```
//!
//! [`FilterSet`]: crate::types::FilterSet

pub mod collector;
mod error;
pub mod matcher;
pub mod pager;
pub mod remover;

pub use error::FilterError;

use crate::{
    spotify::SpotifyApi,
    types::{PlaylistRef, RemovalReport},
    utils, warning,
};

/// Playlist id the web form uses for the liked songs checkbox.
pub const LIKED_SONGS_SENTINEL: &str = "liked_songs";

/// Largest batch `DELETE /playlists/{id}/tracks` accepts.
pub const REMOVAL_BATCH_SIZE: usize = 100;

/// A source whose tracks should be removed from the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSource {
    LikedSongs,
    Playlist(String),
}

/// What the user asked for, before any resolution.
#[derive(Debug, Clone, Default)]
pub struct FilterRequest {
    /// Share URL or `spotify:playlist:` URI of the playlist to clean.
    pub target_link: String,
    /// Filter playlists as bare ids or links.
    pub filter_playlist_ids: Vec<String>,
    pub include_liked_songs: bool,
}

impl FilterRequest {
    /// Filter sources in the order they are collected, liked songs first.
    ///
    /// The liked songs sentinel and blank entries are dropped from the
    /// playlist list; links are reduced to their ids. Values that are neither
    /// a playlist link nor a bare id are skipped with a warning.
    pub fn sources(&self) -> Vec<FilterSource> {
        let mut sources = Vec::new();
        if self.include_liked_songs {
            sources.push(FilterSource::LikedSongs);
        }

        for raw in &self.filter_playlist_ids {
            let raw = raw.trim();
            if raw.is_empty() || raw == LIKED_SONGS_SENTINEL {
                continue;
            }
            let Some(id) = utils::playlist_id(raw) else {
                warning!("Skipping filter playlist '{}': not a playlist link or id", raw);
                continue;
            };
            let source = FilterSource::Playlist(id);
            if !sources.contains(&source) {
                sources.push(source);
            }
        }

        sources
    }
}

/// Tunables of a run. The defaults are the largest sizes Spotify accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSettings {
    pub liked_songs_page_size: u32,
    pub playlist_page_size: u32,
    pub removal_batch_size: usize,
    /// Collect and match, but skip the removal calls.
    pub dry_run: bool,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            liked_songs_page_size: pager::LIKED_SONGS_PAGE_SIZE,
            playlist_page_size: pager::PLAYLIST_PAGE_SIZE,
            removal_batch_size: REMOVAL_BATCH_SIZE,
            dry_run: false,
        }
    }
}

/// Runs the collect, match and remove stages against one Spotify account.
pub struct PlaylistFilter<'a, C: ?Sized> {
    api: &'a C,
    settings: FilterSettings,
}

impl<'a, C> PlaylistFilter<'a, C>
where
    C: SpotifyApi + ?Sized,
{
    pub fn new(api: &'a C, settings: FilterSettings) -> Self {
        Self { api, settings }
    }

    /// Runs the whole pipeline for one request.
    ///
    /// # Errors
    ///
    /// - [`FilterError::InvalidTargetLink`] before any network call
    /// - [`FilterError::TargetPlaylistNotFound`] when Spotify answers the target
    ///   lookup with 403 or 404, before any collection work
    /// - [`FilterError::UpstreamUnavailable`] when the target lookup, paging or
    ///   removal fails for any other reason
    /// - [`FilterError::PartialRemoval`] when a later removal batch fails
    pub async fn run(&self, request: &FilterRequest) -> Result<RemovalReport, FilterError> {
        let playlist_id = utils::playlist_id_from_link(&request.target_link)
            .ok_or_else(|| FilterError::InvalidTargetLink(request.target_link.clone()))?;

        let target = self.resolve_target(&playlist_id).await?;
        let filter_set =
            collector::collect(self.api, &request.sources(), &self.settings).await?;
        let matches =
            matcher::find_matches(self.api, &target, &filter_set, &self.settings).await?;

        remover::remove(self.api, &target, matches, &self.settings).await
    }

    async fn resolve_target(&self, playlist_id: &str) -> Result<PlaylistRef, FilterError> {
        match self.api.get_playlist_metadata(playlist_id, "name").await {
            Ok(meta) => Ok(PlaylistRef {
                id: playlist_id.to_string(),
                name: meta.name,
            }),
            Err(source) => match source.status() {
                Some(403 | 404) => Err(FilterError::TargetPlaylistNotFound {
                    playlist_id: playlist_id.to_string(),
                    source,
                }),
                _ => Err(FilterError::UpstreamUnavailable(source)),
            },
        }
    }
}
