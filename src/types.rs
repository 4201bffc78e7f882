use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    /// Tokens are treated as expired four minutes before Spotify would reject them.
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.obtained_at + self.expires_in.saturating_sub(240)
    }
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// One page of a Spotify paging object.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            next: None,
            total: None,
        }
    }
}

/// Entry of `/me/tracks` or `/playlists/{id}/tracks`. The track is `null`
/// for removed or unavailable entries.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackItem {
    #[serde(default)]
    pub track: Option<TrackObject>,
}

/// Local files come back with a `null` id.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackObject {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl TrackItem {
    pub fn track(id: Option<&str>, name: &str) -> Self {
        Self {
            track: Some(TrackObject {
                id: id.map(str::to_string),
                name: Some(name.to_string()),
            }),
        }
    }

    pub fn empty() -> Self {
        Self { track: None }
    }

    /// Returns the track reference when the entry carries a usable identifier.
    pub fn into_track_ref(self) -> Option<TrackRef> {
        let track = self.track?;
        let id = track.id.filter(|id| !id.is_empty())?;
        Some(TrackRef {
            id,
            name: track.name.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaylistRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl CurrentUser {
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistMetadata {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedPlaylist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tracks: Option<PlaylistTracksRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    pub total: u64,
}

impl SimplifiedPlaylist {
    pub fn total_tracks(&self) -> u64 {
        self.tracks.as_ref().map(|t| t.total).unwrap_or(0)
    }
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: String,
    pub name: String,
    pub tracks: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemoveTracksRequest {
    pub tracks: Vec<TrackUri>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackUri {
    pub uri: String,
}

impl RemoveTracksRequest {
    pub fn from_ids(track_ids: &[String]) -> Self {
        Self {
            tracks: track_ids
                .iter()
                .map(|id| TrackUri {
                    uri: format!("spotify:track:{}", id),
                })
                .collect(),
        }
    }
}

/// Union of track identifiers from every selected filter source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    ids: HashSet<String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the identifier was not yet part of the set.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FilterSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of a filter run, shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalReport {
    pub target_playlist_name: String,
    pub removed_count: usize,
    pub removed_track_names: Vec<String>,
    pub dry_run: bool,
}

impl RemovalReport {
    pub fn nothing_removed(target_playlist_name: impl Into<String>) -> Self {
        Self {
            target_playlist_name: target_playlist_name.into(),
            removed_count: 0,
            removed_track_names: Vec::new(),
            dry_run: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.removed_count == 0
    }
}

impl fmt::Display for RemovalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "No songs to remove from '{}'.", self.target_playlist_name)
        } else if self.dry_run {
            write!(
                f,
                "Would remove {} songs from '{}'.",
                self.removed_count, self.target_playlist_name
            )
        } else {
            write!(
                f,
                "Removed {} songs from '{}'.",
                self.removed_count, self.target_playlist_name
            )
        }
    }
}

#[derive(Tabled)]
pub struct RemovedTrackRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
}
