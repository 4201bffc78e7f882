#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::Mutex,
};

use async_trait::async_trait;
use spotfilter::{
    spotify::{ApiError, SpotifyApi},
    types::{
        CurrentUser, Page, PlaylistMetadata, PlaylistTracksRef, SimplifiedPlaylist, TrackItem,
    },
};

/// Every call the fake received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CurrentUser,
    LikedSongs { limit: u32, offset: u32 },
    PlaylistItems { playlist_id: String, limit: u32, offset: u32 },
    Metadata { playlist_id: String },
    Remove { playlist_id: String, track_ids: Vec<String> },
    UserPlaylists { limit: u32, offset: u32 },
}

#[derive(Debug, Clone)]
pub enum Entry {
    Track { id: Option<String>, name: String },
    Null,
}

impl Entry {
    fn id(&self) -> Option<&str> {
        match self {
            Entry::Track { id, .. } => id.as_deref(),
            Entry::Null => None,
        }
    }

    fn to_item(&self) -> TrackItem {
        match self {
            Entry::Track { id, name } => TrackItem::track(id.as_deref(), name),
            Entry::Null => TrackItem::empty(),
        }
    }
}

pub fn track(id: &str) -> Entry {
    Entry::Track {
        id: Some(id.to_string()),
        name: format!("Song {}", id),
    }
}

pub fn named(id: &str, name: &str) -> Entry {
    Entry::Track {
        id: Some(id.to_string()),
        name: name.to_string(),
    }
}

pub fn local_file(name: &str) -> Entry {
    Entry::Track {
        id: None,
        name: name.to_string(),
    }
}

pub fn tracks(ids: &[&str]) -> Vec<Entry> {
    ids.iter().map(|id| track(id)).collect()
}

pub fn numbered(prefix: &str, count: usize) -> Vec<Entry> {
    (0..count).map(|i| track(&format!("{}{}", prefix, i))).collect()
}

struct FakePlaylist {
    name: String,
    entries: Vec<Entry>,
}

#[derive(Default)]
struct State {
    liked: Vec<Entry>,
    playlists: HashMap<String, FakePlaylist>,
    calls: Vec<Call>,
    removals: usize,
    fail_removal_at: Option<usize>,
    fail_metadata_for: HashMap<String, u16>,
    reported_total: Option<u64>,
}

/// In-memory Spotify account. Removals mutate the stored playlists.
#[derive(Default)]
pub struct FakeSpotify {
    state: Mutex<State>,
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: "Resource not found".to_string(),
    }
}

fn page<T>(items: Vec<T>, total: u64) -> Page<T> {
    let mut page = Page::new(items);
    page.total = Some(total);
    page
}

fn slice(entries: &[Entry], limit: u32, offset: u32) -> Vec<TrackItem> {
    entries
        .iter()
        .skip(offset as usize)
        .take(limit as usize)
        .map(Entry::to_item)
        .collect()
}

impl FakeSpotify {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_liked(self, entries: Vec<Entry>) -> Self {
        self.state.lock().unwrap().liked = entries;
        self
    }

    pub fn with_playlist(self, id: &str, name: &str, entries: Vec<Entry>) -> Self {
        self.state.lock().unwrap().playlists.insert(
            id.to_string(),
            FakePlaylist {
                name: name.to_string(),
                entries,
            },
        );
        self
    }

    /// Fails the n-th removal call (zero based).
    pub fn fail_removal_at(self, index: usize) -> Self {
        self.state.lock().unwrap().fail_removal_at = Some(index);
        self
    }

    /// Answers metadata lookups for `playlist_id` with 403 Forbidden.
    pub fn fail_metadata_for(self, playlist_id: &str) -> Self {
        self.fail_metadata_with(playlist_id, 403)
    }

    pub fn fail_metadata_with(self, playlist_id: &str, status: u16) -> Self {
        self.state
            .lock()
            .unwrap()
            .fail_metadata_for
            .insert(playlist_id.to_string(), status);
        self
    }

    /// Reports this `total` on every page regardless of the real size.
    pub fn with_reported_total(self, total: u64) -> Self {
        self.state.lock().unwrap().reported_total = Some(total);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn removal_batches(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Remove { track_ids, .. } => Some(track_ids),
                _ => None,
            })
            .collect()
    }

    pub fn item_calls_for(&self, playlist_id: &str) -> Vec<(u32, u32)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::PlaylistItems {
                    playlist_id: id,
                    limit,
                    offset,
                } if id == playlist_id => Some((limit, offset)),
                _ => None,
            })
            .collect()
    }

    pub fn playlist_ids(&self, playlist_id: &str) -> Vec<Option<String>> {
        let state = self.state.lock().unwrap();
        state.playlists[playlist_id]
            .entries
            .iter()
            .map(|e| e.id().map(str::to_string))
            .collect()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl SpotifyApi for FakeSpotify {
    async fn get_current_user(&self) -> Result<CurrentUser, ApiError> {
        self.record(Call::CurrentUser);
        Ok(CurrentUser {
            id: "tester".to_string(),
            display_name: Some("Test User".to_string()),
        })
    }

    async fn page_liked_songs(&self, limit: u32, offset: u32) -> Result<Page<TrackItem>, ApiError> {
        self.record(Call::LikedSongs { limit, offset });
        let state = self.state.lock().unwrap();
        let total = state.reported_total.unwrap_or(state.liked.len() as u64);
        Ok(page(slice(&state.liked, limit, offset), total))
    }

    async fn page_playlist_items(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
        _fields: &str,
    ) -> Result<Page<TrackItem>, ApiError> {
        self.record(Call::PlaylistItems {
            playlist_id: playlist_id.to_string(),
            limit,
            offset,
        });
        let state = self.state.lock().unwrap();
        let playlist = state.playlists.get(playlist_id).ok_or_else(not_found)?;
        let total = state
            .reported_total
            .unwrap_or(playlist.entries.len() as u64);
        Ok(page(slice(&playlist.entries, limit, offset), total))
    }

    async fn get_playlist_metadata(
        &self,
        playlist_id: &str,
        _fields: &str,
    ) -> Result<PlaylistMetadata, ApiError> {
        self.record(Call::Metadata {
            playlist_id: playlist_id.to_string(),
        });
        let state = self.state.lock().unwrap();
        if let Some(&status) = state.fail_metadata_for.get(playlist_id) {
            return Err(ApiError::Status {
                status,
                message: "Metadata lookup failed".to_string(),
            });
        }
        let playlist = state.playlists.get(playlist_id).ok_or_else(not_found)?;
        Ok(PlaylistMetadata {
            name: playlist.name.clone(),
        })
    }

    async fn remove_all_occurrences(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), ApiError> {
        self.record(Call::Remove {
            playlist_id: playlist_id.to_string(),
            track_ids: track_ids.to_vec(),
        });

        let mut state = self.state.lock().unwrap();
        let index = state.removals;
        state.removals += 1;
        if state.fail_removal_at == Some(index) {
            return Err(ApiError::Status {
                status: 503,
                message: "Service unavailable".to_string(),
            });
        }

        let playlist = state.playlists.get_mut(playlist_id).ok_or_else(not_found)?;
        playlist
            .entries
            .retain(|e| !e.id().is_some_and(|id| track_ids.iter().any(|t| t == id)));
        Ok(())
    }

    async fn page_user_playlists(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Page<SimplifiedPlaylist>, ApiError> {
        self.record(Call::UserPlaylists { limit, offset });
        let state = self.state.lock().unwrap();
        let mut all: Vec<SimplifiedPlaylist> = state
            .playlists
            .iter()
            .map(|(id, p)| SimplifiedPlaylist {
                id: id.clone(),
                name: p.name.clone(),
                tracks: Some(PlaylistTracksRef {
                    total: p.entries.len() as u64,
                }),
            })
            .collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok(page(items, total))
    }
}
