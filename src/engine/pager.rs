use async_trait::async_trait;

use crate::{
    spotify::{ApiError, SpotifyApi},
    types::{Page, SimplifiedPlaylist, TrackItem},
};

/// Largest page `/me/tracks` and `/me/playlists` accept.
pub const LIKED_SONGS_PAGE_SIZE: u32 = 50;
/// Largest page `/playlists/{id}/tracks` accepts.
pub const PLAYLIST_PAGE_SIZE: u32 = 100;

/// A paged listing that can be fetched by limit and offset.
#[async_trait]
pub trait Pager<T: Send + 'static>: Send + Sync {
    async fn fetch(&self, limit: u32, offset: u32) -> Result<Page<T>, ApiError>;
}

/// Walks every page of `pager` and hands each item to `visit`.
///
/// Stops at the first empty page only. A short page is not taken as the end
/// of the list and the reported `total` is ignored. The offset advances by
/// the number of items actually returned. Returns the number of requests made.
pub async fn walk<T, P, F>(pager: &P, page_size: u32, mut visit: F) -> Result<usize, ApiError>
where
    T: Send + 'static,
    P: Pager<T> + ?Sized,
    F: FnMut(T),
{
    let mut offset: u32 = 0;
    let mut requests = 0;

    loop {
        let page = pager.fetch(page_size, offset).await?;
        requests += 1;

        if page.items.is_empty() {
            return Ok(requests);
        }

        offset += page.items.len() as u32;
        page.items.into_iter().for_each(&mut visit);
    }
}

pub struct LikedSongs<'a, C: ?Sized> {
    pub api: &'a C,
}

#[async_trait]
impl<C> Pager<TrackItem> for LikedSongs<'_, C>
where
    C: SpotifyApi + ?Sized,
{
    async fn fetch(&self, limit: u32, offset: u32) -> Result<Page<TrackItem>, ApiError> {
        self.api.page_liked_songs(limit, offset).await
    }
}

pub struct PlaylistItems<'a, C: ?Sized> {
    pub api: &'a C,
    pub playlist_id: &'a str,
    pub fields: &'a str,
}

#[async_trait]
impl<C> Pager<TrackItem> for PlaylistItems<'_, C>
where
    C: SpotifyApi + ?Sized,
{
    async fn fetch(&self, limit: u32, offset: u32) -> Result<Page<TrackItem>, ApiError> {
        self.api
            .page_playlist_items(self.playlist_id, limit, offset, self.fields)
            .await
    }
}

pub struct UserPlaylists<'a, C: ?Sized> {
    pub api: &'a C,
}

#[async_trait]
impl<C> Pager<SimplifiedPlaylist> for UserPlaylists<'_, C>
where
    C: SpotifyApi + ?Sized,
{
    async fn fetch(&self, limit: u32, offset: u32) -> Result<Page<SimplifiedPlaylist>, ApiError> {
        self.api.page_user_playlists(limit, offset).await
    }
}

/// Lists every playlist the current user owns or follows.
pub async fn user_playlists<C>(api: &C) -> Result<Vec<SimplifiedPlaylist>, ApiError>
where
    C: SpotifyApi + ?Sized,
{
    let mut playlists = Vec::new();
    walk(&UserPlaylists { api }, LIKED_SONGS_PAGE_SIZE, |p| playlists.push(p)).await?;
    Ok(playlists)
}
