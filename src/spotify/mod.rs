//! # Spotify Integration Module
//!
//! The integration layer between the playlist filter and the Spotify Web API.
//!
//! ```text
//! Engine (collect, match, remove)
//!          ↓
//! SpotifyApi trait
//!          ↓
//! SpotifyClient (reqwest, JSON, retries)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Modules
//!
//! - [`api`] - the [`SpotifyApi`] trait the engine consumes, and [`ApiError`]
//! - [`client`] - [`SpotifyClient`], the reqwest implementation
//! - [`auth`] - OAuth 2.0 PKCE flow, code exchange and token refresh
//!
//! ## API Coverage
//!
//! - `GET /me` - current user
//! - `GET /me/tracks` - liked songs, 50 per page
//! - `GET /me/playlists` - user's playlists, 50 per page
//! - `GET /playlists/{id}` - playlist metadata (name)
//! - `GET /playlists/{id}/tracks` - playlist items, 100 per page
//! - `DELETE /playlists/{id}/tracks` - remove all occurrences, 100 ids per call
//! - `POST /api/token` - code exchange and refresh
//!
//! ## Error Handling
//!
//! Every call returns [`ApiError`]. Rate limiting (429) and 502 responses are
//! retried inside the client; callers never retry.

pub mod api;
pub mod auth;
pub mod client;

pub use api::{ApiError, SpotifyApi};
pub use client::SpotifyClient;
