//! # API Module
//!
//! HTTP handlers for the web application and the OAuth callback. The router
//! lives in [`crate::server`].
//!
//! ## Endpoints
//!
//! - `GET /health` - [`health`], status and version
//! - `GET /login` - [`login`], starts the PKCE flow and redirects to Spotify
//! - `GET /callback` - [`callback`], exchanges the code and stores the token
//! - `GET /logout` - [`logout`], forgets the stored token
//! - `GET /playlists` - [`playlists`], the user's playlists as JSON
//! - `POST /run-filter` - [`run_filter`], runs the playlist filter
//!
//! `run-filter` takes a JSON body:
//!
//! ```json
//! {
//!   "target_playlist": "https://open.spotify.com/playlist/...",
//!   "filter_playlists": ["37i9dQZF1DX0XUsuxWHRQd"],
//!   "include_liked_songs": true
//! }
//! ```
//!
//! and answers with an HTML fragment on success or
//! `{"error_kind": ..., "message": ...}` with a 400, 401, 404 or 502 status.

mod callback;
mod filter;
mod health;
mod login;

pub use callback::callback;
pub use filter::{ErrorBody, FilterForm, playlists, report_fragment, run_filter, status_for};
pub use health::health;
pub use login::{login, logout};
