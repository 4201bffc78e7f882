//! # CLI Module
//!
//! User-facing commands. Each one loads credentials, builds a
//! [`SpotifyClient`](crate::spotify::SpotifyClient) and hands off to the
//! engine or the server, reporting with the colored output macros.
//!
//! ## Commands
//!
//! - [`auth`] - PKCE login through the local callback server
//! - [`clean`] - remove filter tracks from a target playlist
//! - [`playlists`] - list the user's playlists with their ids
//! - [`serve`] - run the web application
//!
//! ## Usage
//!
//! ```bash
//! spotfilter auth
//! spotfilter playlists --search road
//! spotfilter clean --target https://open.spotify.com/playlist/... --liked
//! spotfilter clean --target spotify:playlist:... --playlist 37i9dQZF1DX0XUsuxWHRQd --dry-run
//! spotfilter serve
//! ```
//!
//! Errors end the process through [`error!`](crate::error) with a message
//! pointing at the fix, e.g. running `spotfilter auth` again.

mod auth;
mod clean;
mod playlists;
mod serve;

pub use auth::auth;
pub use clean::CleanOptions;
pub use clean::clean;
pub use playlists::playlists;
pub use serve::serve;
