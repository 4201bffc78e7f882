//! Spotify Playlist Filter Library
//!
//! This library removes tracks from a target Spotify playlist when they also
//! appear in the user's liked songs or in other "filter" playlists. It ships
//! the diff engine, a Spotify Web API client, OAuth plumbing and the glue for
//! both the command-line interface and the small web application.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the web application and OAuth callback
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loading from `.env` and the environment
//! - `engine` - The playlist diff engine (collect, match, remove)
//! - `management` - Token cache and credential provider
//! - `server` - Router setup for the local HTTP server
//! - `spotify` - Spotify Web API collaborator trait and client
//! - `types` - Data structures and type definitions
//! - `utils` - Link parsing, batching, escaping and PKCE helpers
//!
//! # Example
//!
//! ```
//! use spotfilter::{config, engine::{FilterRequest, FilterSettings, PlaylistFilter}};
//!
//! #[tokio::main]
//! async fn main() -> spotfilter::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     // build a client and run the engine...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod engine;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the glue layers (CLI, config loading) where a boxed error is good
/// enough. The engine and the Spotify client return typed errors instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Scanning target playlist '{}'", name);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Removed {} songs", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for the binary and CLI glue. Library code returns errors
/// instead of calling this.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Could not resolve name of filter playlist {}", id);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
