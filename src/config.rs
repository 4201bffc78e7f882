//! Configuration management for the playlist filter.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the local data directory. They are read once into a [`Config`]
//! value which is then handed to the Spotify client, the token manager and
//! the web server state.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_SCOPE: &str = "user-library-read playlist-read-private playlist-read-collaborative playlist-modify-private playlist-modify-public";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The directory is created when missing so users know where to put the
/// file. A missing `.env` file is not an error: variables may also come from
/// the real environment.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotfilter/.env`
/// - macOS: `~/Library/Application Support/spotfilter/.env`
/// - Windows: `%LOCALAPPDATA%/spotfilter/.env`
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotfilter/.env");
    path
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the local HTTP server binds to, e.g. `127.0.0.1:8888`.
    pub server_addr: String,
    pub client_id: String,
    /// Must match the redirect URI registered with the Spotify application.
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// `SPOTIFY_API_AUTH_CLIENT_ID` and `SPOTIFY_API_REDIRECT_URI` are
    /// required, everything else falls back to Spotify's public endpoints.
    /// Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| get(key).ok_or_else(|| format!("{} must be set", key));
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server_addr: or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            client_id: require("SPOTIFY_API_AUTH_CLIENT_ID")?,
            redirect_uri: require("SPOTIFY_API_REDIRECT_URI")?,
            scope: or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            auth_url: or_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: or_default("SPOTIFY_API_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
        })
    }
}
