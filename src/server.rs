use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{api, config::Config, management::TokenManager, types::PkceToken};

/// Shared state handed to every handler.
///
/// There is one token cache and one pending login for the whole process, so
/// the web app serves a single local user.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Verifier of the login in flight, plus the token once the callback ran.
    pub pkce: Arc<Mutex<Option<PkceToken>>>,
    pub tokens: Arc<TokenManager>,
}

impl AppState {
    pub fn new(config: Arc<Config>, pkce: Arc<Mutex<Option<PkceToken>>>) -> Self {
        let tokens = Arc::new(TokenManager::new(config.as_ref().clone()));
        Self {
            config,
            pkce,
            tokens,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/logout", get(api::logout))
        .route("/playlists", get(api::playlists))
        .route("/run-filter", post(api::run_filter))
        .layer(Extension(state))
}

/// Binds to the configured address and serves until the process stops.
pub async fn start_api_server(
    config: Arc<Config>,
    pkce: Arc<Mutex<Option<PkceToken>>>,
) -> Result<(), String> {
    let addr = SocketAddr::from_str(&config.server_addr)
        .map_err(|e| format!("Failed to parse server address {}: {}", config.server_addr, e))?;

    let app = router(AppState::new(config, pkce));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", addr, e))?;
    axum::serve(listener, app).await.map_err(|e| e.to_string())
}
