use axum::{
    Extension,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{server::AppState, spotify, types::PkceToken, utils, warning};

/// Starts a PKCE login and redirects the browser to Spotify.
pub async fn login(Extension(state): Extension<AppState>) -> Response {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let auth_url = match spotify::auth::authorize_url(&state.config, &code_challenge) {
        Ok(url) => url,
        Err(e) => {
            warning!("Cannot build authorize URL: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h4>Login is misconfigured.</h4>"),
            )
                .into_response();
        }
    };

    *state.pkce.lock().await = Some(PkceToken {
        code_verifier,
        token: None,
    });

    Redirect::to(&auth_url).into_response()
}

/// Forgets the stored token.
pub async fn logout(Extension(state): Extension<AppState>) -> Response {
    *state.pkce.lock().await = None;

    match state.tokens.clear().await {
        Ok(()) => Html("<h4>Logged out.</h4>").into_response(),
        Err(e) => {
            warning!("Failed to clear token cache: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h4>Logout failed.</h4>"),
            )
                .into_response()
        }
    }
}
