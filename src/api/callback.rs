use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};

use crate::{server::AppState, spotify, success, utils, warning};

/// Completes the PKCE login: exchanges the code and stores the token.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<AppState>,
) -> Html<String> {
    if let Some(error) = params.get("error") {
        return Html(format!(
            "<h4>Error from Spotify: {}</h4>",
            utils::escape_markup(error)
        ));
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Error: No code provided in callback.</h4>".to_string());
    };

    let mut pkce = state.pkce.lock().await;
    let Some(pkce_state) = pkce.as_mut() else {
        return Html("<h4>Missing PKCE code verifier. Start again at /login.</h4>".to_string());
    };

    let token = match spotify::auth::exchange_code_pkce(&state.config, code, &pkce_state.code_verifier)
        .await
    {
        Ok(token) => token,
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            return Html("<h4>Login failed.</h4>".to_string());
        }
    };

    if let Err(e) = state.tokens.persist(&token).await {
        warning!("Failed to save token to cache: {}", e);
        return Html("<h4>Login succeeded but the token could not be saved.</h4>".to_string());
    }

    pkce_state.token = Some(token);
    success!("Authentication successful!");
    Html("<h2>Authentication successful.</h2><p>You can close this browser window.</p>".to_string())
}
