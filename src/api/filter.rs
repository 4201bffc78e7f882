use axum::{
    Extension, Form, Json,
    extract::{FromRequest, Request},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    engine::{FilterError, FilterRequest, FilterSettings, PlaylistFilter, pager},
    management,
    server::AppState,
    spotify::{SpotifyApi, SpotifyClient},
    types::{RemovalReport, SimplifiedPlaylist},
    utils, warning,
};

#[derive(Debug, Deserialize)]
pub struct FilterForm {
    pub target_playlist: String,
    #[serde(default)]
    pub filter_playlists: Vec<String>,
    #[serde(default)]
    pub include_liked_songs: bool,
}

impl FilterForm {
    /// Builds the form from url-encoded pairs where `filter_playlists` may repeat.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = FilterForm {
            target_playlist: String::new(),
            filter_playlists: Vec::new(),
            include_liked_songs: false,
        };

        for (key, value) in pairs {
            match key.as_str() {
                "target_playlist" => form.target_playlist = value,
                "filter_playlists" => form.filter_playlists.push(value),
                "include_liked_songs" => {
                    form.include_liked_songs = matches!(value.as_str(), "on" | "true" | "1")
                }
                _ => {}
            }
        }

        form
    }
}

/// Accepts a JSON body or an html form post.
impl<S> FromRequest<S> for FilterForm
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));

        if is_json {
            let Json(form) = Json::<FilterForm>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            return Ok(form);
        }

        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        Ok(FilterForm::from_pairs(pairs))
    }
}

impl From<FilterForm> for FilterRequest {
    fn from(form: FilterForm) -> Self {
        FilterRequest {
            target_link: form.target_playlist,
            filter_playlist_ids: form.filter_playlists,
            include_liked_songs: form.include_liked_songs,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error_kind: &'static str,
    pub message: String,
}

/// Error half of every JSON endpoint.
pub struct ApiFailure(FilterError);

impl From<FilterError> for ApiFailure {
    fn from(err: FilterError) -> Self {
        ApiFailure(err)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let body = ErrorBody {
            error_kind: self.0.kind(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn status_for(err: &FilterError) -> StatusCode {
    match err {
        FilterError::InvalidTargetLink(_) => StatusCode::BAD_REQUEST,
        FilterError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
        FilterError::TargetPlaylistNotFound { .. } => StatusCode::NOT_FOUND,
        FilterError::UpstreamUnavailable(_) | FilterError::PartialRemoval { .. } => {
            StatusCode::BAD_GATEWAY
        }
    }
}

async fn authorized_client(state: &AppState) -> Result<SpotifyClient, FilterError> {
    let token = management::access_token(state.tokens.as_ref()).await?;
    Ok(SpotifyClient::new(&state.config, token))
}

/// Runs the filter for the posted form and answers with an HTML fragment.
pub async fn run_filter(
    Extension(state): Extension<AppState>,
    form: FilterForm,
) -> Result<Html<String>, ApiFailure> {
    let client = authorized_client(&state).await?;
    let request = FilterRequest::from(form);

    let report = PlaylistFilter::new(&client, FilterSettings::default())
        .run(&request)
        .await
        .inspect_err(|e| warning!("Filter run failed: {}", e))?;

    Ok(Html(report_fragment(&report)))
}

/// Renders the removal report as a small HTML fragment with escaped names.
pub fn report_fragment(report: &RemovalReport) -> String {
    let summary = utils::escape_markup(&report.to_string());
    if report.is_empty() {
        return format!("<div>{}</div>", summary);
    }

    let items: String = report
        .removed_track_names
        .iter()
        .map(|name| format!("<li>{}</li>", utils::escape_markup(name)))
        .collect();

    format!(
        "<div>{}</div><br><h4>Removed Songs:</h4><ul class='removed-song-list'>{}</ul>",
        summary, items
    )
}

#[derive(Debug, Serialize)]
pub struct PlaylistsBody {
    pub user_name: String,
    pub playlists: Vec<SimplifiedPlaylist>,
}

/// Lists the logged-in user's playlists so a client can offer them as filters.
pub async fn playlists(
    Extension(state): Extension<AppState>,
) -> Result<Json<PlaylistsBody>, ApiFailure> {
    let client = authorized_client(&state).await?;

    let user = client
        .get_current_user()
        .await
        .map_err(FilterError::UpstreamUnavailable)?;
    let playlists = pager::user_playlists(&client)
        .await
        .map_err(FilterError::UpstreamUnavailable)?;

    Ok(Json(PlaylistsBody {
        user_name: user.label().to_string(),
        playlists,
    }))
}
