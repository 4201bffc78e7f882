use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    config::Config,
    spotify::{ApiError, SpotifyApi},
    types::{
        CurrentUser, Page, PlaylistMetadata, RemoveTracksRequest, SimplifiedPlaylist, TrackItem,
    },
    warning,
};

const MAX_ATTEMPTS: u32 = 5;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Spotify Web API client bound to one access token.
///
/// Retries are handled here and not in the engine: a 502 Bad Gateway is
/// retried after 10 seconds, a 429 is retried after the `Retry-After` delay
/// when that delay is at most 120 seconds. Both are bounded to
/// [`MAX_ATTEMPTS`] tries.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    access_token: String,
}

impl SpotifyClient {
    pub fn new(config: &Config, access_token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: config.api_url.clone(),
            access_token: access_token.into(),
        }
    }

    /// Appends `segments` to the API base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url =
            Url::parse(&self.api_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.api_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn(&Client) -> RequestBuilder + Send + Sync,
    {
        let mut attempt = 1;

        loop {
            let response = build(&self.http)
                .bearer_auth(&self.access_token)
                .send()
                .await?;

            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            if attempt < MAX_ATTEMPTS {
                if status == StatusCode::BAD_GATEWAY {
                    attempt += 1;
                    sleep(BAD_GATEWAY_DELAY).await;
                    continue; // retry
                }

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after = retry_after_secs(&response);
                    if retry_after <= MAX_RETRY_AFTER_SECS {
                        attempt += 1;
                        sleep(Duration::from_secs(retry_after)).await;
                        continue; // retry
                    }
                    warning!(
                        "Retry after has reached an abnormal high of {} seconds. Try again later.",
                        retry_after
                    );
                }
            }

            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&message),
            });
        }
    }

    async fn get_json<T, F>(&self, build: F) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: Fn(&Client) -> RequestBuilder + Send + Sync,
    {
        let response = self.send(build).await?;
        Ok(response.json::<T>().await?)
    }
}

fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(1)
}

/// Spotify wraps errors as `{"error": {"status": 404, "message": "..."}}`.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn get_current_user(&self) -> Result<CurrentUser, ApiError> {
        let url = self.endpoint(&["me"])?;
        self.get_json(|http| http.get(url.clone())).await
    }

    async fn page_liked_songs(&self, limit: u32, offset: u32) -> Result<Page<TrackItem>, ApiError> {
        let url = self.endpoint(&["me", "tracks"])?;
        self.get_json(|http| http.get(url.clone()).query(&[("limit", limit), ("offset", offset)]))
            .await
    }

    async fn page_playlist_items(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
        fields: &str,
    ) -> Result<Page<TrackItem>, ApiError> {
        let url = self.endpoint(&["playlists", playlist_id, "tracks"])?;
        let query = [
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
            ("fields", fields.to_string()),
        ];
        self.get_json(|http| http.get(url.clone()).query(&query)).await
    }

    async fn get_playlist_metadata(
        &self,
        playlist_id: &str,
        fields: &str,
    ) -> Result<PlaylistMetadata, ApiError> {
        let url = self.endpoint(&["playlists", playlist_id])?;
        self.get_json(|http| http.get(url.clone()).query(&[("fields", fields)]))
            .await
    }

    async fn remove_all_occurrences(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["playlists", playlist_id, "tracks"])?;
        let body = RemoveTracksRequest::from_ids(track_ids);
        self.send(|http| http.delete(url.clone()).json(&body)).await?;
        Ok(())
    }

    async fn page_user_playlists(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Page<SimplifiedPlaylist>, ApiError> {
        let url = self.endpoint(&["me", "playlists"])?;
        self.get_json(|http| http.get(url.clone()).query(&[("limit", limit), ("offset", offset)]))
            .await
    }
}
