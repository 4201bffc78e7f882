use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::Config,
    engine::pager,
    error,
    management::{self, TokenManager},
    spotify::SpotifyClient,
    types::PlaylistTableRow,
    warning,
};

pub async fn playlists(config: &Config, search: Option<String>) {
    let token_mgr = TokenManager::new(config.clone());
    let token = match management::access_token(&token_mgr).await {
        Ok(token) => token,
        Err(e) => error!("{}. Please run spotfilter auth", e),
    };
    let client = SpotifyClient::new(config, token);

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching your playlists...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let mut playlists = match pager::user_playlists(&client).await {
        Ok(playlists) => playlists,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch playlists: {}", e);
        }
    };
    pb.finish_and_clear();

    playlists.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    if let Some(search) = search {
        let search_term = search.to_lowercase();
        playlists.retain(|p| p.name.to_lowercase().contains(&search_term));
    }

    if playlists.is_empty() {
        warning!("No playlists found.");
        return;
    }

    let rows: Vec<PlaylistTableRow> = playlists
        .into_iter()
        .map(|p| PlaylistTableRow {
            tracks: p.total_tracks(),
            id: p.id,
            name: p.name,
        })
        .collect();

    println!("{}", Table::new(rows));
}
