use tabled::Table;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::{
    config::Config,
    engine::{FilterRequest, FilterSettings, PlaylistFilter},
    error, info,
    management::{self, TokenManager},
    spotify::{SpotifyApi, SpotifyClient},
    success,
    types::RemovedTrackRow,
};

pub struct CleanOptions {
    pub target: Option<String>,
    pub playlists: Vec<String>,
    pub liked: bool,
    pub dry_run: bool,
}

pub async fn clean(config: &Config, opts: CleanOptions) {
    let token_mgr = TokenManager::new(config.clone());
    let token = match management::access_token(&token_mgr).await {
        Ok(token) => token,
        Err(e) => error!("{}. Please run spotfilter auth", e),
    };
    let client = SpotifyClient::new(config, token);

    match client.get_current_user().await {
        Ok(user) => success!("Authenticated as {}", user.label()),
        Err(e) => error!("Could not fetch your Spotify profile: {}", e),
    }

    let target_link = match opts.target {
        Some(link) => link,
        None => match prompt("Paste the Spotify playlist link (URL) and press Enter:").await {
            Ok(link) => link,
            Err(e) => error!("Failed to read playlist link: {}", e),
        },
    };

    // the one-shot script filtered liked songs, keep that as the default
    let include_liked_songs = opts.liked || opts.playlists.is_empty();

    let request = FilterRequest {
        target_link,
        filter_playlist_ids: opts.playlists,
        include_liked_songs,
    };
    let settings = FilterSettings {
        dry_run: opts.dry_run,
        ..FilterSettings::default()
    };

    let report = match PlaylistFilter::new(&client, settings).run(&request).await {
        Ok(report) => report,
        Err(e) => error!("{}", e),
    };

    if report.is_empty() {
        success!("{}", report);
        return;
    }

    let rows: Vec<RemovedTrackRow> = report
        .removed_track_names
        .iter()
        .enumerate()
        .map(|(i, name)| RemovedTrackRow {
            position: i + 1,
            name: name.clone(),
        })
        .collect();

    println!("{}", Table::new(rows));
    if report.dry_run {
        info!("{}", report);
    } else {
        success!("{}", report);
    }
}

async fn prompt(message: &str) -> std::io::Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(format!("{}\n", message).as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(line.trim().to_string())
}
