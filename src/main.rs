use std::sync::Arc;

use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotfilter::{cli, config, error, types::PkceToken};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Remove tracks found in filter sources from a target playlist
    Clean(CleanOptions),

    /// List your playlists and their ids
    Playlists(PlaylistsOptions),

    /// Run the web application for a single local user
    ///
    /// Every visitor shares one cached token and one pending login, so the
    /// app acts as whoever logged in last. Do not expose it to other users.
    Serve,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CleanOptions {
    /// Link or URI of the playlist to clean; asked for when missing
    #[clap(long)]
    pub target: Option<String>,

    /// Filter playlist id or link; can be repeated
    #[clap(long = "playlist", action = ArgAction::Append, num_args = 1)]
    pub playlists: Vec<String>,

    /// Also filter by liked songs (default when no playlist is given)
    #[clap(long)]
    pub liked: bool,

    /// Only report what would be removed
    #[clap(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsOptions {
    /// Only show playlists whose name contains this text
    #[clap(long)]
    pub search: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let config = match config::Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => error!("Invalid configuration: {}", e),
    };

    match cli.command {
        Command::Auth => {
            let oauth_state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(config, oauth_state).await;
        }
        Command::Clean(opt) => {
            cli::clean(
                &config,
                cli::CleanOptions {
                    target: opt.target,
                    playlists: opt.playlists,
                    liked: opt.liked,
                    dry_run: opt.dry_run,
                },
            )
            .await
        }
        Command::Playlists(opt) => cli::playlists(&config, opt.search).await,
        Command::Serve => cli::serve(config).await,
        Command::Completions(_) => {}
    }
}
