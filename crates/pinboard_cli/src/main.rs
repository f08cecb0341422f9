//! Pinboard CLI
//!
//! Command-line client for the pinboard message board.
//!
//! # Commands
//!
//! - `fetch` - Print the board once
//! - `post` - Post a message, then print the refreshed board
//! - `watch` - Poll the board on a fixed interval and reprint on change

mod client;
mod term;

use clap::{Parser, Subcommand};
use client::ReqwestClient;
use pinboard_sync::{
    CommitFeed, HttpStore, MessageStore, RenderPolicy, SyncConfig, SyncController,
};
use std::time::Duration;
use term::TerminalView;
use tracing_subscriber::EnvFilter;

/// Pinboard command-line client.
#[derive(Parser)]
#[command(name = "pinboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the message store service
    #[arg(global = true, short, long, default_value = "http://localhost:8000")]
    server: String,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the board once
    Fetch {
        /// Watch a repository's commit log instead of a board (owner/repo)
        #[arg(long, value_name = "OWNER/REPO")]
        github: Option<String>,

        /// Commits per fetch when --github is used (1-100)
        #[arg(long, default_value = "30")]
        per_page: u32,
    },

    /// Post a message to the board
    Post {
        /// The message text
        message: String,
    },

    /// Poll the board and reprint it whenever it changes
    Watch {
        /// Seconds between polls
        #[arg(long, default_value = "30")]
        interval: u64,

        /// Watch a repository's commit log instead of a board (owner/repo)
        #[arg(long, value_name = "OWNER/REPO")]
        github: Option<String>,

        /// Commits per fetch when --github is used (1-100)
        #[arg(long, default_value = "30")]
        per_page: u32,

        /// Discard stale overlapping refreshes instead of letting the
        /// last completed one win
        #[arg(long)]
        latest_only: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SyncConfig::new(cli.server.clone());

    match cli.command {
        Commands::Fetch { github, per_page } => match github {
            Some(spec) => {
                let feed = commit_feed(&spec, per_page)?;
                fetch_once(config, feed)
            }
            None => {
                let store = board_store(&cli.server, &config)?;
                fetch_once(config, store)
            }
        },
        Commands::Post { message } => {
            let store = board_store(&cli.server, &config)?;
            let controller = SyncController::new(config, store, TerminalView::new());
            if !controller.submit(&message)? {
                eprintln!("nothing to post: message is empty");
            }
            Ok(())
        }
        Commands::Watch {
            interval,
            github,
            per_page,
            latest_only,
        } => {
            let policy = if latest_only {
                RenderPolicy::LastIssuedWins
            } else {
                RenderPolicy::LastCompletedWins
            };
            let config = config
                .with_poll_interval(Duration::from_secs(interval))
                .with_render_policy(policy);
            match github {
                Some(spec) => watch(config, commit_feed(&spec, per_page)?),
                None => {
                    let store = board_store(&cli.server, &config)?;
                    watch(config, store)
                }
            }
        }
    }
}

fn board_store(
    server: &str,
    config: &SyncConfig,
) -> Result<HttpStore<ReqwestClient>, Box<dyn std::error::Error>> {
    let client = ReqwestClient::new(config.timeout)?;
    Ok(HttpStore::new(server, client))
}

fn commit_feed(
    spec: &str,
    per_page: u32,
) -> Result<CommitFeed<ReqwestClient>, Box<dyn std::error::Error>> {
    let (owner, repo) = spec
        .split_once('/')
        .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty())
        .ok_or("expected --github OWNER/REPO")?;
    let client = ReqwestClient::new(Duration::from_secs(30))
        .map(|c| c.with_token(std::env::var("GITHUB_TOKEN").ok()))?;
    let feed = CommitFeed::new(owner, repo, client).with_per_page(per_page)?;
    Ok(feed)
}

fn fetch_once<S: MessageStore>(
    config: SyncConfig,
    store: S,
) -> Result<(), Box<dyn std::error::Error>> {
    let controller = SyncController::new(config, store, TerminalView::new());
    controller.refresh()?;
    Ok(())
}

fn watch<S: MessageStore>(config: SyncConfig, store: S) -> Result<(), Box<dyn std::error::Error>> {
    let controller = SyncController::new(config, store, TerminalView::new());
    // Runs until the process is interrupted.
    controller.run();
    Ok(())
}
