pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "herald")]
#[command(about = "Posts the first unseen article from your RSS feeds to Bluesky", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/herald/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Poll all feeds and publish at most one post per feed
    Run {
        /// Compose and log posts without publishing or recording anything
        #[arg(long)]
        dry_run: bool,
    },
    /// List already-posted article identifiers
    Posted,
    /// List configured feeds
    Feeds,
}
