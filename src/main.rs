use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use herald::cli::{commands, Cli, Commands};
use herald::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config)?;

    match cli.command {
        Commands::Run { dry_run } => {
            commands::run(config, dry_run).await?;
        }
        Commands::Posted => {
            commands::list_posted(&config)?;
        }
        Commands::Feeds => {
            commands::list_feeds(&config)?;
        }
    }

    Ok(())
}
