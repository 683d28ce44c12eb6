use crate::app::{AppContext, Result};
use crate::config::Config;
use crate::pipeline;
use crate::store::{JsonStore, PostedStore};

pub async fn run(config: Config, dry_run: bool) -> Result<()> {
    let mut ctx = AppContext::new(config)?;
    let summary = pipeline::run(&mut ctx, dry_run).await?;

    println!(
        "Run complete: {} posted, {} feeds with nothing new, {} errors",
        summary.published, summary.skipped, summary.errors
    );
    Ok(())
}

pub fn list_posted(config: &Config) -> Result<()> {
    let store = JsonStore::load(config.state_file_path()?)?;
    let ids = store.identifiers();

    if ids.is_empty() {
        println!("Nothing posted yet");
        return Ok(());
    }

    for id in ids {
        println!("{}", id);
    }
    Ok(())
}

pub fn list_feeds(config: &Config) -> Result<()> {
    if config.feeds.is_empty() {
        println!("No feeds configured");
        return Ok(());
    }

    for url in &config.feeds {
        println!("{}", url);
    }
    Ok(())
}
