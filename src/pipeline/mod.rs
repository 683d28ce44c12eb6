//! The run loop: one pass over the configured feeds, at most one post per
//! feed, then persist the posted set.

use crate::app::{AppContext, HeraldError, Result};
use crate::normalizer::link;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Feeds that produced a post (or would have, in dry-run).
    pub published: usize,
    /// Feeds with nothing unseen to post.
    pub skipped: usize,
    /// Feeds skipped because of a recoverable failure.
    pub errors: usize,
}

/// Execute one full run. Recoverable failures (fetch, parse, bad entry
/// links) are logged and the loop moves on; auth and publish failures abort.
/// The posted set is saved in both cases, so identifiers recorded before an
/// abort survive.
pub async fn run(ctx: &mut AppContext, dry_run: bool) -> Result<RunSummary> {
    if ctx.config.feeds.is_empty() {
        tracing::warn!("No feeds configured; nothing to do");
        return Ok(RunSummary::default());
    }

    if !dry_run {
        let (handle, password) = ctx.config.credentials()?;
        ctx.publisher.login(&handle, &password).await?;
    }

    let feeds = ctx.config.feeds.clone();
    let mut summary = RunSummary::default();
    let result = run_feeds(ctx, &feeds, dry_run, &mut summary).await;

    if !dry_run {
        ctx.store.save()?;
    }

    result.map(|_| summary)
}

async fn run_feeds(
    ctx: &mut AppContext,
    feeds: &[String],
    dry_run: bool,
    summary: &mut RunSummary,
) -> Result<()> {
    for feed_url in feeds {
        match run_feed(ctx, feed_url, dry_run).await {
            Ok(true) => summary.published += 1,
            Ok(false) => summary.skipped += 1,
            Err(e) if e.is_recoverable() => {
                tracing::warn!("Skipping feed {}: {}", feed_url, e);
                summary.errors += 1;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Scan one feed in feed order and publish its first unseen entry.
/// Returns true when a post went out.
async fn run_feed(ctx: &mut AppContext, feed_url: &str, dry_run: bool) -> Result<bool> {
    let body = ctx.fetcher.fetch(feed_url).await?;
    let (meta, articles) = ctx.normalizer.normalize(&body)?;
    let feed_title = meta.title.as_deref().unwrap_or(feed_url);

    if articles.is_empty() {
        tracing::info!("Feed {} has no entries", feed_title);
        return Ok(false);
    }

    for article in &articles {
        let id = match link::canonicalize(&article.link) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Skipping entry with bad link {:?}: {}", article.link, e);
                continue;
            }
        };

        if ctx.store.contains(&id) {
            tracing::debug!("Already posted: {}", id);
            continue;
        }

        let image = ctx.resolver.resolve(&article.link, article.display_title()).await;
        let post = ctx.composer.compose(article, &id, image);

        if dry_run {
            tracing::info!(
                "[dry-run] would post from {} with {} attachment:\n{}",
                feed_title,
                post.attachment.kind(),
                post.text
            );
            return Ok(true);
        }

        // Transport failures at the publish step are fatal like rejections:
        // retrying next entry would double-post if the call half-succeeded.
        ctx.publisher.publish(&post).await.map_err(|e| match e {
            e @ (HeraldError::Publish(_) | HeraldError::Auth(_)) => e,
            other => HeraldError::Publish(other.to_string()),
        })?;

        ctx.store.record(id.clone());
        tracing::info!(
            "Published {} from {} ({} attachment)",
            id,
            feed_title,
            post.attachment.kind()
        );
        return Ok(true);
    }

    tracing::info!("No unseen entries in {}", feed_title);
    Ok(false)
}
