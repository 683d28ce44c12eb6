use std::time::Duration;

use crate::app::Result;
use crate::composer::Composer;
use crate::config::Config;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::normalizer::Normalizer;
use crate::publisher::{BlueskyPublisher, Publisher};
use crate::resolver::ImageResolver;
use crate::store::{JsonStore, PostedStore};

/// Wires the pipeline components together. Everything the run loop touches
/// hangs off this struct; there is no module-level state.
pub struct AppContext {
    pub config: Config,
    pub fetcher: Box<dyn Fetcher + Send + Sync>,
    pub normalizer: Normalizer,
    pub resolver: ImageResolver,
    pub composer: Composer,
    pub publisher: Box<dyn Publisher + Send + Sync>,
    pub store: Box<dyn PostedStore + Send + Sync>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.http.timeout_secs);
        let fetcher = Box::new(HttpFetcher::new(timeout)?);
        let publisher = Box::new(BlueskyPublisher::new(
            config.bluesky.service.clone(),
            timeout,
        )?);
        let store = Box::new(JsonStore::load(config.state_file_path()?)?);

        Self::with_parts(config, fetcher, publisher, store)
    }

    /// Build a context with injected fetcher/publisher/store, used by tests
    /// in place of the network-backed implementations.
    pub fn with_parts(
        config: Config,
        fetcher: Box<dyn Fetcher + Send + Sync>,
        publisher: Box<dyn Publisher + Send + Sync>,
        store: Box<dyn PostedStore + Send + Sync>,
    ) -> Result<Self> {
        let timeout = Duration::from_secs(config.http.timeout_secs);
        let resolver = ImageResolver::new(config.image.clone(), timeout)?;
        let composer = Composer::new(config.post.clone());

        Ok(Self {
            config,
            fetcher,
            normalizer: Normalizer::new(),
            resolver,
            composer,
            publisher,
            store,
        })
    }
}
