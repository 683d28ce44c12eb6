//! # Herald
//!
//! A single-shot RSS-to-Bluesky bot: poll feeds, post the first unseen
//! article from each, remember what was posted.
//!
//! ## Architecture
//!
//! Herald runs one linear pipeline per invocation (scheduling is cron's
//! job, not Herald's):
//!
//! ```text
//! Fetcher → Normalizer → PostedStore filter → ImageResolver → Composer → Publisher
//! ```
//!
//! Per feed, entries are scanned in feed order; the first one whose
//! canonical link is not in the posted set gets an optional preview image,
//! a composed post, and one `createRecord` call. At most one post per feed
//! per run. The posted set is written back wholesale at the end.
//!
//! ## Modules
//!
//! - [`app`]: [`AppContext`](app::AppContext) wiring and error types
//! - [`cli`]: clap command definitions (`run`, `posted`, `feeds`)
//! - [`config`]: TOML configuration and env-var credentials
//! - [`domain`]: core models ([`Article`](domain::Article),
//!   [`Post`](domain::Post), [`Attachment`](domain::Attachment))
//! - [`fetcher`]: HTTP feed retrieval behind the [`Fetcher`](fetcher::Fetcher) trait
//! - [`normalizer`]: RSS/Atom parsing and link canonicalization
//! - [`store`]: the posted-identifier set, persisted as a flat JSON file
//! - [`resolver`]: best-effort `og:image` resolution with center-crop
//! - [`composer`]: post text assembly and attachment selection
//! - [`publisher`]: AT Protocol client behind the
//!   [`Publisher`](publisher::Publisher) trait
//! - [`pipeline`]: the run loop tying it all together

pub mod app;
pub mod cli;
pub mod composer;
pub mod config;
pub mod domain;
pub mod fetcher;
pub mod normalizer;
pub mod pipeline;
pub mod publisher;
pub mod resolver;
pub mod store;
