pub mod bluesky;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::Post;

pub use bluesky::BlueskyPublisher;

/// The outbound social-network seam: authenticate once per run, then accept
/// compose requests. Mocked in pipeline tests.
#[async_trait]
pub trait Publisher {
    async fn login(&mut self, handle: &str, password: &str) -> Result<()>;
    async fn publish(&self, post: &Post) -> Result<()>;
}
