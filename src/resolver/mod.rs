pub mod crop;

use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use crate::app::{HeraldError, Result};
use crate::config::ImageConfig;

/// Image bytes ready to attach, already cropped and re-encoded.
#[derive(Debug, Clone)]
pub struct ResolvedImage {
    pub bytes: Vec<u8>,
    pub alt: String,
}

/// Sites block obvious bot user agents from article pages, so the page
/// fetch identifies as a browser.
const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Resolves a representative preview image for an article page.
///
/// Best-effort throughout: network failures, malformed HTML, missing meta
/// tags, and undecodable images all log a warning and yield `None`. The
/// run must never abort because a thumbnail was unavailable.
pub struct ImageResolver {
    client: Client,
    config: ImageConfig,
}

impl ImageResolver {
    pub fn new(config: ImageConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(BROWSER_UA)
            .build()?;

        Ok(Self { client, config })
    }

    pub async fn resolve(&self, article_url: &str, alt: &str) -> Option<ResolvedImage> {
        if !self.config.enabled {
            return None;
        }

        match self.try_resolve(article_url).await {
            Ok(Some(bytes)) => Some(ResolvedImage {
                bytes,
                alt: alt.to_string(),
            }),
            Ok(None) => {
                tracing::debug!("No preview image for {}", article_url);
                None
            }
            Err(e) => {
                tracing::warn!("Image resolution failed for {}: {}", article_url, e);
                None
            }
        }
    }

    async fn try_resolve(&self, article_url: &str) -> Result<Option<Vec<u8>>> {
        let base = Url::parse(article_url)?;

        let response = self.client.get(article_url).send().await?;
        response.error_for_status_ref()?;
        let html = response.text().await?;

        let image_url = match extract_preview_image(&html, &base) {
            Some(u) => u,
            None => return Ok(None),
        };

        let bytes = self.download(&image_url).await?;

        let img = image::load_from_memory(&bytes)?;
        let cropped = crop::center_crop(img, self.config.aspect_width, self.config.aspect_height);
        Ok(Some(crop::encode_jpeg(&cropped)?))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        response.error_for_status_ref()?;

        if let Some(len) = response.content_length() {
            if len as usize > self.config.max_bytes {
                return Err(HeraldError::Other(format!(
                    "image too large: {} bytes from {}",
                    len, url
                )));
            }
        }

        let bytes = response.bytes().await?;
        if bytes.len() > self.config.max_bytes {
            return Err(HeraldError::Other(format!(
                "image too large: {} bytes from {}",
                bytes.len(),
                url
            )));
        }

        Ok(bytes.to_vec())
    }
}

/// Pull the preview image URL out of page metadata: `og:image` first, then
/// `twitter:image`. Publishers set these inconsistently on `property` vs
/// `name`, so both attributes are checked. Relative URLs are joined against
/// the page URL.
pub fn extract_preview_image(html: &str, base: &Url) -> Option<String> {
    let document = Html::parse_document(html);

    for meta in ["og:image", "twitter:image"] {
        for attr in ["property", "name"] {
            let selector = Selector::parse(&format!(r#"meta[{}="{}"]"#, attr, meta)).ok()?;
            if let Some(element) = document.select(&selector).next() {
                if let Some(content) = element.value().attr("content") {
                    let content = content.trim();
                    if content.is_empty() {
                        continue;
                    }
                    if let Ok(absolute) = base.join(content) {
                        return Some(absolute.into());
                    }
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/news/story").unwrap()
    }

    #[test]
    fn test_extracts_og_image() {
        let html = r#"<html><head>
            <meta property="og:image" content="https://cdn.example.com/pic.jpg"/>
        </head><body></body></html>"#;
        assert_eq!(
            extract_preview_image(html, &base()),
            Some("https://cdn.example.com/pic.jpg".into())
        );
    }

    #[test]
    fn test_og_image_wins_over_twitter_image() {
        let html = r#"<html><head>
            <meta name="twitter:image" content="https://cdn.example.com/tw.jpg"/>
            <meta property="og:image" content="https://cdn.example.com/og.jpg"/>
        </head></html>"#;
        assert_eq!(
            extract_preview_image(html, &base()),
            Some("https://cdn.example.com/og.jpg".into())
        );
    }

    #[test]
    fn test_relative_image_joined_against_page() {
        let html = r#"<meta property="og:image" content="/img/pic.jpg">"#;
        assert_eq!(
            extract_preview_image(html, &base()),
            Some("https://example.com/img/pic.jpg".into())
        );
    }

    #[test]
    fn test_missing_tag_yields_none() {
        let html = "<html><head><title>Nothing here</title></head></html>";
        assert_eq!(extract_preview_image(html, &base()), None);
    }

    #[test]
    fn test_malformed_html_does_not_panic() {
        let html = "<<<meta property=og:image<html";
        assert_eq!(extract_preview_image(html, &base()), None);
    }
}
