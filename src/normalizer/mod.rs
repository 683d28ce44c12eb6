pub mod link;

use chrono::Utc;
use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{HeraldError, Result};
use crate::domain::Article;

#[derive(Debug, Clone)]
pub struct FeedMeta {
    pub title: Option<String>,
}

/// Converts RSS 0.9x/1.0/2.0, Atom, and JSON Feed documents into a uniform
/// list of [`Article`]s, preserving feed order.
#[derive(Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, body: &[u8]) -> Result<(FeedMeta, Vec<Article>)> {
        let feed = parser::parse(body).map_err(|e| HeraldError::FeedParse(e.to_string()))?;

        let meta = FeedMeta {
            title: feed
                .title
                .map(|t| decode_html_entities(&t.content).to_string()),
        };

        // Entries without a link cannot be identified or posted; drop them.
        let articles: Vec<Article> = feed
            .entries
            .into_iter()
            .filter_map(|entry| {
                let link = entry.links.first().map(|l| l.href.clone())?;
                let title = entry
                    .title
                    .map(|t| decode_html_entities(&t.content).to_string())
                    .unwrap_or_default();

                let mut article = Article::new(title, link);
                article.summary = entry
                    .summary
                    .map(|s| decode_html_entities(&s.content).trim().to_string())
                    .filter(|s| !s.is_empty());
                article.published_at = entry
                    .published
                    .or(entry.updated)
                    .map(|dt| dt.with_timezone(&Utc));

                Some(article)
            })
            .collect();

        Ok((meta, articles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Feed</title>
    <description>A test feed</description>
    <item>
      <title>Test Item 1</title>
      <link>https://example.com/item1?utm_source=rss</link>
      <guid>item-1</guid>
      <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
      <description>This is item 1</description>
    </item>
    <item>
      <title>Test Item 2</title>
      <link>https://example.com/item2</link>
      <guid>item-2</guid>
    </item>
  </channel>
</rss>"#;

    const ATOM_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Test Feed</title>
  <entry>
    <title>Atom Entry 1</title>
    <link href="https://example.com/atom1"/>
    <id>atom-entry-1</id>
    <updated>2024-01-01T00:00:00Z</updated>
    <summary>This is Atom entry 1</summary>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss() {
        let normalizer = Normalizer::new();
        let (meta, articles) = normalizer.normalize(RSS_SAMPLE.as_bytes()).unwrap();

        assert_eq!(meta.title, Some("Test Feed".into()));
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "Test Item 1");
        assert_eq!(articles[0].link, "https://example.com/item1?utm_source=rss");
        assert_eq!(articles[0].summary, Some("This is item 1".into()));
        assert!(articles[0].published_at.is_some());
        assert_eq!(articles[1].summary, None);
    }

    #[test]
    fn test_parse_atom() {
        let normalizer = Normalizer::new();
        let (meta, articles) = normalizer.normalize(ATOM_SAMPLE.as_bytes()).unwrap();

        assert_eq!(meta.title, Some("Atom Test Feed".into()));
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Atom Entry 1");
        assert_eq!(articles[0].link, "https://example.com/atom1");
    }

    #[test]
    fn test_feed_order_preserved() {
        let normalizer = Normalizer::new();
        let (_, articles) = normalizer.normalize(RSS_SAMPLE.as_bytes()).unwrap();
        assert_eq!(articles[0].title, "Test Item 1");
        assert_eq!(articles[1].title, "Test Item 2");
    }

    #[test]
    fn test_malformed_feed_is_parse_error() {
        let normalizer = Normalizer::new();
        let err = normalizer.normalize(b"not a feed").unwrap_err();
        assert!(matches!(err, HeraldError::FeedParse(_)));
    }
}
