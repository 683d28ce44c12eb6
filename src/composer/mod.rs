use crate::config::PostConfig;
use crate::domain::{Article, Attachment, Post};
use crate::resolver::ResolvedImage;

/// Platform post budget. Bluesky counts graphemes; counting chars is
/// slightly conservative for combining sequences, which is fine.
pub const MAX_POST_CHARS: usize = 300;

/// Summaries shorter than this after budgeting read like noise; drop them.
const MIN_SUMMARY_CHARS: usize = 20;

/// Builds the outgoing post: title, optional summary, trailing link and
/// hashtag lines, plus exactly one attachment. A resolved image takes
/// priority over the external-link card.
pub struct Composer {
    config: PostConfig,
}

impl Composer {
    pub fn new(config: PostConfig) -> Self {
        Self { config }
    }

    pub fn compose(
        &self,
        article: &Article,
        identifier: &str,
        image: Option<ResolvedImage>,
    ) -> Post {
        let text = self.compose_text(article, identifier);

        let attachment = match image {
            Some(img) => Attachment::Image {
                bytes: img.bytes,
                alt: img.alt,
            },
            None => Attachment::External {
                uri: identifier.to_string(),
                title: article.display_title().to_string(),
                description: article
                    .summary
                    .clone()
                    .or_else(|| self.config.branding.clone())
                    .unwrap_or_default(),
            },
        };

        Post::new(text, attachment)
    }

    fn compose_text(&self, article: &Article, identifier: &str) -> String {
        let title = article.display_title();

        let mut tail_lines = Vec::new();
        if self.config.include_link {
            tail_lines.push(identifier.to_string());
        }
        if !self.config.hashtags.is_empty() {
            tail_lines.push(self.config.hashtags.join(" "));
        }
        let tail = tail_lines.join("\n");

        // The summary is the flexible part: it absorbs whatever budget the
        // title and tail leave over, and drops out entirely when squeezed.
        let mut overhead = title.chars().count();
        if !tail.is_empty() {
            overhead += 2 + tail.chars().count();
        }

        let summary = if self.config.include_summary {
            article.summary.as_ref().and_then(|s| {
                let budget = MAX_POST_CHARS.saturating_sub(overhead + 2);
                (budget >= MIN_SUMMARY_CHARS).then(|| truncate_chars(s, budget))
            })
        } else {
            None
        };

        let mut text = title.to_string();
        if let Some(s) = summary {
            text.push_str("\n\n");
            text.push_str(&s);
        }
        if !tail.is_empty() {
            text.push_str("\n\n");
            text.push_str(&tail);
        }

        truncate_chars(&text, MAX_POST_CHARS)
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        let mut a = Article::new(
            "Quake hits capital".into(),
            "https://example.com/news/quake?utm_source=rss".into(),
        );
        a.summary = Some("A magnitude 6 earthquake struck early on Monday.".into());
        a
    }

    fn composer(config: PostConfig) -> Composer {
        Composer::new(config)
    }

    #[test]
    fn test_text_layout() {
        let post = composer(PostConfig {
            hashtags: vec!["#news".into(), "#world".into()],
            ..Default::default()
        })
        .compose(&article(), "https://example.com/news/quake", None);

        assert_eq!(
            post.text,
            "Quake hits capital\n\nA magnitude 6 earthquake struck early on Monday.\n\n\
             https://example.com/news/quake\n#news #world"
        );
    }

    #[test]
    fn test_no_image_falls_back_to_external_card() {
        let post = composer(PostConfig::default()).compose(
            &article(),
            "https://example.com/news/quake",
            None,
        );

        match post.attachment {
            Attachment::External {
                uri,
                title,
                description,
            } => {
                assert_eq!(uri, "https://example.com/news/quake");
                assert_eq!(title, "Quake hits capital");
                assert!(description.contains("magnitude 6"));
            }
            other => panic!("expected external attachment, got {}", other.kind()),
        }
    }

    #[test]
    fn test_image_takes_priority() {
        let image = ResolvedImage {
            bytes: vec![0xff, 0xd8],
            alt: "Quake hits capital".into(),
        };
        let post = composer(PostConfig::default()).compose(
            &article(),
            "https://example.com/news/quake",
            Some(image),
        );

        assert!(matches!(post.attachment, Attachment::Image { .. }));
    }

    #[test]
    fn test_external_description_uses_branding_without_summary() {
        let mut a = article();
        a.summary = None;
        let post = composer(PostConfig {
            branding: Some("Herald News".into()),
            ..Default::default()
        })
        .compose(&a, "https://example.com/news/quake", None);

        match post.attachment {
            Attachment::External { description, .. } => assert_eq!(description, "Herald News"),
            other => panic!("expected external attachment, got {}", other.kind()),
        }
    }

    #[test]
    fn test_long_summary_trimmed_to_budget() {
        let mut a = article();
        a.summary = Some("word ".repeat(200));
        let post = composer(PostConfig::default()).compose(
            &a,
            "https://example.com/news/quake",
            None,
        );

        assert!(post.text.chars().count() <= MAX_POST_CHARS);
        // The link line survives the trim untouched.
        assert!(post.text.ends_with("https://example.com/news/quake"));
    }

    #[test]
    fn test_oversized_title_still_fits_budget() {
        let a = Article::new("t".repeat(400), "https://example.com/a".into());
        let post = composer(PostConfig::default()).compose(&a, "https://example.com/a", None);
        assert!(post.text.chars().count() <= MAX_POST_CHARS);
        assert!(post.text.ends_with('…'));
    }

    #[test]
    fn test_summary_can_be_disabled() {
        let post = composer(PostConfig {
            include_summary: false,
            ..Default::default()
        })
        .compose(&article(), "https://example.com/news/quake", None);

        assert!(!post.text.contains("magnitude"));
    }
}
