use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One feed entry, as parsed. Immutable within a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub summary: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn new(title: String, link: String) -> Self {
        Self {
            title,
            link,
            summary: None,
            published_at: None,
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_with_title() {
        let article = Article::new("My Article".into(), "https://example.com/a".into());
        assert_eq!(article.display_title(), "My Article");
    }

    #[test]
    fn test_display_title_without_title() {
        let article = Article::new(String::new(), "https://example.com/a".into());
        assert_eq!(article.display_title(), "(Untitled)");
    }
}
