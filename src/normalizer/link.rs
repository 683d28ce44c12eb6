use url::Url;

use crate::app::Result;

/// Canonical dedup identifier for an article link: scheme + host + path,
/// with query and fragment dropped. RSS feeds routinely inject tracking
/// parameters (`utm_*`, `at_medium`, ...) that vary between fetches of the
/// same article; stripping the whole query keeps the identifier stable.
///
/// Idempotent: canonicalizing a canonical link is a no-op.
pub fn canonicalize(link: &str) -> Result<String> {
    let mut url = Url::parse(link)?;
    url.set_query(None);
    url.set_fragment(None);
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_query_and_fragment() {
        assert_eq!(
            canonicalize("https://x/a?utm=1#f").unwrap(),
            "https://x/a"
        );
    }

    #[test]
    fn test_idempotent() {
        let once = canonicalize("https://example.com/news/item?at_medium=RSS&at_campaign=rss").unwrap();
        let twice = canonicalize(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_plain_link_unchanged() {
        assert_eq!(
            canonicalize("https://example.com/news/item").unwrap(),
            "https://example.com/news/item"
        );
    }

    #[test]
    fn test_rejects_relative_link() {
        assert!(canonicalize("/news/item").is_err());
    }
}
