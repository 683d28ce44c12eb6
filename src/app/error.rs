use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeraldError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("State file error: {0}")]
    State(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Publish rejected: {0}")]
    Publish(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing credentials: {0} is not set")]
    MissingCredentials(&'static str),

    #[error("{0}")]
    Other(String),
}

impl HeraldError {
    /// Whether the run loop may skip past this failure and keep scanning.
    ///
    /// Fetch, parse, and image failures affect a single entry or feed;
    /// auth, publish, and state-persistence failures abort the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            HeraldError::Http(_)
                | HeraldError::FeedParse(_)
                | HeraldError::InvalidUrl(_)
                | HeraldError::Image(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, HeraldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_failures_are_fatal() {
        assert!(!HeraldError::Publish("rate limited".into()).is_recoverable());
        assert!(!HeraldError::Auth("bad password".into()).is_recoverable());
    }

    #[test]
    fn test_parse_failures_are_recoverable() {
        assert!(HeraldError::FeedParse("not xml".into()).is_recoverable());
        assert!(HeraldError::InvalidUrl(url::ParseError::EmptyHost).is_recoverable());
    }
}
