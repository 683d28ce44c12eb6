//! Configuration management for herald.
//!
//! Configuration is read from `~/.config/herald/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is
//! created. Publishing credentials are never stored in the file; they come
//! from the `BLUESKY_HANDLE` and `BLUESKY_PASSWORD` environment variables.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use serde::Deserialize;

use crate::app::{HeraldError, Result};

pub const HANDLE_VAR: &str = "BLUESKY_HANDLE";
pub const PASSWORD_VAR: &str = "BLUESKY_PASSWORD";

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feed URLs to poll, scanned in the order given.
    pub feeds: Vec<String>,
    /// Path of the posted-identifier state file.
    /// Defaults to `~/.local/share/herald/posted.json`.
    pub state_file: Option<PathBuf>,
    pub post: PostConfig,
    pub image: ImageConfig,
    pub http: HttpConfig,
    pub bluesky: BlueskyConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PostConfig {
    /// Include the article summary below the title.
    pub include_summary: bool,
    /// Include the canonical article link as a trailing line.
    pub include_link: bool,
    /// Hashtags appended as the final line, e.g. `["#news"]`.
    pub hashtags: Vec<String>,
    /// Fallback description for the link-preview card.
    pub branding: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Attempt to resolve and attach a preview image.
    pub enabled: bool,
    /// Target crop aspect ratio, width over height.
    pub aspect_width: u32,
    pub aspect_height: u32,
    /// Refuse to download images larger than this.
    pub max_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Timeout in seconds for every HTTP call (feed, page, image, publish).
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BlueskyConfig {
    /// XRPC service endpoint.
    pub service: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feeds: Vec::new(),
            state_file: None,
            post: PostConfig::default(),
            image: ImageConfig::default(),
            http: HttpConfig::default(),
            bluesky: BlueskyConfig::default(),
        }
    }
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            include_summary: true,
            include_link: true,
            hashtags: Vec::new(),
            branding: None,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            aspect_width: 16,
            aspect_height: 9,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl Default for BlueskyConfig {
    fn default() -> Self {
        Self {
            service: "https://bsky.social".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the given path, or the default path.
    ///
    /// If the config file doesn't exist at the default path, creates a
    /// default one with comments. Missing fields use default values.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => {
                let p = Self::default_config_path()?;
                if !p.exists() {
                    Self::create_default_config(&p)?;
                    return Ok(Self::default());
                }
                p
            }
        };

        let content = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| HeraldError::Config(format!("{}: {}", config_path.display(), e)))?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/herald/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HeraldError::Config("Could not find config directory".into()))?;
        Ok(config_dir.join("herald").join("config.toml"))
    }

    /// Resolved state file path. Parent directories are created on save,
    /// not here.
    pub fn state_file_path(&self) -> Result<PathBuf> {
        if let Some(p) = &self.state_file {
            return Ok(p.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| HeraldError::Config("Could not find data directory".into()))?;
        Ok(data_dir.join("herald").join("posted.json"))
    }

    /// Read publishing credentials from the environment.
    pub fn credentials(&self) -> Result<(String, String)> {
        let handle = std::env::var(HANDLE_VAR)
            .map_err(|_| HeraldError::MissingCredentials(HANDLE_VAR))?;
        let password = std::env::var(PASSWORD_VAR)
            .map_err(|_| HeraldError::MissingCredentials(PASSWORD_VAR))?;
        Ok((handle, password))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::File::create(path)?;
        file.write_all(Self::default_config_content().as_bytes())?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Herald configuration
#
# Credentials are read from the BLUESKY_HANDLE and BLUESKY_PASSWORD
# environment variables; they do not belong in this file.

# Feeds are scanned in order; at most one article is posted per feed per run.
feeds = [
    # "http://feeds.bbci.co.uk/news/world/rss.xml",
]

# Where the posted-link state lives. Defaults to
# ~/.local/share/herald/posted.json when unset.
# state_file = "/var/lib/herald/posted.json"

[post]
include_summary = true
include_link = true
hashtags = []
# branding = "Herald News"

[image]
enabled = true
aspect_width = 16
aspect_height = 9
max_bytes = 5242880

[http]
timeout_secs = 10

[bluesky]
service = "https://bsky.social"
"##
        .to_string()
    }
}
