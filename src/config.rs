//! Runtime settings for fetching and extraction.
//!
//! Settings come from an optional YAML file. Every key is optional; missing
//! keys keep their defaults.
//!
//! ```yaml
//! user_agent: "Mozilla/5.0 (X11; Linux x86_64)"
//! timeout_secs: 5
//! hacker_news_limit: 30
//! generic_limit: 20
//! resolve_links: true
//! ```

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

/// Browser-like header sent to HTML sources that block plain clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `User-Agent` for the Hacker News and generic HTML strategies.
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum number of Hacker News story rows.
    pub hacker_news_limit: usize,
    /// Maximum number of generic article containers.
    pub generic_limit: usize,
    /// Resolve relative HTML links against the page URL.
    pub resolve_links: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            hacker_news_limit: 30,
            generic_limit: 20,
            resolve_links: false,
        }
    }
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load settings from `path`, or the defaults when no path is given.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let yaml = tokio::fs::read_to_string(path).await?;
        let settings = Self::from_yaml(&yaml)?;
        info!(config_path = %path.display(), ?settings, "Loaded configuration");
        Ok(settings)
    }
}
