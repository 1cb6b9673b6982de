//! Extraction strategies and the scrape pipeline.
//!
//! A URL is mapped to exactly one [`Strategy`] by looking at the URL text
//! alone, before any request is made:
//!
//! | Strategy | Chosen when the URL contains | Module |
//! |----------|------------------------------|--------|
//! | RSS | `rss`, `feed` or `xml` (any case) | [`rss`] |
//! | Hacker News | `news.ycombinator.com` | [`hackernews`] |
//! | Generic | anything else | [`generic`] |
//!
//! Each strategy module exports an async `extract` that fetches through a
//! [`FetchPage`] and a pure parse function over the response body.
//!
//! [`scrape_data`] runs the chosen strategy and never fails: any transport or
//! parse error is logged and treated as an empty result, and an empty result
//! becomes a single placeholder row.

pub mod generic;
pub mod hackernews;
pub mod rss;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::fetch::FetchPage;
use crate::models::{Article, ensure_placeholder};
use scraper::ElementRef;
use std::fmt;
use tracing::{debug, info, instrument, warn};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Rss,
    HackerNews,
    Generic,
}

impl Strategy {
    /// Pick the strategy for `url`. Feed markers take priority over the
    /// Hacker News host.
    pub fn classify(url: &str) -> Self {
        let lower = url.to_lowercase();
        if ["rss", "feed", "xml"].iter().any(|marker| lower.contains(marker)) {
            Strategy::Rss
        } else if lower.contains("news.ycombinator.com") {
            Strategy::HackerNews
        } else {
            Strategy::Generic
        }
    }

    pub async fn extract(
        self,
        fetcher: &impl FetchPage,
        url: &str,
        settings: &Settings,
    ) -> Result<Vec<Article>> {
        match self {
            Strategy::Rss => rss::extract(fetcher, url).await,
            Strategy::HackerNews => hackernews::extract(fetcher, url, settings).await,
            Strategy::Generic => generic::extract(fetcher, url, settings).await,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Rss => "rss",
            Strategy::HackerNews => "hackernews",
            Strategy::Generic => "generic",
        })
    }
}

/// Scrape `url` and return at least one article.
#[instrument(level = "info", skip(fetcher, settings))]
pub async fn scrape_data(fetcher: &impl FetchPage, url: &str, settings: &Settings) -> Vec<Article> {
    let strategy = Strategy::classify(url);
    info!(%strategy, "Selected extraction strategy");

    let articles = match strategy.extract(fetcher, url, settings).await {
        Ok(articles) => articles,
        Err(Error::MalformedXml(reason)) => {
            debug!(%reason, "Body is not well-formed XML; no articles extracted");
            Vec::new()
        }
        Err(e) => {
            warn!(error = %e, "Extraction failed; no articles extracted");
            Vec::new()
        }
    };

    if articles.is_empty() {
        info!("No articles found; emitting placeholder row");
    }
    ensure_placeholder(articles, url)
}

/// Trimmed text content of an element.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Optionally resolves scraped hrefs against the page URL.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    base: Option<Url>,
}

impl LinkResolver {
    /// When `enabled` is false, or `page_url` does not parse, hrefs pass
    /// through untouched.
    pub fn new(page_url: &str, enabled: bool) -> Self {
        let base = if enabled { Url::parse(page_url).ok() } else { None };
        Self { base }
    }

    pub fn resolve(&self, href: &str) -> String {
        match &self.base {
            Some(base) if !href.is_empty() => base
                .join(href)
                .map(String::from)
                .unwrap_or_else(|_| href.to_string()),
            _ => href.to_string(),
        }
    }
}
