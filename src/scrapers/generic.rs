//! Heuristic scraper for arbitrary news pages.
//!
//! Looks for article-like containers and takes the first heading or link in
//! each as the title. No description or date is extracted.

use super::{LinkResolver, element_text};
use crate::config::Settings;
use crate::error::Result;
use crate::fetch::FetchPage;
use crate::models::{Article, defaults};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument};

static CONTAINER: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article, .article, .story, .post").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h1, h2, h3, a[href]").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Fetch an arbitrary news page and scrape its article containers.
///
/// # Arguments
///
/// * `fetcher` - Page source used for the single GET request
/// * `url` - The page URL
/// * `settings` - User agent, container cap and link resolution
///
/// # Returns
///
/// Up to `settings.generic_limit` articles in page order, or an error if the
/// request fails.
///
/// # Examples
///
/// ```ignore
/// let settings = Settings::default();
/// let fetcher = HttpFetcher::new(&settings)?;
/// let articles = generic::extract(&fetcher, "https://blog.example.com/", &settings).await?;
/// ```
#[instrument(level = "info", skip(fetcher, settings))]
pub async fn extract(fetcher: &impl FetchPage, url: &str, settings: &Settings) -> Result<Vec<Article>> {
    let body = fetcher.fetch(url, Some(&settings.user_agent)).await?;
    let html = String::from_utf8_lossy(&body);
    let links = LinkResolver::new(url, settings.resolve_links);
    let articles = parse_page(&html, settings.generic_limit, &links);
    info!(count = articles.len(), "Scraped generic article containers");
    Ok(articles)
}

/// Scrape up to `limit` containers in document order.
///
/// The title comes from whichever of `h1`, `h2`, `h3` or `a[href]` appears
/// first inside the container. Containers with none of them are skipped.
///
/// # Arguments
///
/// * `html` - The page body
/// * `limit` - Maximum number of containers to read
/// * `links` - Applied to the first `href` in each container
///
/// # Returns
///
/// Articles with `description` and `published` set to `"N/A"`; `link` is
/// empty when the container has no link.
pub fn parse_page(html: &str, limit: usize, links: &LinkResolver) -> Vec<Article> {
    let document = Html::parse_document(html);
    document
        .select(&CONTAINER)
        .take(limit)
        .filter_map(|container| {
            let article = parse_container(container, links);
            if article.is_none() {
                debug!(element = container.value().name(), "Container has no title; skipping");
            }
            article
        })
        .collect()
}

fn parse_container(container: ElementRef<'_>, links: &LinkResolver) -> Option<Article> {
    let title = container.select(&TITLE).next()?;
    let link = container
        .select(&LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| links.resolve(href))
        .unwrap_or_default();

    Some(Article {
        title: element_text(title),
        link,
        description: defaults::NOT_AVAILABLE.to_string(),
        published: defaults::NOT_AVAILABLE.to_string(),
    })
}
