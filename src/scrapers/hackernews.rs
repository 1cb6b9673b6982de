//! Hacker News front page scraper.
//!
//! Each story on the listing is a `tr.athing` row holding the title link. The
//! row right after it carries the score, comments and age. Only the title, the
//! link and the score are kept; the listing shows relative ages, so every
//! story is stamped `"Recent"`.

use super::{LinkResolver, element_text};
use crate::config::Settings;
use crate::error::Result;
use crate::fetch::FetchPage;
use crate::models::{Article, defaults};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument};

static STORY_ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr.athing").unwrap());
static TITLE_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("span.titleline a").unwrap());
static SCORE: Lazy<Selector> = Lazy::new(|| Selector::parse("span.score").unwrap());

/// Fetch a Hacker News listing and scrape its stories.
///
/// The request carries the configured browser `User-Agent`.
///
/// # Arguments
///
/// * `fetcher` - Page source used for the single GET request
/// * `url` - The listing URL, usually the front page
/// * `settings` - User agent, story cap and link resolution
///
/// # Returns
///
/// Up to `settings.hacker_news_limit` stories in page order, or an error if
/// the request fails.
///
/// # Examples
///
/// ```ignore
/// let settings = Settings::default();
/// let fetcher = HttpFetcher::new(&settings)?;
/// let stories = hackernews::extract(&fetcher, "https://news.ycombinator.com/", &settings).await?;
/// ```
#[instrument(level = "info", skip(fetcher, settings))]
pub async fn extract(fetcher: &impl FetchPage, url: &str, settings: &Settings) -> Result<Vec<Article>> {
    let body = fetcher.fetch(url, Some(&settings.user_agent)).await?;
    let html = String::from_utf8_lossy(&body);
    let links = LinkResolver::new(url, settings.resolve_links);
    let articles = parse_front_page(&html, settings.hacker_news_limit, &links);
    info!(count = articles.len(), "Scraped Hacker News stories");
    Ok(articles)
}

/// Scrape up to `limit` story rows, in document order.
///
/// Rows without a title link are skipped but still count toward `limit`.
///
/// # Arguments
///
/// * `html` - The listing page
/// * `limit` - Maximum number of `tr.athing` rows to read
/// * `links` - Applied to every title `href`
///
/// # Returns
///
/// One [`Article`] per story with a title link. `description` is the score
/// (`"0 points"` when missing) and `published` is `"Recent"`.
pub fn parse_front_page(html: &str, limit: usize, links: &LinkResolver) -> Vec<Article> {
    let document = Html::parse_document(html);
    document
        .select(&STORY_ROW)
        .take(limit)
        .filter_map(|row| {
            let story = parse_story(row, links);
            if story.is_none() {
                debug!(id = ?row.value().attr("id"), "Story row has no title link; skipping");
            }
            story
        })
        .collect()
}

fn parse_story(row: ElementRef<'_>, links: &LinkResolver) -> Option<Article> {
    let title_link = row.select(&TITLE_LINK).next()?;
    let href = title_link.value().attr("href").unwrap_or_default();

    Some(Article {
        title: element_text(title_link),
        link: links.resolve(href),
        description: score(row).unwrap_or_else(|| defaults::NO_SCORE.to_string()),
        published: defaults::RECENT.to_string(),
    })
}

/// Score text from the `tr` following the story row.
fn score(row: ElementRef<'_>) -> Option<String> {
    let subtext = row
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "tr")?;
    let score = subtext.select(&SCORE).next()?;
    Some(score.text().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticFetcher;

    fn story_rows(n: usize) -> String {
        (1..=n)
            .map(|i| {
                format!(
                    r#"<tr class="athing submission" id="{i}">
  <td class="title"><span class="rank">{i}.</span></td>
  <td class="title"><span class="titleline"><a href="https://example.com/{i}">Story {i}</a><span class="sitebit comhead"> (<a href="from?site=example.com"><span class="sitestr">example.com</span></a>)</span></span></td>
</tr>
<tr><td colspan="2"></td><td class="subtext"><span class="subline"><span class="score" id="score_{i}">{} points</span> by <a href="user?id=someone">someone</a></span></td></tr>
<tr class="spacer" style="height:5px"></tr>
"#,
                    i * 10
                )
            })
            .collect()
    }

    fn page(rows: &str) -> String {
        format!(
            r#"<html><head><title>Hacker News</title></head><body><center><table id="hnmain"><tr><td><table>{rows}</table></td></tr></table></center></body></html>"#
        )
    }

    fn off() -> LinkResolver {
        LinkResolver::new("https://news.ycombinator.com/", false)
    }

    #[test]
    fn test_caps_at_limit_in_document_order() {
        let articles = parse_front_page(&page(&story_rows(45)), 30, &off());
        assert_eq!(articles.len(), 30);
        for (i, a) in articles.iter().enumerate() {
            assert_eq!(a.title, format!("Story {}", i + 1));
            assert_eq!(a.link, format!("https://example.com/{}", i + 1));
        }
        assert!(articles.iter().all(|a| a.title != "Story 31"));
    }

    #[test]
    fn test_story_fields() {
        let articles = parse_front_page(&page(&story_rows(1)), 30, &off());
        assert_eq!(
            articles,
            vec![Article {
                title: "Story 1".to_string(),
                link: "https://example.com/1".to_string(),
                description: "10 points".to_string(),
                published: "Recent".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_score_defaults() {
        let rows = r#"<tr class="athing" id="7"><td><span class="titleline"><a href="item?id=7">Ask HN: Anything?</a></span></td></tr>
<tr><td class="subtext"><span class="age">2 hours ago</span></td></tr>"#;
        let articles = parse_front_page(&page(rows), 30, &off());
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].description, "0 points");
        assert_eq!(articles[0].link, "item?id=7");
    }

    #[test]
    fn test_missing_sibling_row_defaults() {
        let rows = r#"<tr class="athing" id="8"><td><span class="titleline"><a href="https://example.com/8">Last</a></span></td></tr>"#;
        let articles = parse_front_page(&page(rows), 30, &off());
        assert_eq!(articles[0].description, "0 points");
    }

    #[test]
    fn test_row_without_title_is_skipped() {
        let rows = format!(
            r#"<tr class="athing" id="0"><td>No title here</td></tr>{}"#,
            story_rows(2)
        );
        let titles: Vec<String> = parse_front_page(&page(&rows), 30, &off())
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["Story 1", "Story 2"]);
    }

    #[test]
    fn test_skipped_rows_count_towards_limit() {
        let rows = format!(r#"<tr class="athing"><td></td></tr>{}"#, story_rows(3));
        assert_eq!(parse_front_page(&page(&rows), 3, &off()).len(), 2);
    }

    #[test]
    fn test_link_without_href_and_title_whitespace() {
        let rows = r#"<tr class="athing"><td><span class="titleline"><a>
            Spaced title
        </a></span></td></tr>"#;
        let articles = parse_front_page(&page(rows), 30, &off());
        assert_eq!(articles[0].title, "Spaced title");
        assert_eq!(articles[0].link, "");
    }

    #[test]
    fn test_resolves_relative_links_when_enabled() {
        let rows = r#"<tr class="athing"><td><span class="titleline"><a href="item?id=42">Show HN</a></span></td></tr>"#;
        let links = LinkResolver::new("https://news.ycombinator.com/", true);
        let articles = parse_front_page(&page(rows), 30, &links);
        assert_eq!(articles[0].link, "https://news.ycombinator.com/item?id=42");
    }

    #[tokio::test]
    async fn test_extract_sends_user_agent() {
        let fetcher = StaticFetcher::new(&page(&story_rows(2)));
        let settings = Settings::default();
        let articles = extract(&fetcher, "https://news.ycombinator.com/", &settings)
            .await
            .unwrap();
        assert_eq!(articles.len(), 2);
        let requests = fetcher.requests.borrow();
        assert_eq!(requests[0].1.as_deref(), Some(settings.user_agent.as_str()));
    }
}
