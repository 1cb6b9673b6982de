//! The article record produced by every extraction strategy.
//!
//! Every field is always populated. Values the source does not provide are
//! filled in from the [`defaults`] table at extraction time, so the rest of
//! the pipeline never deals with absent fields.

use serde::{Deserialize, Serialize};

/// Literal values substituted for data a source does not expose.
pub mod defaults {
    /// Any field the source does not carry.
    pub const NOT_AVAILABLE: &str = "N/A";
    /// Hacker News description when the score row has no score.
    pub const NO_SCORE: &str = "0 points";
    /// Hacker News published value; the listing shows no absolute date.
    pub const RECENT: &str = "Recent";
    /// Placeholder title when nothing could be extracted.
    pub const NO_ARTICLES_TITLE: &str = "No articles found";
    /// Placeholder description when nothing could be extracted.
    pub const NO_ARTICLES_DESCRIPTION: &str = "Unable to parse content from this URL";
}

/// One extracted article.
///
/// Field order matches the exported column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    /// Feed description, or the score text for Hacker News.
    pub description: String,
    /// Free-form date string, `"N/A"` or `"Recent"`.
    pub published: String,
}

impl Article {
    /// The synthetic row emitted when extraction yields nothing.
    pub fn placeholder(url: &str) -> Self {
        Self {
            title: defaults::NO_ARTICLES_TITLE.to_string(),
            link: url.to_string(),
            description: defaults::NO_ARTICLES_DESCRIPTION.to_string(),
            published: defaults::NOT_AVAILABLE.to_string(),
        }
    }

    /// Fill an optional field value from the defaults table.
    pub fn or_not_available(value: Option<String>) -> String {
        value.unwrap_or_else(|| defaults::NOT_AVAILABLE.to_string())
    }
}

/// Guarantee a non-empty result by appending the placeholder row.
pub fn ensure_placeholder(mut articles: Vec<Article>, url: &str) -> Vec<Article> {
    if articles.is_empty() {
        articles.push(Article::placeholder(url));
    }
    articles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Article {
        Article {
            title: "Rust 2024".to_string(),
            link: "https://example.com/rust".to_string(),
            description: "Edition notes".to_string(),
            published: "Mon, 06 Jan 2025 10:00:00 GMT".to_string(),
        }
    }

    #[test]
    fn test_placeholder_fields() {
        let p = Article::placeholder("https://example.com/");
        assert_eq!(p.title, "No articles found");
        assert_eq!(p.link, "https://example.com/");
        assert_eq!(p.description, "Unable to parse content from this URL");
        assert_eq!(p.published, "N/A");
    }

    #[test]
    fn test_ensure_placeholder_on_empty() {
        let out = ensure_placeholder(Vec::new(), "https://example.com/x");
        assert_eq!(out, vec![Article::placeholder("https://example.com/x")]);
    }

    #[test]
    fn test_ensure_placeholder_keeps_results() {
        let out = ensure_placeholder(vec![sample()], "https://example.com/x");
        assert_eq!(out, vec![sample()]);
    }

    #[test]
    fn test_or_not_available() {
        assert_eq!(Article::or_not_available(None), "N/A");
        assert_eq!(Article::or_not_available(Some(String::new())), "");
        assert_eq!(Article::or_not_available(Some("x".into())), "x");
    }

    #[test]
    fn test_article_serialization_field_names() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.starts_with(r#"{"title":"Rust 2024","link":"#));
        assert!(json.contains(r#""published":"Mon, 06 Jan 2025 10:00:00 GMT""#));
    }
}
