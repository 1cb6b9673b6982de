//! Export of scraped articles.
//!
//! # Submodules
//!
//! - [`delimited`]: comma-separated table with a header row (the default)
//! - [`json`]: pretty-printed JSON array of the same records
//!
//! Both writers replace any existing file and create missing parent
//! directories first.

pub mod delimited;
pub mod json;

use crate::error::Result;
use crate::models::Article;
use clap::ValueEnum;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// Write `articles` to `path` in the requested format.
///
/// # Examples
///
/// ```ignore
/// let articles = vec![Article::placeholder("https://example.com/")];
/// write_articles(&articles, Path::new("output/results.csv"), OutputFormat::Csv).await?;
/// ```
pub async fn write_articles(articles: &[Article], path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => delimited::write_csv(articles, path).await,
        OutputFormat::Json => json::write_json(articles, path).await,
    }
}
