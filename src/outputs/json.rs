//! JSON export of the article list.

use crate::error::Result;
use crate::models::Article;
use crate::utils::ensure_parent_dir;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Write articles to a JSON file as a pretty-printed array.
///
/// # Arguments
///
/// * `articles` - Records to write, in order
/// * `path` - Output file; replaced if it exists
///
/// # Returns
///
/// `Ok(())` on success, or an error if directory creation or the file write
/// fails.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_json(articles: &[Article], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(articles)?;
    ensure_parent_dir(path).await?;
    fs::write(path, json).await?;
    info!(rows = articles.len(), "Wrote JSON");
    Ok(())
}
