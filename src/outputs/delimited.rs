//! CSV export.
//!
//! Columns are `title,link,description,published`, in that order, with a
//! header row and no index column. Fields are quoted only when they contain a
//! delimiter, a quote or a line break.

use crate::error::{Error, Result};
use crate::models::Article;
use crate::utils::ensure_parent_dir;
use csv::{Terminator, WriterBuilder};
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Serialize articles to CSV bytes, header row included.
///
/// # Examples
///
/// ```ignore
/// let bytes = to_csv(&[Article::placeholder("https://example.com/")])?;
/// assert!(bytes.starts_with(b"title,link,description,published\n"));
/// ```
pub fn to_csv(articles: &[Article]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for article in articles {
        writer.serialize(article)?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))
}

/// Write articles to a CSV file.
///
/// # Arguments
///
/// * `articles` - Records to write, in order
/// * `path` - Output file; replaced if it exists
///
/// # Returns
///
/// `Ok(())` on success, or an error if serialization, directory creation or
/// the file write fails.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_csv(articles: &[Article], path: &Path) -> Result<()> {
    let bytes = to_csv(articles)?;
    ensure_parent_dir(path).await?;
    fs::write(path, bytes).await?;
    info!(rows = articles.len(), "Wrote CSV");
    Ok(())
}
