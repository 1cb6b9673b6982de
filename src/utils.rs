//! Filesystem and display helpers.

use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument};

/// Truncate a string for display.
///
/// Strings longer than `max` characters are cut at `max` characters and
/// `"…"` is appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_display("short", 100), "short");
/// assert_eq!(truncate_for_display("abcdef", 3), "abc…");
/// ```
pub fn truncate_for_display(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…", &s[..cut]),
    }
}

/// Create the parent directory of `path`, and any of its ancestors, if missing.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).await?;
            debug!(parent = %parent.display(), "Output directory ready");
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate_for_display("Hello, world!", 100), "Hello, world!");
        assert_eq!(truncate_for_display("exact", 5), "exact");
    }

    #[test]
    fn test_truncate_long_string() {
        let s = "a".repeat(500);
        assert_eq!(truncate_for_display(&s, 10), format!("{}…", "a".repeat(10)));
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate_for_display("héllo wörld", 4), "héll…");
    }

    #[tokio::test]
    async fn test_ensure_parent_dir_creates_ancestors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c/results.csv");
        ensure_parent_dir(&path).await.unwrap();
        assert!(dir.path().join("a/b/c").is_dir());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_ensure_parent_dir_bare_filename() {
        ensure_parent_dir(Path::new("results.csv")).await.unwrap();
    }
}
