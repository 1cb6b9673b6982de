//! Command-line interface definitions.
//!
//! Every option has a default, so running the binary with no arguments
//! scrapes the Hacker News front page into `output/results.csv`.

use crate::outputs::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Fetch an RSS feed or news page and export its articles.
///
/// # Examples
///
/// ```sh
/// # Hacker News front page to output/results.csv
/// news_scraper
///
/// # An RSS feed to a custom path
/// news_scraper --url https://example.com/feed.xml --output feeds/example.csv
///
/// # JSON output with absolute links
/// news_scraper -u https://blog.example.com/ -f json -o out/blog.json --absolute-links
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Target URL (RSS feed or news site)
    #[arg(short, long, env = "NEWS_SCRAPER_URL", default_value = "https://news.ycombinator.com/")]
    pub url: String,

    /// Output file path
    #[arg(short, long, default_value = "output/results.csv")]
    pub output: PathBuf,

    /// Output file format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Optional path to a YAML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Resolve relative article links against the page URL
    #[arg(long)]
    pub absolute_links: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["news_scraper"]);
        // NEWS_SCRAPER_URL may be set in the environment running the tests.
        if std::env::var_os("NEWS_SCRAPER_URL").is_none() {
            assert_eq!(cli.url, "https://news.ycombinator.com/");
        }
        assert_eq!(cli.output, PathBuf::from("output/results.csv"));
        assert_eq!(cli.format, OutputFormat::Csv);
        assert!(cli.config.is_none());
        assert!(!cli.absolute_links);
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::parse_from([
            "news_scraper",
            "--url",
            "https://example.com/feed.xml",
            "--output",
            "/tmp/feed.json",
            "--format",
            "json",
            "--config",
            "settings.yaml",
            "--absolute-links",
        ]);
        assert_eq!(cli.url, "https://example.com/feed.xml");
        assert_eq!(cli.output, PathBuf::from("/tmp/feed.json"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("settings.yaml")));
        assert!(cli.absolute_links);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["news_scraper", "-u", "https://blog.example.com/", "-o", "out.csv", "-f", "csv"]);
        assert_eq!(cli.url, "https://blog.example.com/");
        assert_eq!(cli.output, PathBuf::from("out.csv"));
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["news_scraper", "--format", "xlsx"]).is_err());
    }
}
