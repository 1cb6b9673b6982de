//! # News Scraper
//!
//! Fetches a single URL, decides whether it is an RSS feed, the Hacker News
//! front page or an ordinary news page, extracts the articles it lists and
//! writes them to a CSV (or JSON) file.
//!
//! ## Usage
//!
//! ```sh
//! news_scraper --url https://news.ycombinator.com/ --output output/results.csv
//! ```
//!
//! ## Pipeline
//!
//! 1. **Classify**: pick an extraction strategy from the URL text
//! 2. **Fetch**: one HTTP GET with a fixed timeout
//! 3. **Extract**: parse the body into article records
//! 4. **Export**: write at least one row, a placeholder if nothing was found

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod fetch;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use config::Settings;
use fetch::HttpFetcher;
use models::Article;
use utils::truncate_for_display;

/// Number of records shown in the console preview.
const PREVIEW_ROWS: usize = 5;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut settings = Settings::load(args.config.as_deref()).await?;
    if args.absolute_links {
        settings.resolve_links = true;
    }

    info!(url = %args.url, "Aggregating news");
    let fetcher = HttpFetcher::new(&settings)?;
    let articles = scrapers::scrape_data(&fetcher, &args.url, &settings).await;
    info!(count = articles.len(), "Aggregated articles");

    if let Err(e) = outputs::write_articles(&articles, &args.output, args.format).await {
        error!(path = %args.output.display(), error = %e, "Failed to write output");
        return Err(e.into());
    }
    info!(path = %args.output.display(), format = ?args.format, "Saved results");

    print_preview(&articles);

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}

/// Print the first few records to stdout.
fn print_preview(articles: &[Article]) {
    println!("\nTop {} articles:", PREVIEW_ROWS.min(articles.len()));
    for (i, article) in articles.iter().take(PREVIEW_ROWS).enumerate() {
        println!(
            "{:>2}. {}\n    {}\n    {} | {}",
            i + 1,
            truncate_for_display(&article.title, 80),
            truncate_for_display(&article.link, 100),
            truncate_for_display(&article.description, 40),
            truncate_for_display(&article.published, 40),
        );
    }
}
