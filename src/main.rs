//! # News Search Scraper
//!
//! Runs a search on a news site, extracts every article in the results
//! listing, downloads each lead image and writes a spreadsheet report.
//!
//! ## Usage
//!
//! ```sh
//! news_search_scraper -q "interest rates" --category article --time week
//! ```
//!
//! ## Architecture
//!
//! 1. **Listing**: load the results page (saved file or HTTP) and select the
//!    article elements
//! 2. **Extraction**: read title, date, description and image from each
//!    element, one at a time, skipping entries that lack required fields
//! 3. **Classification**: count query occurrences and flag dollar amounts
//! 4. **Output**: write the spreadsheet and JSON reports

use clap::Parser;
use reqwest::Client;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod classify;
mod cli;
mod config;
mod error;
mod extractor;
mod images;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::AppConfig;
use extractor::{ArticleExtractor, ImageSettings};
use images::HttpImageFetcher;
use pipeline::{CancelFlag, PipelineOptions};
use scrapers::ArticleLocators;
use scrapers::newscomau::{self, FilterPlan, SearchResultsPage};
use utils::ensure_writable_dir;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[tokio::main]
#[instrument]
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
    info!("news_search_scraper starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = AppConfig::load(&args)?;
    let locators = ArticleLocators::from_config(&config.selectors)?;
    let base_url = config.listing.base_url()?;
    info!(
        query = %config.search.query,
        category = %config.filters.category,
        time = %config.filters.time_window,
        output = %config.output.directory.display(),
        "Loaded configuration"
    );

    if let Err(e) = ensure_writable_dir(&config.output.directory).await {
        error!(
            path = %config.output.directory.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    let cancel = CancelFlag::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received; finishing current article");
                cancel.cancel();
            }
        });
    }

    let client = Client::builder().user_agent(USER_AGENT).build()?;

    // ---- Listing ----
    let plan = FilterPlan::for_selection(&config.filters);
    info!(
        refine_tab = plan.refine_tab,
        category = plan.category,
        time_window = plan.time_window,
        "Refine-panel selection for this search"
    );

    let html = newscomau::load_listing(&client, &config.listing, &config.search.query).await?;
    let page = SearchResultsPage::parse(&html);
    let elements = page.articles(&locators.article);
    info!(count = elements.len(), selector = locators.article.css(), "Found article elements");

    // ---- Extraction ----
    let extractor = ArticleExtractor::new(
        locators,
        HttpImageFetcher::new(client.clone()),
        ImageSettings {
            output_dir: config.output.directory.clone(),
            images_subdir: config.output.images_subdir.clone(),
            base_url: Some(base_url),
            timeout: config.pipeline.image_timeout(),
        },
    );
    let options = PipelineOptions {
        pacing: config.pipeline.pacing(),
        cancel,
    };
    let records = pipeline::run(&elements, &extractor, &config.search.query, &options).await;

    // ---- Output ----
    let report_path = config.output.report_path();
    if let Err(e) = outputs::xlsx::write_report(&records, &report_path).await {
        error!(path = %report_path.display(), error = %e, "Failed to write spreadsheet");
        return Err(e.into());
    }
    info!(path = %report_path.display(), rows = records.len(), "Data saved");

    let json_path = config.output.json_path();
    let report = outputs::json::build_report(&config.search.query, &config.filters, records);
    if let Err(e) = outputs::json::write_report(&report, &json_path).await {
        error!(path = %json_path.display(), error = %e, "Failed to write JSON report");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        articles = report.articles.len(),
        "Execution complete"
    );

    Ok(())
}
