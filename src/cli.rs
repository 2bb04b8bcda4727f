//! Command-line interface definitions.
//!
//! Every option here overrides the matching value from the YAML config file
//! (see [`crate::config`]).

use clap::Parser;
use std::path::PathBuf;

/// Search a news site, extract the result listing and write a spreadsheet report.
///
/// # Examples
///
/// ```sh
/// # Query from config.yaml in the working directory
/// news_search_scraper
///
/// # Everything on the command line
/// news_search_scraper -q "interest rates" --category article --time week -o ./output
///
/// # Work from a saved results page
/// news_search_scraper -q budget --listing-file ./results.html --pacing-ms 0
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to a YAML config file (defaults to ./config.yaml when present)
    #[arg(short, long, env = "NEWS_SCRAPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Search phrase
    #[arg(short, long)]
    pub query: Option<String>,

    /// Category filter: default, article, audio, gallery or video
    #[arg(long)]
    pub category: Option<String>,

    /// Time filter: default, day, week, month or year
    #[arg(long)]
    pub time: Option<String>,

    /// Directory for the report and downloaded images
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Read the results listing from a saved HTML file instead of the network
    #[arg(long)]
    pub listing_file: Option<PathBuf>,

    /// Search URL template; `{query}` is replaced by the encoded search phrase
    #[arg(long)]
    pub listing_url: Option<String>,

    /// Pause between articles, in milliseconds
    #[arg(long)]
    pub pacing_ms: Option<u64>,
}
