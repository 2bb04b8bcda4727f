//! Run configuration: YAML file plus command-line overrides.
//!
//! Every section has defaults, so a file holding only `search.query` is a
//! complete configuration.
//!
//! ```yaml
//! search:
//!   query: interest rates
//! filters:
//!   category: article
//!   time: week
//! output:
//!   directory: output
//! pipeline:
//!   pacing_ms: 1000
//! ```

use crate::cli::Cli;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub filters: SearchFilterSelection,
    pub output: OutputConfig,
    pub listing: ListingConfig,
    pub pipeline: PipelineConfig,
    pub selectors: SelectorConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub query: String,
}

/// Refine-panel choices on the search results page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchFilterSelection {
    pub category: Category,
    #[serde(rename = "time")]
    pub time_window: TimeWindow,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum Category {
    #[default]
    Default,
    Article,
    Audio,
    Gallery,
    Video,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Default => "default",
            Category::Article => "article",
            Category::Audio => "audio",
            Category::Gallery => "gallery",
            Category::Video => "video",
        }
    }

    /// XPath of the matching label in the category facet.
    pub fn facet_xpath(self) -> &'static str {
        match self {
            Category::Default => r#"//*[@id="custom-facet-0"]/div/div[2]/div/ul/li[1]/label"#,
            Category::Article => r#"//*[@id="custom-facet-0"]/div/div[2]/div/ul/li[2]/label"#,
            Category::Audio => r#"//*[@id="custom-facet-0"]/div/div[2]/div/ul/li[3]/label"#,
            Category::Gallery => r#"//*[@id="custom-facet-0"]/div/div[2]/div/ul/li[4]/label"#,
            Category::Video => r#"//*[@id="custom-facet-0"]/div/div[2]/div/ul/li[5]/label"#,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "default" | "" => Category::Default,
            "article" => Category::Article,
            "audio" => Category::Audio,
            "gallery" => Category::Gallery,
            "video" => Category::Video,
            other => {
                warn!(value = other, "Unknown category filter; using default");
                Category::Default
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    Default,
    Day,
    Week,
    Month,
    Year,
}

impl TimeWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::Default => "default",
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
        }
    }

    /// XPath of the matching label in the time facet.
    pub fn facet_xpath(self) -> &'static str {
        match self {
            TimeWindow::Default => r#"//*[@id="custom-facet-1"]/div/div[2]/div/ul/li[1]/label"#,
            TimeWindow::Day => r#"//*[@id="custom-facet-1"]/div/div[2]/div/ul/li[2]/label"#,
            TimeWindow::Week => r#"//*[@id="custom-facet-1"]/div/div[2]/div/ul/li[3]/label"#,
            TimeWindow::Month => r#"//*[@id="custom-facet-1"]/div/div[2]/div/ul/li[4]/label"#,
            TimeWindow::Year => r#"//*[@id="custom-facet-1"]/div/div[2]/div/ul/li[5]/label"#,
        }
    }
}

impl From<String> for TimeWindow {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "default" | "" => TimeWindow::Default,
            "day" => TimeWindow::Day,
            "week" => TimeWindow::Week,
            "month" => TimeWindow::Month,
            "year" => TimeWindow::Year,
            other => {
                warn!(value = other, "Unknown time filter; using default");
                TimeWindow::Default
            }
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// Image directory, relative to `directory`. Recorded as-is in the report.
    pub images_subdir: PathBuf,
    pub report_filename: String,
    pub json_filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            images_subdir: PathBuf::from("news_images"),
            report_filename: "news_data.xlsx".to_string(),
            json_filename: "news_data.json".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn report_path(&self) -> PathBuf {
        self.directory.join(&self.report_filename)
    }

    pub fn json_path(&self) -> PathBuf {
        self.directory.join(&self.json_filename)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Search URL; `{query}` is replaced by the URL-encoded query.
    pub url_template: String,
    /// Pre-rendered results page. Takes precedence over `url_template`.
    pub file: Option<PathBuf>,
    /// Base for resolving relative image URLs.
    pub base_url: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            url_template: "https://www.news.com.au/search-results?q={query}".to_string(),
            file: None,
            base_url: "https://www.news.com.au/".to_string(),
        }
    }
}

impl ListingConfig {
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidUrl {
            url: self.base_url.clone(),
            source,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub pacing_ms: u64,
    pub image_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pacing_ms: 1000,
            image_timeout_secs: 30,
        }
    }
}

impl PipelineConfig {
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }
}

/// CSS selectors, parsed into [`ArticleLocators`](crate::scrapers::ArticleLocators) at start-up.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub article: String,
    pub title: String,
    pub datetime: String,
    pub standfirst: String,
    pub image: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            article: ".storyblock".to_string(),
            title: ".storyblock_title".to_string(),
            datetime: ".storyblock_datetime".to_string(),
            standfirst: ".storyblock_standfirst".to_string(),
            image: ".responsive-img_img".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Resolve the configuration for a run: file (explicit, or
    /// [`DEFAULT_CONFIG_FILE`] when present), then CLI overrides, then checks.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => {
                info!("No config file found; using defaults");
                Self::default()
            }
        };
        config.apply_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(query) = &cli.query {
            self.search.query = query.clone();
        }
        if let Some(category) = &cli.category {
            self.filters.category = Category::from(category.clone());
        }
        if let Some(time) = &cli.time {
            self.filters.time_window = TimeWindow::from(time.clone());
        }
        if let Some(dir) = &cli.output_dir {
            self.output.directory = dir.clone();
        }
        if let Some(file) = &cli.listing_file {
            self.listing.file = Some(file.clone());
        }
        if let Some(url) = &cli.listing_url {
            self.listing.url_template = url.clone();
        }
        if let Some(pacing_ms) = cli.pacing_ms {
            self.pipeline.pacing_ms = pacing_ms;
        }
    }

    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.search.query = self.search.query.trim().to_string();
        if self.search.query.is_empty() {
            return Err(ConfigError::MissingQuery);
        }
        self.listing.base_url()?;
        Ok(())
    }
}
