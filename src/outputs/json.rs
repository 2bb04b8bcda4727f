//! JSON output of a run.
//!
//! The file holds the search that was run and every extracted record, keyed
//! by the same column names as the spreadsheet.

use crate::config::SearchFilterSelection;
use crate::error::SinkWriteError;
use crate::models::{ArticleRecord, SearchReport};
use crate::outputs::ensure_parent;
use chrono::Local;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Assemble a [`SearchReport`] stamped with the current local time.
pub fn build_report(
    query: &str,
    filters: &SearchFilterSelection,
    articles: Vec<ArticleRecord>,
) -> SearchReport {
    SearchReport {
        generated_at: Local::now().to_rfc3339(),
        query: query.to_string(),
        category: filters.category,
        time_window: filters.time_window,
        articles,
    }
}

/// Serialize `report` to `path` as pretty-printed JSON.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_report(report: &SearchReport, path: &Path) -> Result<(), SinkWriteError> {
    let json = serde_json::to_string_pretty(report)?;

    ensure_parent(path).await?;
    fs::write(path, json)
        .await
        .map_err(|source| SinkWriteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    info!(articles = report.articles.len(), "Wrote JSON report");

    Ok(())
}
