//! Data models for extracted articles and the run report.
//!
//! - [`ArticleRecord`]: one validated listing entry, in report column order
//! - [`SearchReport`]: the records of a run plus the search that produced them

use crate::config::{Category, TimeWindow};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Column headers, in the order every sink writes them.
pub const REPORT_COLUMNS: [&str; 6] = [
    "Title",
    "Date",
    "Description",
    "Picture Filename",
    "Count of Search Phrases",
    "Contains Money",
];

/// One article extracted from the results listing.
///
/// `title` and `picture_filename` are never empty. `date` is the raw
/// `datetime` attribute from the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    /// Path relative to the output directory; the file may be missing if the
    /// download failed.
    #[serde(rename = "Picture Filename")]
    pub picture_filename: PathBuf,
    #[serde(rename = "Count of Search Phrases")]
    pub search_phrase_count: usize,
    #[serde(rename = "Contains Money")]
    pub contains_money: bool,
}

/// Everything one run produced, as written to the JSON output.
#[derive(Debug, Deserialize, Serialize)]
pub struct SearchReport {
    /// RFC 3339 local timestamp of the run.
    pub generated_at: String,
    pub query: String,
    pub category: Category,
    pub time_window: TimeWindow,
    pub articles: Vec<ArticleRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ArticleRecord {
        ArticleRecord {
            title: "Budget blows out by $20 billion".to_string(),
            date: "2025-05-06T14:30:00Z".to_string(),
            description: None,
            picture_filename: PathBuf::from("news_images/budget.jpeg"),
            search_phrase_count: 1,
            contains_money: true,
        }
    }

    #[test]
    fn record_serializes_with_report_column_names() {
        let value = serde_json::to_value(record()).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        for column in REPORT_COLUMNS {
            assert!(keys.contains(&column), "missing {column}");
        }
        assert_eq!(value["Description"], serde_json::Value::Null);
        assert_eq!(value["Picture Filename"], "news_images/budget.jpeg");
    }

    #[test]
    fn report_deserializes() {
        let json = r#"{
            "generated_at": "2025-05-06T20:30:00+10:00",
            "query": "budget",
            "category": "article",
            "time_window": "week",
            "articles": []
        }"#;

        let report: SearchReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.category, Category::Article);
        assert_eq!(report.time_window, TimeWindow::Week);
        assert!(report.articles.is_empty());
    }
}
