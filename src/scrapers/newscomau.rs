//! news.com.au search results.
//!
//! The results page is built client-side, so a plain GET only yields articles
//! when something upstream has rendered it. The usual route is to save the
//! rendered page and pass it with `--listing-file`. [`FilterPlan`] records the
//! refine-panel clicks that produce a filtered page.

use crate::config::{ListingConfig, SearchFilterSelection};
use crate::error::DriverError;
use crate::scrapers::Locator;
use reqwest::Client;
use scraper::{ElementRef, Html};
use std::path::Path;
use tracing::{info, instrument};
use url::Url;

/// The "Refine" toggle on the results page.
pub const REFINE_TAB_XPATH: &str = r#"//*[@id="refine"]"#;

/// The refine-panel labels to click, in order, for a filter selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPlan {
    pub refine_tab: &'static str,
    pub category: &'static str,
    pub time_window: &'static str,
}

impl FilterPlan {
    pub fn for_selection(selection: &SearchFilterSelection) -> Self {
        Self {
            refine_tab: REFINE_TAB_XPATH,
            category: selection.category.facet_xpath(),
            time_window: selection.time_window.facet_xpath(),
        }
    }
}

/// Build the search URL, substituting the encoded query for `{query}`.
pub fn search_url(template: &str, query: &str) -> Result<Url, DriverError> {
    let encoded = urlencoding::encode(query);
    Ok(Url::parse(&template.replace("{query}", &encoded))?)
}

/// A parsed results page.
pub struct SearchResultsPage {
    document: Html,
}

impl SearchResultsPage {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Every listing entry matching `locator`, in document order.
    pub fn articles(&self, locator: &Locator) -> Vec<ElementRef<'_>> {
        self.document.select(locator.selector()).collect()
    }
}

/// Load the results listing from `listing.file` if set, otherwise over HTTP.
#[instrument(level = "info", skip_all, fields(%query))]
pub async fn load_listing(
    client: &Client,
    listing: &ListingConfig,
    query: &str,
) -> Result<String, DriverError> {
    match &listing.file {
        Some(path) => read_listing_file(path).await,
        None => {
            let url = search_url(&listing.url_template, query)?;
            let html = client
                .get(url.clone())
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;
            info!(%url, bytes = html.len(), "Fetched search results");
            Ok(html)
        }
    }
}

async fn read_listing_file(path: &Path) -> Result<String, DriverError> {
    let html = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DriverError::ReadListing {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), bytes = html.len(), "Read saved search results");
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Category, TimeWindow};

    #[test]
    fn search_url_encodes_query() {
        let url = search_url("https://www.news.com.au/search-results?q={query}", "rates & tax").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.news.com.au/search-results?q=rates%20%26%20tax"
        );
    }

    #[test]
    fn search_url_rejects_bad_template() {
        assert!(matches!(
            search_url("not a url {query}", "x"),
            Err(DriverError::InvalidUrl(_))
        ));
    }

    #[test]
    fn filter_plan_follows_selection() {
        let plan = FilterPlan::for_selection(&SearchFilterSelection {
            category: Category::Gallery,
            time_window: TimeWindow::Week,
        });
        assert_eq!(plan.refine_tab, REFINE_TAB_XPATH);
        assert_eq!(plan.category, Category::Gallery.facet_xpath());
        assert_eq!(plan.time_window, TimeWindow::Week.facet_xpath());
    }

    #[test]
    fn page_lists_articles_in_order() {
        let page = SearchResultsPage::parse(
            r#"<html><body>
                <article class="storyblock" id="a"></article>
                <div class="other"></div>
                <article class="storyblock" id="b"></article>
            </body></html>"#,
        );
        let locator = Locator::parse("article", ".storyblock").unwrap();
        let ids: Vec<&str> = page
            .articles(&locator)
            .iter()
            .filter_map(|e| e.value().id())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn listing_file_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.html");
        std::fs::write(&path, "<html><body>saved</body></html>").unwrap();

        let listing = ListingConfig {
            file: Some(path),
            url_template: "http://127.0.0.1:9/never?q={query}".to_string(),
            ..ListingConfig::default()
        };
        let html = load_listing(&Client::new(), &listing, "q").await.unwrap();
        assert!(html.contains("saved"));
    }

    #[tokio::test]
    async fn missing_listing_file_is_an_error() {
        let listing = ListingConfig {
            file: Some("/no/such/results.html".into()),
            ..ListingConfig::default()
        };
        let err = load_listing(&Client::new(), &listing, "q").await.unwrap_err();
        assert!(matches!(err, DriverError::ReadListing { .. }));
    }
}
