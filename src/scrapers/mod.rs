//! Page structure: article elements, selectors and site drivers.
//!
//! The extractor only ever sees an [`ArticleElement`]: a handle into a rendered
//! listing that can look up descendants and read their text or attributes.
//! [`scraper::ElementRef`] is the production implementation; tests supply their
//! own to inject faults.
//!
//! # Site drivers
//!
//! | Site | Module | Listing source |
//! |------|--------|----------------|
//! | news.com.au | [`newscomau`] | search results page over HTTP, or a saved HTML file |

pub mod newscomau;

use crate::config::SelectorConfig;
use crate::error::{ConfigError, LookupFault};
use crate::utils::normalize_whitespace;
use scraper::{ElementRef, Selector};
use std::fmt;

/// A CSS selector together with the text it was parsed from.
#[derive(Clone)]
pub struct Locator {
    css: String,
    selector: Selector,
}

impl Locator {
    pub fn parse(role: &'static str, css: &str) -> Result<Self, ConfigError> {
        let selector = Selector::parse(css).map_err(|e| ConfigError::InvalidSelector {
            role,
            css: css.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            css: css.to_string(),
            selector,
        })
    }

    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Locator").field(&self.css).finish()
    }
}

/// Selectors for the listing container and each field inside it.
#[derive(Debug, Clone)]
pub struct ArticleLocators {
    pub article: Locator,
    pub title: Locator,
    pub datetime: Locator,
    pub standfirst: Locator,
    pub image: Locator,
}

impl ArticleLocators {
    pub fn from_config(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            article: Locator::parse("article", &config.article)?,
            title: Locator::parse("title", &config.title)?,
            datetime: Locator::parse("datetime", &config.datetime)?,
            standfirst: Locator::parse("standfirst", &config.standfirst)?,
            image: Locator::parse("image", &config.image)?,
        })
    }
}

/// A handle to one listing entry on a rendered page.
///
/// Lookups return `Ok(None)` / an empty `Vec` when nothing matches; `Err` is
/// reserved for faults in reading the page itself.
pub trait ArticleElement: Sized {
    fn find_first(&self, locator: &Locator) -> Result<Option<Self>, LookupFault>;

    fn find_all(&self, locator: &Locator) -> Result<Vec<Self>, LookupFault>;

    /// Visible text with runs of whitespace collapsed and ends trimmed.
    fn text(&self) -> Result<String, LookupFault>;

    fn attr(&self, name: &str) -> Result<Option<String>, LookupFault>;
}

impl ArticleElement for ElementRef<'_> {
    fn find_first(&self, locator: &Locator) -> Result<Option<Self>, LookupFault> {
        Ok(self.select(locator.selector()).next())
    }

    fn find_all(&self, locator: &Locator) -> Result<Vec<Self>, LookupFault> {
        Ok(self.select(locator.selector()).collect())
    }

    fn text(&self) -> Result<String, LookupFault> {
        Ok(normalize_whitespace(ElementRef::text(self)))
    }

    fn attr(&self, name: &str) -> Result<Option<String>, LookupFault> {
        Ok(self.value().attr(name).map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const FRAGMENT: &str = r#"
        <div class="storyblock">
          <h4 class="storyblock_title">  Rates
             rise again </h4>
          <p class="storyblock_standfirst">First</p>
          <p class="storyblock_standfirst">Second</p>
          <img class="responsive-img_img" src="https://x.com/a.png">
        </div>"#;

    fn locator(css: &str) -> Locator {
        Locator::parse("test", css).unwrap()
    }

    #[test]
    fn invalid_selector_is_a_config_error() {
        let err = Locator::parse("title", "..broken[").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSelector { role: "title", .. }));
    }

    #[test]
    fn element_ref_reads_text_and_attributes() {
        let doc = Html::parse_fragment(FRAGMENT);
        let block = doc
            .root_element()
            .find_first(&locator(".storyblock"))
            .unwrap()
            .unwrap();

        let title = block.find_first(&locator(".storyblock_title")).unwrap().unwrap();
        assert_eq!(ArticleElement::text(&title).unwrap(), "Rates rise again");

        let image = block.find_first(&locator(".responsive-img_img")).unwrap().unwrap();
        assert_eq!(
            ArticleElement::attr(&image, "src").unwrap().as_deref(),
            Some("https://x.com/a.png")
        );
        assert_eq!(ArticleElement::attr(&image, "alt").unwrap(), None);
    }

    #[test]
    fn find_all_keeps_document_order() {
        let doc = Html::parse_fragment(FRAGMENT);
        let all = doc
            .root_element()
            .find_all(&locator(".storyblock_standfirst"))
            .unwrap();
        let texts: Vec<String> = all.iter().map(|e| ArticleElement::text(e).unwrap()).collect();
        assert_eq!(texts, vec!["First", "Second"]);
    }

    #[test]
    fn missing_descendant_is_none_not_error() {
        let doc = Html::parse_fragment(FRAGMENT);
        let root = doc.root_element();
        assert!(root.find_first(&locator(".storyblock_datetime")).unwrap().is_none());
        assert!(root.find_all(&locator(".storyblock_datetime")).unwrap().is_empty());
    }

    #[test]
    fn locators_from_default_config() {
        let locators = ArticleLocators::from_config(&SelectorConfig::default()).unwrap();
        assert_eq!(locators.article.css(), ".storyblock");
        assert_eq!(locators.image.css(), ".responsive-img_img");
    }
}
