//! Per-element field extraction.
//!
//! [`ArticleExtractor::extract_one`] turns one listing entry into an
//! [`ArticleRecord`] or a [`Skip`]. Title, date and image are required; the
//! description is optional. A failed image download is logged and the record
//! is still produced with its derived picture filename.

use crate::classify::{count_phrase_occurrences, detects_monetary_mention};
use crate::error::{ArticleField, ImageFetchError, Skip};
use crate::images::{FetchImage, derive_local_filename};
use crate::models::ArticleRecord;
use crate::scrapers::{ArticleElement, ArticleLocators};
use crate::utils::truncate_for_log;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// Attribute holding the publication timestamp.
const DATE_ATTRIBUTE: &str = "datetime";

/// Attributes tried, in order, for the image URL. Lazy-loaded images carry
/// the real URL in `data-src`.
const IMAGE_ATTRIBUTES: [&str; 2] = ["src", "data-src"];

/// Where downloaded images go and how long a download may take.
#[derive(Debug, Clone)]
pub struct ImageSettings {
    pub output_dir: PathBuf,
    /// Relative to `output_dir`; the report records paths under this.
    pub images_subdir: PathBuf,
    /// Base for relative image URLs.
    pub base_url: Option<Url>,
    pub timeout: Duration,
}

pub struct ArticleExtractor<F> {
    locators: ArticleLocators,
    fetcher: F,
    images: ImageSettings,
}

/// Fields read from the element, before classification.
struct RawArticle {
    title: String,
    date: String,
    description: Option<String>,
    image_url: String,
}

impl<F: FetchImage> ArticleExtractor<F> {
    pub fn new(locators: ArticleLocators, fetcher: F, images: ImageSettings) -> Self {
        Self {
            locators,
            fetcher,
            images,
        }
    }

    /// Extract one record. `index` is only used for logging.
    #[instrument(level = "debug", skip_all, fields(index = index))]
    pub async fn extract_one<E: ArticleElement>(
        &self,
        index: usize,
        element: &E,
        query: &str,
    ) -> Result<ArticleRecord, Skip> {
        let raw = self.read_fields(element)?;

        let picture_filename = derive_local_filename(&raw.image_url, &self.images.images_subdir);
        self.download_image(index, &raw.image_url, &picture_filename)
            .await;

        let texts = [Some(raw.title.as_str()), raw.description.as_deref()];
        let search_phrase_count = count_phrase_occurrences(&texts, &[query]);
        let contains_money = detects_monetary_mention(&texts);

        debug!(
            index,
            title = %truncate_for_log(&raw.title, 80),
            search_phrase_count,
            contains_money,
            "Extracted article"
        );

        Ok(ArticleRecord {
            title: raw.title,
            date: raw.date,
            description: raw.description,
            picture_filename,
            search_phrase_count,
            contains_money,
        })
    }

    fn read_fields<E: ArticleElement>(&self, element: &E) -> Result<RawArticle, Skip> {
        let locators = &self.locators;

        let title = element
            .find_first(&locators.title)
            .map_err(Skip::lookup(ArticleField::Title))?
            .ok_or(Skip::missing(ArticleField::Title))?
            .text()
            .map_err(Skip::lookup(ArticleField::Title))?;
        if title.is_empty() {
            return Err(Skip::missing(ArticleField::Title));
        }

        let date = element
            .find_first(&locators.datetime)
            .map_err(Skip::lookup(ArticleField::Date))?
            .ok_or(Skip::missing(ArticleField::Date))?
            .attr(DATE_ATTRIBUTE)
            .map_err(Skip::lookup(ArticleField::Date))?
            .ok_or(Skip::missing(ArticleField::Date))?;

        let description = match element
            .find_all(&locators.standfirst)
            .map_err(Skip::lookup(ArticleField::Description))?
            .first()
        {
            Some(first) => Some(
                first
                    .text()
                    .map_err(Skip::lookup(ArticleField::Description))?,
            ),
            None => None,
        };

        let image = element
            .find_first(&locators.image)
            .map_err(Skip::lookup(ArticleField::Image))?
            .ok_or(Skip::missing(ArticleField::Image))?;
        let mut image_url = None;
        for name in IMAGE_ATTRIBUTES {
            let value = image.attr(name).map_err(Skip::lookup(ArticleField::Image))?;
            if let Some(value) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
                image_url = Some(value);
                break;
            }
        }
        let image_url = image_url.ok_or(Skip::missing(ArticleField::Image))?;

        Ok(RawArticle {
            title,
            date,
            description,
            image_url: self.resolve_image_url(&image_url),
        })
    }

    /// Absolute form of `src` when a base URL is known, else `src` unchanged.
    fn resolve_image_url(&self, src: &str) -> String {
        match &self.images.base_url {
            Some(base) => base
                .join(src)
                .map(String::from)
                .unwrap_or_else(|_| src.to_string()),
            None => src.to_string(),
        }
    }

    /// Best-effort download; failures are logged and otherwise ignored.
    async fn download_image(&self, index: usize, image_url: &str, picture_filename: &Path) {
        let dest = self.images.output_dir.join(picture_filename);
        let result = match Url::parse(image_url) {
            Ok(url) => {
                self.fetcher
                    .fetch_and_store(&url, &dest, self.images.timeout)
                    .await
            }
            Err(source) => Err(ImageFetchError::InvalidUrl {
                url: image_url.to_string(),
                source,
            }),
        };
        if let Err(e) = result {
            warn!(index, url = image_url, error = %e, "Image download failed; keeping record");
        }
    }
}
