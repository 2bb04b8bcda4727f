//! Error types for extraction, image fetching, configuration and output.
//!
//! Per-item failures never leave the item boundary: [`Skip`] drops an article
//! from the result set and [`ImageFetchError`] is only logged. The remaining
//! types are run-level and surface from `main`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The fields read from an article element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleField {
    Title,
    Date,
    Description,
    Image,
}

impl fmt::Display for ArticleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArticleField::Title => "title",
            ArticleField::Date => "date",
            ArticleField::Description => "description",
            ArticleField::Image => "image",
        };
        f.write_str(name)
    }
}

/// A structural fault raised while reading an [`ArticleElement`](crate::scrapers::ArticleElement).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct LookupFault(pub String);

/// Why an article element produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Skip {
    #[error("missing required field `{field}`")]
    MissingRequiredField { field: ArticleField },

    #[error("lookup fault while reading `{field}`: {source}")]
    ElementLookup {
        field: ArticleField,
        #[source]
        source: LookupFault,
    },
}

impl Skip {
    pub fn missing(field: ArticleField) -> Self {
        Skip::MissingRequiredField { field }
    }

    /// Adapter for `map_err` on element reads.
    pub fn lookup(field: ArticleField) -> impl FnOnce(LookupFault) -> Self {
        move |source| Skip::ElementLookup { field, source }
    }
}

#[derive(Debug, Error)]
pub enum ImageFetchError {
    #[error("invalid image url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered with status {0}")]
    Status(u16),

    #[error("image decode/encode failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("filesystem error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum SinkWriteError {
    #[error("spreadsheet write failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("filesystem error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("search query is empty; set `search.query` or pass --query")]
    MissingQuery,

    #[error("invalid `{role}` selector `{css}`: {message}")]
    InvalidSelector {
        role: &'static str,
        css: String,
        message: String,
    },

    #[error("invalid url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cannot read listing file {}: {source}", .path.display())]
    ReadListing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("listing request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid search url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_messages_name_the_field() {
        let skip = Skip::missing(ArticleField::Title);
        assert_eq!(skip.to_string(), "missing required field `title`");

        let skip = Skip::lookup(ArticleField::Image)(LookupFault("stale node".into()));
        assert_eq!(
            skip.to_string(),
            "lookup fault while reading `image`: stale node"
        );
    }

    #[test]
    fn io_errors_include_the_path() {
        let err = SinkWriteError::Io {
            path: PathBuf::from("/tmp/report.xlsx"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/report.xlsx"));
    }
}
