//! Lead-image filenames and downloads.
//!
//! Filenames are derived from the image URL alone, so every article gets a
//! picture path even when the download later fails. Downloads are decoded and
//! re-encoded as JPEG whatever format the server sends.

use crate::error::ImageFetchError;
use image::ImageFormat;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, instrument};
use url::Url;

/// Stem used when the URL path ends without a file name.
const FALLBACK_STEM: &str = "image";

/// Build the local `.jpeg` path for an image URL under `directory`.
///
/// Only the last segment of the URL path is used; query string and fragment are
/// ignored and any extension is replaced. Input that does not parse as an
/// absolute URL is treated as a bare path.
///
/// ```ignore
/// let p = derive_local_filename("https://x.com/img/photo.png?w=200", Path::new("/out"));
/// assert_eq!(p, PathBuf::from("/out/photo.jpeg"));
/// ```
pub fn derive_local_filename(image_url: &str, directory: &Path) -> PathBuf {
    let path = match Url::parse(image_url) {
        Ok(url) => url.path().to_string(),
        Err(_) => image_url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };
    let basename = path.rsplit('/').next().unwrap_or_default();
    let stem = Path::new(basename)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_STEM);

    directory.join(format!("{stem}.jpeg"))
}

/// Something that can download an image and persist it as JPEG.
pub trait FetchImage {
    /// Fetch `url` and write it to `dest`, giving up after `timeout`.
    async fn fetch_and_store(
        &self,
        url: &Url,
        dest: &Path,
        timeout: Duration,
    ) -> Result<(), ImageFetchError>;
}

/// [`FetchImage`] over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl FetchImage for HttpImageFetcher {
    #[instrument(level = "debug", skip_all, fields(%url, dest = %dest.display()))]
    async fn fetch_and_store(
        &self,
        url: &Url,
        dest: &Path,
        timeout: Duration,
    ) -> Result<(), ImageFetchError> {
        let response = self.client.get(url.clone()).timeout(timeout).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImageFetchError::Status(status.as_u16()));
        }
        let bytes = response.bytes().await?;
        debug!(bytes = bytes.len(), "Downloaded image");

        store_as_jpeg(&bytes, dest).await?;
        info!(path = %dest.display(), "Image saved");
        Ok(())
    }
}

/// Decode `bytes` in any supported format and write them to `dest` as JPEG,
/// creating missing parent directories.
pub async fn store_as_jpeg(bytes: &[u8], dest: &Path) -> Result<(), ImageFetchError> {
    let decoded = image::load_from_memory(bytes)?;

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| ImageFetchError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    // JPEG has no alpha channel.
    decoded.to_rgb8().save_with_format(dest, ImageFormat::Jpeg)?;
    Ok(())
}
