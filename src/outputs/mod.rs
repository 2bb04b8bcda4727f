//! Report writers.
//!
//! Both sinks take the final ordered record list and write one file under the
//! output directory, creating it if needed.
//!
//! # Output Structure
//!
//! ```text
//! output/
//! ├── news_data.xlsx      # "News Data" sheet, one row per article
//! ├── news_data.json      # same records plus run metadata
//! └── news_images/
//!     ├── photo.jpeg
//!     └── ...
//! ```

pub mod json;
pub mod xlsx;

use crate::error::SinkWriteError;
use std::path::Path;
use tokio::fs;

/// Create the parent directory of `path` if it has one.
pub(crate) async fn ensure_parent(path: &Path) -> Result<(), SinkWriteError> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => fs::create_dir_all(parent)
            .await
            .map_err(|source| SinkWriteError::Io {
                path: parent.to_path_buf(),
                source,
            }),
        None => Ok(()),
    }
}
