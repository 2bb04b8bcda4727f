//! Sequential extraction over a results listing.
//!
//! Elements are processed strictly in input order, one at a time, image
//! download included. Skipped elements are logged with their 0-based index
//! and left out of the result; the survivors keep their relative order.

use crate::extractor::ArticleExtractor;
use crate::images::FetchImage;
use crate::models::ArticleRecord;
use crate::scrapers::ArticleElement;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

/// Shared stop signal, checked before each element.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Pause between consecutive elements, to go easy on the origin site.
    pub pacing: Duration,
    pub cancel: CancelFlag,
}

/// Extract every element, returning the records that survived.
#[instrument(level = "info", skip_all, fields(total = elements.len(), %query))]
pub async fn run<E, F>(
    elements: &[E],
    extractor: &ArticleExtractor<F>,
    query: &str,
    options: &PipelineOptions,
) -> Vec<ArticleRecord>
where
    E: ArticleElement,
    F: FetchImage,
{
    let mut records = Vec::with_capacity(elements.len());
    let mut skipped = 0usize;

    for (index, element) in elements.iter().enumerate() {
        if options.cancel.is_cancelled() {
            warn!(index, remaining = elements.len() - index, "Cancelled; stopping early");
            break;
        }
        if index > 0 && !options.pacing.is_zero() {
            sleep(options.pacing).await;
        }

        match extractor.extract_one(index, element, query).await {
            Ok(record) => records.push(record),
            Err(reason) => {
                skipped += 1;
                warn!(index, reason = %reason, "Skipping article");
            }
        }
    }

    info!(
        total = elements.len(),
        extracted = records.len(),
        skipped,
        "Extraction finished"
    );
    records
}
