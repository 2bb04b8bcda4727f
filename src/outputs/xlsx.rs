//! Spreadsheet report.
//!
//! One worksheet, a bold header row in [`REPORT_COLUMNS`] order, then one row
//! per record. A missing description is left as a blank cell.

use crate::error::SinkWriteError;
use crate::models::{ArticleRecord, REPORT_COLUMNS};
use crate::outputs::ensure_parent;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use tracing::{info, instrument};

pub const SHEET_NAME: &str = "News Data";

/// A single spreadsheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
    Blank,
}

/// Cells for one record, in column order.
pub fn record_cells(record: &ArticleRecord) -> [Cell; 6] {
    [
        Cell::Text(record.title.clone()),
        Cell::Text(record.date.clone()),
        record
            .description
            .as_ref()
            .map_or(Cell::Blank, |d| Cell::Text(d.clone())),
        Cell::Text(record.picture_filename.to_string_lossy().into_owned()),
        Cell::Number(record.search_phrase_count as f64),
        Cell::Bool(record.contains_money),
    ]
}

/// Write `records` to a new workbook at `path`, replacing any existing file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_report(records: &[ArticleRecord], path: &Path) -> Result<(), SinkWriteError> {
    ensure_parent(path).await?;

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in (0u16..).zip(REPORT_COLUMNS) {
        sheet.write_string_with_format(0, col, name, &header)?;
    }

    for (row, record) in (1u32..).zip(records) {
        for (col, cell) in (0u16..).zip(record_cells(record)) {
            match cell {
                Cell::Text(text) => {
                    sheet.write_string(row, col, text)?;
                }
                Cell::Number(n) => {
                    sheet.write_number(row, col, n)?;
                }
                Cell::Bool(b) => {
                    sheet.write_boolean(row, col, b)?;
                }
                Cell::Blank => {}
            }
        }
    }

    workbook.save(path)?;
    info!(rows = records.len(), "Wrote spreadsheet report");
    Ok(())
}
