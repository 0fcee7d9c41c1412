//! Dataset artifact export
//!
//! Writes the assembled dataset as a CSV and as an XLSX workbook. Both
//! artifacts carry identical cell content and column order; only the
//! container format differs.

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::cell::Cell;
use crate::dataset::Dataset;

/// Render the dataset as CSV bytes: header row, then data rows. Missing
/// cells become empty fields.
pub fn to_csv(dataset: &Dataset) -> Result<Vec<u8>> {
    // A zero-column dataset has no header to write; the artifact is an
    // empty file rather than a write error.
    if dataset.columns.is_empty() {
        return Ok(Vec::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(dataset.columns.iter().map(|c| c.name.as_str()))
        .context("Failed to write CSV header")?;

    for row in 0..dataset.row_count() {
        writer
            .write_record(dataset.columns.iter().map(|c| c.cells[row].render()))
            .context("Failed to write CSV row")?;
    }

    writer.flush().context("Failed to flush CSV output")?;
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish CSV output: {}", e))
}

/// Render the dataset as a single-worksheet XLSX workbook with the same
/// layout as the CSV artifact.
pub fn to_xlsx(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, column) in dataset.columns.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, column.name.as_str())
            .context("Failed to write XLSX header")?;

        for (row, cell) in column.cells.iter().enumerate() {
            let (row, col) = (row as u32 + 1, col as u16);
            match cell {
                Cell::Missing => {}
                Cell::Text(t) => {
                    worksheet
                        .write_string(row, col, t.as_str())
                        .context("Failed to write XLSX cell")?;
                }
                Cell::Number(n) => {
                    worksheet
                        .write_number(row, col, *n)
                        .context("Failed to write XLSX cell")?;
                }
            }
        }
    }

    workbook
        .save_to_buffer()
        .context("Failed to serialize XLSX workbook")
}
