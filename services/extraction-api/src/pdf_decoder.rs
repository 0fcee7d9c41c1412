//! PDF decoding
//!
//! Wraps the `pdf-extract` crate behind the `PdfDecoder` trait the core
//! pipeline consumes: per page, zero or more raw tables plus optional
//! plain text. Table detection is a layout heuristic over the extracted
//! text: runs of consecutive lines whose fields (split on tab or two or
//! more spaces) line up are treated as a table grid.

use pdfsift_core::{DecodedPage, RawTable};
use pdfsift_utils::{PdfsiftError, PdfsiftResult};
use regex::Regex;
use tracing::debug;

/// A run shorter than this is regular prose, not a table.
const MIN_TABLE_LINES: usize = 3;
/// A table line has at least this many fields.
const MIN_TABLE_FIELDS: usize = 2;

pub trait PdfDecoder: Send + Sync {
    /// Decode a PDF into its pages. Fails hard on unreadable input; the
    /// whole pipeline aborts and no partial result is produced.
    fn decode(&self, data: &[u8]) -> PdfsiftResult<Vec<DecodedPage>>;
}

/// Production decoder built on `pdf_extract`.
pub struct PdfExtractDecoder {
    field_splitter: Regex,
}

impl PdfExtractDecoder {
    pub fn new() -> Self {
        Self {
            field_splitter: Regex::new(r"\t|\s{2,}").unwrap(),
        }
    }

    fn decode_page(&self, text: &str) -> DecodedPage {
        let tables = self.detect_tables(text);

        // Image-only pages come back as empty text; absent text is the
        // valid signal for that.
        let text = if text.trim().is_empty() {
            None
        } else {
            Some(text.to_string())
        };

        DecodedPage { tables, text }
    }

    /// Collect runs of aligned lines into raw tables.
    fn detect_tables(&self, text: &str) -> Vec<RawTable> {
        let mut tables = Vec::new();
        let mut run: Vec<Vec<Option<String>>> = Vec::new();
        let mut run_width = 0;

        for line in text.lines() {
            let fields: Vec<&str> = self
                .field_splitter
                .split(line.trim())
                .filter(|f| !f.is_empty())
                .collect();

            if fields.len() < MIN_TABLE_FIELDS {
                Self::flush_run(&mut run, &mut tables);
                run_width = 0;
                continue;
            }

            // A width change ends the current run and starts a new one.
            if !run.is_empty() && fields.len() != run_width {
                Self::flush_run(&mut run, &mut tables);
            }
            run_width = fields.len();
            run.push(fields.into_iter().map(|f| Some(f.to_string())).collect());
        }
        Self::flush_run(&mut run, &mut tables);

        tables
    }

    fn flush_run(run: &mut Vec<Vec<Option<String>>>, tables: &mut Vec<RawTable>) {
        if run.len() >= MIN_TABLE_LINES {
            tables.push(RawTable::new(std::mem::take(run)));
        } else {
            run.clear();
        }
    }
}

impl Default for PdfExtractDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDecoder for PdfExtractDecoder {
    fn decode(&self, data: &[u8]) -> PdfsiftResult<Vec<DecodedPage>> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| PdfsiftError::decode_failure(e.to_string()))?;

        debug!(pages = pages.len(), "decoded PDF");
        Ok(pages.iter().map(|text| self.decode_page(text)).collect())
    }
}
