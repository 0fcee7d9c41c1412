//! Per-document extraction
//!
//! Walks decoded pages in order, normalizing every detected table and
//! running key-value extraction over every page that has text. Anomalies
//! at this level (empty tables, image-only pages) are absorbed, never
//! propagated.

use tracing::debug;

use crate::keyvalue::{merge_key_values, KeyValueExtractor, KeyValueMap};
use crate::table::{normalize, NormalizedTable, RawTable};

/// One decoded PDF page, as supplied by the decoder: zero or more raw
/// tables plus optional plain text. Absent text is valid (image-only
/// pages).
#[derive(Debug, Clone, Default)]
pub struct DecodedPage {
    pub tables: Vec<RawTable>,
    pub text: Option<String>,
}

/// Aggregates tables and key-value data across a document's pages.
pub struct DocumentExtractor {
    keyvalue: KeyValueExtractor,
}

impl DocumentExtractor {
    pub fn new() -> Self {
        Self {
            keyvalue: KeyValueExtractor::new(),
        }
    }

    /// Extract all tables and key-value pairs from a decoded document.
    ///
    /// Table order is page order, then in-page detection order. Page maps
    /// merge into the document map in page order with last-write-wins on
    /// key collision. Does not decide the final dataset shape.
    pub fn extract_all(&self, pages: &[DecodedPage]) -> (Vec<NormalizedTable>, KeyValueMap) {
        let mut tables = Vec::new();
        let mut data = KeyValueMap::new();

        for (page_num, page) in pages.iter().enumerate() {
            for raw in &page.tables {
                if let Some(table) = normalize(raw) {
                    tables.push(table);
                }
            }

            if let Some(text) = &page.text {
                let page_data = self.keyvalue.extract(text);
                merge_key_values(&mut data, page_data);
            } else {
                debug!(page = page_num + 1, "page has no text, skipping key-value extraction");
            }
        }

        (tables, data)
    }
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            rows.iter()
                .map(|row| row.iter().map(|c| Some((*c).to_string())).collect())
                .collect(),
        )
    }

    #[test]
    fn test_preserves_page_then_table_order() {
        let pages = vec![
            DecodedPage {
                tables: vec![raw(&[&["a"], &["1"]]), raw(&[&["b"], &["2"]])],
                text: None,
            },
            DecodedPage {
                tables: vec![raw(&[&["c"], &["3"]])],
                text: None,
            },
        ];

        let (tables, _) = DocumentExtractor::new().extract_all(&pages);

        let names: Vec<&str> = tables.iter().map(|t| t.columns[0].name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_tables_are_skipped() {
        let pages = vec![DecodedPage {
            tables: vec![RawTable::new(vec![vec![None, None], vec![None, None]])],
            text: None,
        }];

        let (tables, _) = DocumentExtractor::new().extract_all(&pages);
        assert!(tables.is_empty());
    }

    #[test]
    fn test_textless_pages_do_not_fail() {
        let pages = vec![
            DecodedPage {
                tables: Vec::new(),
                text: Some("City: Oslo\n".to_string()),
            },
            DecodedPage::default(),
            DecodedPage {
                tables: Vec::new(),
                text: Some("City: Bergen\n".to_string()),
            },
        ];

        let (_, data) = DocumentExtractor::new().extract_all(&pages);

        // Later pages win on key collision.
        assert_eq!(data.get("City"), Some(&"Bergen".to_string()));
    }
}
