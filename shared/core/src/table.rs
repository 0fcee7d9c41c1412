//! Raw table normalization
//!
//! PDF table detection emits loosely shaped grids: ragged rows, empty
//! padding rows, columns with nothing in them. Normalization promotes the
//! first row to column headers and prunes the empties so the assembler
//! only ever sees well-formed columns.

use crate::cell::Cell;

/// Unprocessed grid of cells as emitted by PDF table detection. The first
/// row is the header candidate; cells may be absent.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Self { rows }
    }
}

/// A named column of cells. All columns in a table or dataset have equal
/// length.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

/// A raw table after header promotion and empty-row/column pruning.
///
/// Duplicate column names are allowed and never an error; downstream
/// alignment keys on name, so duplicate-named columns merge best-effort
/// (the first column with a matching name wins).
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub columns: Vec<Column>,
}

impl NormalizedTable {
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }
}

/// Normalize one raw table.
///
/// Row 0 becomes the header; data rows that are entirely empty are
/// dropped, then columns that are empty across the header and every
/// surviving row are dropped. Returns `None` when nothing remains —
/// the table contributes no data and the caller skips it.
pub fn normalize(raw: &RawTable) -> Option<NormalizedTable> {
    let (header, data) = raw.rows.split_first()?;

    let width = raw.rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return None;
    }

    let names: Vec<String> = (0..width)
        .map(|i| {
            header
                .get(i)
                .and_then(|h| h.as_deref())
                .map(str::trim)
                .unwrap_or("")
                .to_string()
        })
        .collect();

    // Short rows are padded with Missing so every row has `width` cells.
    let rows: Vec<Vec<Cell>> = data
        .iter()
        .map(|row| {
            (0..width)
                .map(|i| Cell::from_raw(row.get(i).and_then(|c| c.as_deref())))
                .collect()
        })
        .filter(|cells: &Vec<Cell>| cells.iter().any(|c| !c.is_missing()))
        .collect();

    let kept: Vec<usize> = (0..width)
        .filter(|&i| !names[i].is_empty() || rows.iter().any(|row| !row[i].is_missing()))
        .collect();

    if rows.is_empty() || kept.is_empty() {
        return None;
    }

    let columns = kept
        .into_iter()
        .map(|i| Column {
            name: names[i].clone(),
            cells: rows.iter().map(|row| row[i].clone()).collect(),
        })
        .collect();

    Some(NormalizedTable { columns })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            rows.iter()
                .map(|row| {
                    row.iter()
                        .map(|c| {
                            if c.is_empty() {
                                None
                            } else {
                                Some((*c).to_string())
                            }
                        })
                        .collect()
                })
                .collect(),
        )
    }

    #[test]
    fn test_header_promotion() {
        let table = normalize(&raw(&[&["name", "qty"], &["bolt", "4"], &["nut", "9"]])).unwrap();

        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.columns[0].name, "name");
        assert_eq!(table.columns[1].name, "qty");
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns[1].cells[1], Cell::Text("9".to_string()));
    }

    #[test]
    fn test_all_empty_table_is_skipped() {
        assert!(normalize(&raw(&[&["", ""], &["", ""], &["", ""]])).is_none());
        assert!(normalize(&RawTable::default()).is_none());
    }

    #[test]
    fn test_header_only_table_is_skipped() {
        assert!(normalize(&raw(&[&["name", "qty"]])).is_none());
    }

    #[test]
    fn test_empty_rows_and_columns_are_pruned() {
        let table = normalize(&raw(&[
            &["name", "", "qty"],
            &["bolt", "", "4"],
            &["", "", ""],
            &["nut", "", "9"],
        ]))
        .unwrap();

        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns[0].cells[1], Cell::Text("nut".to_string()));
    }

    #[test]
    fn test_named_empty_column_is_kept() {
        // The header cell counts toward the column's content.
        let table = normalize(&raw(&[&["name", "note"], &["bolt", ""]])).unwrap();

        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.columns[1].cells[0], Cell::Missing);
    }

    #[test]
    fn test_duplicate_headers_do_not_panic() {
        let table = normalize(&raw(&[&["id", "id"], &["1", "2"]])).unwrap();

        assert_eq!(table.columns[0].name, "id");
        assert_eq!(table.columns[1].name, "id");
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let table = normalize(&raw(&[&["a", "b"], &["1"]])).unwrap();

        assert_eq!(table.row_count(), 1);
        assert_eq!(table.columns[1].cells[0], Cell::Missing);
    }
}
