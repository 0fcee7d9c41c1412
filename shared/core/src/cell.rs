use serde::Serialize;

/// A single dataset cell.
///
/// Extracted PDF content is loosely typed, so cells carry an explicit tag
/// instead of relying on per-cell inspection downstream. `Missing` covers
/// absent cells and cells that were empty after trimming.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Missing,
    Text(String),
    Number(f64),
}

impl Cell {
    /// Build a cell from a raw decoder value. Whitespace-only and absent
    /// values both map to `Missing`; everything else is kept as trimmed text.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    Cell::Missing
                } else {
                    Cell::Text(trimmed.to_string())
                }
            }
            None => Cell::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Numeric view of the cell, if its content parses as a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(t) => t.trim().parse::<f64>().ok(),
            Cell::Missing => None,
        }
    }

    /// Text rendering used by the CSV and XLSX writers. Missing cells
    /// render as the empty string.
    pub fn render(&self) -> String {
        match self {
            Cell::Missing => String::new(),
            Cell::Text(t) => t.clone(),
            Cell::Number(n) => n.to_string(),
        }
    }
}
