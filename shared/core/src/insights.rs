//! Dataset insights
//!
//! Per-column summary statistics over an assembled dataset. Pure and
//! deterministic; the dataset is never mutated and every call produces a
//! fresh report.

use indexmap::IndexMap;
use serde::Serialize;

use crate::dataset::Dataset;
use crate::table::Column;

/// Statistical summary of one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct InsightReport {
    pub total_rows: usize,
    pub total_columns: usize,
    pub columns: Vec<String>,
    pub missing_values: IndexMap<String, usize>,
    pub data_types: IndexMap<String, String>,
    pub numeric_stats: IndexMap<String, NumericStats>,
    pub categorical_summary: IndexMap<String, CategoricalSummary>,
}

/// Summary of a numeric column. Every field is `null` when the column has
/// no present values; `std` additionally needs at least two (sample
/// standard deviation, N-1 denominator).
#[derive(Debug, Clone, Serialize)]
pub struct NumericStats {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub std: Option<f64>,
}

/// Summary of a text column: distinct present values and the ten most
/// frequent, ordered by count with ties in first-appearance order.
#[derive(Debug, Clone, Serialize)]
pub struct CategoricalSummary {
    pub unique_values: usize,
    pub top_values: IndexMap<String, usize>,
}

/// Number of text columns that get a categorical summary.
const CATEGORICAL_COLUMN_LIMIT: usize = 5;
/// Number of entries in each top-values list.
const TOP_VALUES_LIMIT: usize = 10;

/// Summarize a dataset.
///
/// A column is numeric when every present cell parses as a number; a
/// single non-numeric value demotes the whole column to text. An
/// all-missing column is vacuously numeric and reports `null` statistics.
pub fn summarize(dataset: &Dataset) -> InsightReport {
    let mut report = InsightReport {
        total_rows: dataset.row_count(),
        total_columns: dataset.column_count(),
        columns: dataset.column_names(),
        missing_values: IndexMap::new(),
        data_types: IndexMap::new(),
        numeric_stats: IndexMap::new(),
        categorical_summary: IndexMap::new(),
    };

    for column in &dataset.columns {
        let missing = column.cells.iter().filter(|c| c.is_missing()).count();
        report.missing_values.insert(column.name.clone(), missing);

        let present = column.cells.len() - missing;
        let numbers: Vec<f64> = column.cells.iter().filter_map(|c| c.as_f64()).collect();
        let is_numeric = numbers.len() == present;

        if is_numeric {
            report.data_types.insert(column.name.clone(), "numeric".to_string());
            report
                .numeric_stats
                .insert(column.name.clone(), numeric_stats(&numbers));
        } else {
            report.data_types.insert(column.name.clone(), "text".to_string());
            if report.categorical_summary.len() < CATEGORICAL_COLUMN_LIMIT {
                report
                    .categorical_summary
                    .insert(column.name.clone(), categorical_summary(column));
            }
        }
    }

    report
}

fn numeric_stats(values: &[f64]) -> NumericStats {
    if values.is_empty() {
        return NumericStats {
            mean: None,
            median: None,
            min: None,
            max: None,
            std: None,
        };
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    let std = if values.len() >= 2 {
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        Some(variance.sqrt())
    } else {
        None
    };

    NumericStats {
        mean: Some(mean),
        median: Some(median),
        min: sorted.first().copied(),
        max: sorted.last().copied(),
        std,
    }
}

fn categorical_summary(column: &Column) -> CategoricalSummary {
    // Insertion order tracks first appearance, which breaks frequency ties.
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for cell in &column.cells {
        if !cell.is_missing() {
            *counts.entry(cell.render()).or_insert(0) += 1;
        }
    }

    let unique_values = counts.len();

    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    let top_values = entries.into_iter().take(TOP_VALUES_LIMIT).collect();

    CategoricalSummary {
        unique_values,
        top_values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::table::Column;

    fn dataset(columns: Vec<Column>) -> Dataset {
        Dataset { columns }
    }

    fn text_cells(values: &[&str]) -> Vec<Cell> {
        values.iter().map(|v| Cell::from_raw(Some(v))).collect()
    }

    #[test]
    fn test_numeric_column_statistics() {
        let ds = dataset(vec![Column {
            name: "score".to_string(),
            cells: text_cells(&["1", "2", "3", "4"]),
        }]);

        let report = summarize(&ds);

        assert_eq!(report.data_types["score"], "numeric");
        let stats = &report.numeric_stats["score"];
        assert_eq!(stats.mean, Some(2.5));
        assert_eq!(stats.median, Some(2.5));
        assert_eq!(stats.min, Some(1.0));
        assert_eq!(stats.max, Some(4.0));
        assert!((stats.std.unwrap() - 1.2909944).abs() < 1e-6);
    }

    #[test]
    fn test_all_missing_column_yields_null_statistics() {
        let ds = dataset(vec![Column {
            name: "blank".to_string(),
            cells: vec![Cell::Missing, Cell::Missing, Cell::Missing],
        }]);

        let report = summarize(&ds);

        assert_eq!(report.missing_values["blank"], 3);
        let stats = &report.numeric_stats["blank"];
        assert_eq!(stats.mean, None);
        assert_eq!(stats.median, None);
        assert_eq!(stats.min, None);
        assert_eq!(stats.max, None);
        assert_eq!(stats.std, None);
    }

    #[test]
    fn test_single_value_column_has_null_std() {
        let ds = dataset(vec![Column {
            name: "n".to_string(),
            cells: text_cells(&["7"]),
        }]);

        let stats = &summarize(&ds).numeric_stats["n"];
        assert_eq!(stats.mean, Some(7.0));
        assert_eq!(stats.std, None);
    }

    #[test]
    fn test_one_bad_value_demotes_column_to_text() {
        let ds = dataset(vec![Column {
            name: "mixed".to_string(),
            cells: text_cells(&["1", "2", "n/a", "4"]),
        }]);

        let report = summarize(&ds);

        assert_eq!(report.data_types["mixed"], "text");
        assert!(!report.numeric_stats.contains_key("mixed"));
        assert!(report.categorical_summary.contains_key("mixed"));
    }

    #[test]
    fn test_top_values_order_and_tie_break() {
        let ds = dataset(vec![Column {
            name: "tag".to_string(),
            cells: text_cells(&["a", "a", "b", "c", "c", "c"]),
        }]);

        let summary = &summarize(&ds).categorical_summary["tag"];

        assert_eq!(summary.unique_values, 3);
        let entries: Vec<(&String, &usize)> = summary.top_values.iter().collect();
        assert_eq!(
            entries,
            vec![
                (&"c".to_string(), &3),
                (&"a".to_string(), &2),
                (&"b".to_string(), &1)
            ]
        );
    }

    #[test]
    fn test_categorical_summary_limited_to_first_five_text_columns() {
        let columns = (0..7)
            .map(|i| Column {
                name: format!("col{}", i),
                cells: text_cells(&["x", "y"]),
            })
            .collect();

        let report = summarize(&dataset(columns));

        assert_eq!(report.categorical_summary.len(), 5);
        assert!(report.categorical_summary.contains_key("col0"));
        assert!(!report.categorical_summary.contains_key("col5"));
    }

    #[test]
    fn test_empty_dataset_reports_zero_columns() {
        let report = summarize(&Dataset::default());

        assert_eq!(report.total_rows, 0);
        assert_eq!(report.total_columns, 0);
        assert!(report.columns.is_empty());
        assert!(report.numeric_stats.is_empty());
        assert!(report.categorical_summary.is_empty());
    }

    #[test]
    fn test_missing_values_excluded_from_statistics() {
        let ds = dataset(vec![Column {
            name: "v".to_string(),
            cells: vec![
                Cell::Text("2".to_string()),
                Cell::Missing,
                Cell::Text("4".to_string()),
            ],
        }]);

        let report = summarize(&ds);

        assert_eq!(report.missing_values["v"], 1);
        assert_eq!(report.numeric_stats["v"].mean, Some(3.0));
    }
}
