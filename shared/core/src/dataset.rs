//! Dataset assembly
//!
//! Decides the final tabular shape for a document: concatenate every
//! normalized table when any exist, otherwise synthesize a single row
//! from the document's key-value data.

use serde_json::{Map, Value};

use crate::cell::Cell;
use crate::keyvalue::KeyValueMap;
use crate::table::{Column, NormalizedTable};

/// The single canonical tabular result of one document's extraction.
/// All columns have equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub columns: Vec<Column>,
}

impl Dataset {
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// First `n` rows as JSON records in column order, for the response
    /// payload.
    pub fn head(&self, n: usize) -> Vec<Value> {
        (0..self.row_count().min(n))
            .map(|row| {
                let mut record = Map::new();
                for column in &self.columns {
                    record.insert(
                        column.name.clone(),
                        serde_json::to_value(&column.cells[row]).unwrap_or(Value::Null),
                    );
                }
                Value::Object(record)
            })
            .collect()
    }
}

/// Assemble the document dataset.
///
/// With tables, concatenation aligns columns by name across tables
/// (outer-join semantics): output column order is first-seen order, rows
/// stack in table order, and a table missing a column contributes
/// `Missing` for its rows. Without tables, the key-value map becomes a
/// one-row dataset, columns in key insertion order; an empty map yields
/// the degenerate zero-column dataset.
pub fn assemble(tables: Vec<NormalizedTable>, kv: KeyValueMap) -> Dataset {
    if tables.is_empty() {
        let columns = kv
            .into_iter()
            .map(|(name, value)| Column {
                name,
                cells: vec![Cell::from_raw(Some(&value))],
            })
            .collect();
        return Dataset { columns };
    }

    let mut columns: Vec<Column> = Vec::new();
    let mut total_rows = 0;

    for table in tables {
        let added = table.row_count();
        for source in table.columns {
            let index = match columns.iter().position(|c| c.name == source.name) {
                Some(i) => i,
                None => {
                    columns.push(Column {
                        name: source.name.clone(),
                        cells: vec![Cell::Missing; total_rows],
                    });
                    columns.len() - 1
                }
            };
            // A duplicate-named column in the same table already filled
            // this stripe; first one wins.
            if columns[index].cells.len() > total_rows {
                continue;
            }
            columns[index].cells.extend(source.cells);
        }
        total_rows += added;
        for column in &mut columns {
            column.cells.resize(total_rows, Cell::Missing);
        }
    }

    Dataset { columns }
}
