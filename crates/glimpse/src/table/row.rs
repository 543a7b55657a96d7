//! Rows keyed by column name, and the ordered collection that holds them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One decoded CSV record, keyed by header name in CSV column order.
///
/// A key is absent when the record ended before reaching that column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(IndexMap<String, String>);

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Set a cell, keeping the position of an existing key.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    /// Get a cell value; `None` when the key is absent.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// Whether the row has a value for `column` (possibly empty).
    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    /// Column names in CSV order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `(column, value)` pairs in CSV order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of cells present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// The decoded rows currently held in memory, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Column names in order of first appearance.
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append rows in order, picking up any column names not seen before.
    pub fn append(&mut self, rows: impl IntoIterator<Item = Row>) {
        for row in rows {
            // Rows normally carry the header (or a prefix of it) in order.
            let known_prefix = row.len() <= self.columns.len()
                && row.columns().zip(&self.columns).all(|(a, b)| a == b);
            if !known_prefix {
                for column in row.columns() {
                    if !self.columns.iter().any(|c| c == column) {
                        self.columns.push(column.to_string());
                    }
                }
            }
            self.rows.push(row);
        }
    }

    /// Drop every row and column.
    pub fn clear(&mut self) {
        self.columns.clear();
        self.rows.clear();
    }

    /// Column names in display order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of `column` from every row that has the key. Empty strings are included.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.rows.iter().filter_map(move |row| row.get(column))
    }
}

impl FromIterator<Row> for Dataset {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        let mut dataset = Dataset::new();
        dataset.append(iter);
        dataset
    }
}
