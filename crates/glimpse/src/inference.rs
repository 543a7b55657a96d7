//! Column type inference.
//!
//! A column is Numeric when every value it holds is a finite number, Text
//! when at least one value is not, and Unknown when no row has the column at
//! all. Rows that lack the key are skipped; a present but empty cell counts
//! as a value and is not numeric.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::table::Dataset;

/// Inferred type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// Every value is a finite number.
    Numeric,
    /// At least one value is not a number.
    Text,
    /// No row has a value for the column.
    Unknown,
}

impl ColumnType {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "Numeric",
            ColumnType::Text => "Text",
            ColumnType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify `column` over every row of `dataset`.
pub fn infer_column_type(dataset: &Dataset, column: &str) -> ColumnType {
    infer_values(dataset.column_values(column))
}

/// Classify a sequence of present cell values.
pub fn infer_values<'a>(values: impl IntoIterator<Item = &'a str>) -> ColumnType {
    let mut seen = false;
    for value in values {
        if !is_numeric_value(value) {
            return ColumnType::Text;
        }
        seen = true;
    }

    if seen {
        ColumnType::Numeric
    } else {
        ColumnType::Unknown
    }
}

/// Infer every column of the dataset, in header order.
pub fn infer_all(dataset: &Dataset) -> IndexMap<String, ColumnType> {
    dataset
        .columns()
        .iter()
        .map(|column| (column.clone(), infer_column_type(dataset, column)))
        .collect()
}

/// Whether a single cell reads as a finite number.
///
/// Surrounding whitespace is ignored; blank cells are not numeric. Accepts
/// signed decimal notation with optional fraction and exponent, and unsigned
/// `0x`/`0o`/`0b` integer literals.
pub fn is_numeric_value(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }

    parse_number(trimmed).is_some_and(f64::is_finite)
}

fn parse_number(s: &str) -> Option<f64> {
    if let Some(value) = parse_radix_literal(s) {
        return Some(value);
    }
    // Rust also accepts "inf", "infinity" and "nan" here; none of them is finite.
    s.parse::<f64>().ok()
}

fn parse_radix_literal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }

    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    s[2..].chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}
