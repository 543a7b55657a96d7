//! What the viewer should show, derived from the table state alone.
//!
//! A [`View`] borrows from the state and is rebuilt after every transition.
//! Front ends only render it; they never look at the state directly.

use serde::Serialize;

use crate::inference::ColumnType;
use crate::input::SourceMetadata;
use crate::table::{Row, TableState};

/// Prompt shown on the idle drop surface.
pub const IDLE_PROMPT: &str = "Drag 'n' drop a CSV file here, or type its path to select a file";

/// Prompt shown while a drag is over the drop surface.
pub const DRAG_PROMPT: &str = "Drop the CSV file here ...";

pub const LOADING_TEXT: &str = "Loading CSV data...";

pub const TABLE_TITLE: &str = "CSV Data";

/// Label of the action that clears the table.
pub const RESET_LABEL: &str = "Upload Another CSV File";

pub const SELECT_LABEL: &str = "Select Column:";

pub const SELECT_PLACEHOLDER: &str = "-- Select a column --";

/// The screen to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View<'a> {
    /// No rows and nothing loading: show the drop surface.
    Intake(IntakeView<'a>),
    /// A file is decoding and no rows have arrived yet.
    Loading { message: &'static str, file: Option<&'a str> },
    /// At least one row is available.
    Table(TableView<'a>),
}

/// The drop surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntakeView<'a> {
    pub drag_active: bool,
    pub prompt: &'static str,
    /// Failure of the last decode, when it produced no rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}

/// The populated table with its column selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView<'a> {
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'a SourceMetadata>,
    /// Header row, also the column selector's options.
    pub columns: &'a [String],
    pub rows: &'a [Row],
    pub selected_column: Option<&'a str>,
    pub column_type: Option<ColumnType>,
    /// More rows may still arrive.
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
    pub reset_label: &'static str,
}

impl<'a> View<'a> {
    /// Build the view for `state`.
    pub fn from_state(state: &'a TableState, drag_active: bool) -> Self {
        let dataset = state.dataset();

        if !dataset.is_empty() {
            return View::Table(TableView {
                title: TABLE_TITLE,
                source: state.source(),
                columns: dataset.columns(),
                rows: dataset.rows(),
                selected_column: state.selected_column(),
                column_type: state.column_type(),
                loading: state.is_loading(),
                error: state.error(),
                reset_label: RESET_LABEL,
            });
        }

        if state.is_loading() {
            return View::Loading {
                message: LOADING_TEXT,
                file: state.source().map(|s| s.file.as_str()),
            };
        }

        View::Intake(IntakeView {
            drag_active,
            prompt: if drag_active { DRAG_PROMPT } else { IDLE_PROMPT },
            error: state.error(),
        })
    }

    pub fn as_table(&self) -> Option<&TableView<'a>> {
        match self {
            View::Table(table) => Some(table),
            _ => None,
        }
    }
}

impl<'a> TableView<'a> {
    /// `Data Type of Column "<name>": <type>`, when a column is selected.
    pub fn type_line(&self) -> Option<String> {
        match (self.selected_column, self.column_type) {
            (Some(column), Some(column_type)) => {
                Some(format!("Data Type of Column \"{column}\": {column_type}"))
            }
            _ => None,
        }
    }

    /// Cells of `row` lined up with the header; absent keys render empty.
    pub fn cells<'r>(&'r self, row: &'r Row) -> impl Iterator<Item = &'r str> + 'r {
        self.columns
            .iter()
            .map(move |column| row.get(column).unwrap_or(""))
    }

    /// The reset action is only offered while there is data.
    pub fn reset_visible(&self) -> bool {
        !self.rows.is_empty()
    }
}
