//! Table state: the rows, the loading flag, and the column selection.
//!
//! All mutation goes through the transition methods below. Decoder events
//! carry the [`Generation`] of the decode that produced them; accepting a new
//! file or resetting starts a new generation, and anything still arriving
//! from an older decode is discarded.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use super::row::{Dataset, Row};
use crate::inference::{ColumnType, infer_column_type};
use crate::input::{DecodeEvent, DecodeEventKind, SourceMetadata};

/// Identifies one decode, so late events from a superseded decode can be dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of applying an event to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// State changed; the view should be refreshed.
    Changed,
    /// The event was current but had nothing to change.
    Unchanged,
    /// The event belonged to an older decode and was ignored.
    Stale,
}

impl Transition {
    pub fn is_changed(self) -> bool {
        self == Transition::Changed
    }
}

/// Everything the viewer knows about the loaded table.
#[derive(Debug, Clone, Default)]
pub struct TableState {
    dataset: Dataset,
    loading: bool,
    selected_column: Option<String>,
    column_type: Option<ColumnType>,
    generation: Generation,
    error: Option<String>,
    source: Option<SourceMetadata>,
}

impl TableState {
    /// Create the initial, empty state.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn selected_column(&self) -> Option<&str> {
        self.selected_column.as_deref()
    }

    /// Inferred type of the selected column. Only set while a column is selected.
    pub fn column_type(&self) -> Option<ColumnType> {
        self.column_type
    }

    /// The generation decoder events must carry to be applied.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Failure reported by the current decode, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn source(&self) -> Option<&SourceMetadata> {
        self.source.as_ref()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// A file passed intake: start a fresh table and a new decode generation.
    pub fn on_file_accepted(&mut self, source: SourceMetadata) -> Generation {
        self.generation = self.generation.next();
        self.dataset.clear();
        self.selected_column = None;
        self.column_type = None;
        self.error = None;
        self.loading = true;
        info!(file = %source.file, generation = %self.generation, "Loading file");
        self.source = Some(source);
        self.generation
    }

    /// Append a decoded batch.
    pub fn on_rows_batch(&mut self, generation: Generation, rows: Vec<Row>) -> Transition {
        if !self.is_current(generation) {
            return Transition::Stale;
        }
        if rows.is_empty() {
            return Transition::Unchanged;
        }

        debug!(rows = rows.len(), total = self.dataset.len() + rows.len(), "Appending batch");
        self.dataset.append(rows);
        Transition::Changed
    }

    /// The decode finished.
    pub fn on_decode_complete(&mut self, generation: Generation) -> Transition {
        if !self.is_current(generation) {
            return Transition::Stale;
        }

        info!(rows = self.dataset.len(), generation = %generation, "Decode complete");
        self.loading = false;
        Transition::Changed
    }

    /// The decode failed. Rows appended so far stay.
    pub fn on_decode_error(&mut self, generation: Generation, error: impl Into<String>) -> Transition {
        if !self.is_current(generation) {
            return Transition::Stale;
        }

        let error = error.into();
        warn!(%error, rows_kept = self.dataset.len(), "Decode failed");
        self.loading = false;
        self.error = Some(error);
        Transition::Changed
    }

    /// Route a decoder event to the matching transition.
    pub fn apply(&mut self, event: DecodeEvent) -> Transition {
        let DecodeEvent { generation, kind } = event;
        match kind {
            DecodeEventKind::Batch(rows) => self.on_rows_batch(generation, rows),
            DecodeEventKind::Complete => self.on_decode_complete(generation),
            DecodeEventKind::Error(message) => self.on_decode_error(generation, message),
        }
    }

    /// Select a column and infer its type from the rows held right now.
    ///
    /// An empty name clears the selection.
    pub fn on_column_selected(&mut self, column: &str) -> Transition {
        if column.is_empty() {
            self.selected_column = None;
            self.column_type = None;
            return Transition::Changed;
        }

        let column_type = infer_column_type(&self.dataset, column);
        debug!(column, %column_type, "Column selected");
        self.selected_column = Some(column.to_string());
        self.column_type = Some(column_type);
        Transition::Changed
    }

    /// Return to the initial empty state. Any decode still running becomes stale.
    pub fn reset(&mut self) -> Transition {
        let generation = self.generation.next();
        *self = TableState {
            generation,
            ..TableState::default()
        };
        info!(generation = %generation, "Table reset");
        Transition::Changed
    }

    fn is_current(&self, generation: Generation) -> bool {
        let current = generation == self.generation;
        if !current {
            trace!(event = %generation, current = %self.generation, "Dropping stale decode event");
        }
        current
    }
}
