//! Header-aware CSV decoding in batches.
//!
//! The first record names the columns, blank lines are skipped, and records
//! are turned into [`Row`]s a batch at a time. [`DecodeJob::run`] drives the
//! decode on the async runtime and reports progress as [`DecodeEvent`]s
//! tagged with the generation the job was started under.

use std::io::{Cursor, Read};
use std::path::Path;

use csv::StringRecord;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use super::intake::AcceptedFile;
use crate::config::DecoderConfig;
use crate::error::Result;
use crate::table::{Generation, Row};

/// Something that happened while decoding a file.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeEvent {
    /// The decode this event belongs to.
    pub generation: Generation,
    pub kind: DecodeEventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DecodeEventKind {
    /// More rows, in file order.
    Batch(Vec<Row>),
    /// The whole file was decoded.
    Complete,
    /// Reading or parsing failed; no further events follow.
    Error(String),
}

impl DecodeEvent {
    pub fn batch(generation: Generation, rows: Vec<Row>) -> Self {
        Self {
            generation,
            kind: DecodeEventKind::Batch(rows),
        }
    }

    pub fn complete(generation: Generation) -> Self {
        Self {
            generation,
            kind: DecodeEventKind::Complete,
        }
    }

    pub fn error(generation: Generation, message: impl Into<String>) -> Self {
        Self {
            generation,
            kind: DecodeEventKind::Error(message.into()),
        }
    }

    /// Whether no more events will follow this one.
    pub fn is_final(&self) -> bool {
        !matches!(self.kind, DecodeEventKind::Batch(_))
    }
}

/// Decodes CSV with a header row into batches of rows.
#[derive(Debug, Clone, Default)]
pub struct CsvDecoder {
    config: DecoderConfig,
}

impl CsvDecoder {
    /// Create a decoder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with custom configuration.
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Iterate over batches of rows read from `reader`.
    pub fn batches<R: Read>(&self, reader: R) -> RowBatches<R> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        RowBatches {
            reader,
            headers: None,
            batch_size: self.config.batch_size.max(1),
            record: StringRecord::new(),
            finished: false,
            extra_fields_seen: false,
        }
    }

    /// Decode a whole in-memory document.
    pub fn decode_bytes(&self, bytes: &[u8]) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        for batch in self.batches(bytes) {
            rows.extend(batch?);
        }
        Ok(rows)
    }

    /// Decode a whole in-memory document.
    pub fn decode_str(&self, text: &str) -> Result<Vec<Row>> {
        self.decode_bytes(text.as_bytes())
    }
}

/// Iterator over decoded batches. Stops after the first error.
pub struct RowBatches<R> {
    reader: csv::Reader<R>,
    headers: Option<Vec<String>>,
    batch_size: usize,
    record: StringRecord,
    finished: bool,
    extra_fields_seen: bool,
}

impl<R: Read> RowBatches<R> {
    fn read_headers(&mut self) -> Result<Vec<String>> {
        let headers = self.reader.headers()?;
        Ok(unique_headers(headers.iter()))
    }

    fn next_batch(&mut self, headers: &[String]) -> Result<Vec<Row>> {
        let mut batch = Vec::with_capacity(self.batch_size);

        while batch.len() < self.batch_size {
            if !self.reader.read_record(&mut self.record)? {
                self.finished = true;
                break;
            }

            if self.record.len() > headers.len() && !self.extra_fields_seen {
                self.extra_fields_seen = true;
                warn!(
                    line = self.record.position().map(|p| p.line()),
                    expected = headers.len(),
                    found = self.record.len(),
                    "Record has more fields than the header; extra fields are dropped"
                );
            }

            // Zipping leaves out keys past the end of a short record.
            let row = headers
                .iter()
                .zip(self.record.iter())
                .map(|(column, value)| (column.as_str(), value))
                .collect::<Row>();
            batch.push(row);
        }

        Ok(batch)
    }
}

impl<R: Read> Iterator for RowBatches<R> {
    type Item = Result<Vec<Row>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let headers = match self.headers.take() {
            Some(headers) => headers,
            None => match self.read_headers() {
                Ok(headers) => headers,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            },
        };

        let result = self.next_batch(&headers);
        self.headers = Some(headers);

        match result {
            Ok(batch) if batch.is_empty() => None,
            Ok(batch) => Some(Ok(batch)),
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Give repeated header names a `_1`, `_2`, ... suffix so every field keeps a key.
fn unique_headers<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for name in names {
        let mut candidate = name.to_string();
        let mut suffix = 1;
        while headers.contains(&candidate) {
            candidate = format!("{name}_{suffix}");
            suffix += 1;
        }
        headers.push(candidate);
    }
    headers
}

/// One file's decode, bound to the generation it was started under.
#[derive(Debug, Clone)]
pub struct DecodeJob {
    generation: Generation,
    file: AcceptedFile,
    decoder: CsvDecoder,
}

impl DecodeJob {
    pub fn new(generation: Generation, file: AcceptedFile, decoder: CsvDecoder) -> Self {
        Self {
            generation,
            file,
            decoder,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn path(&self) -> &Path {
        &self.file.path
    }

    /// Read and decode the file, sending events to `events`.
    ///
    /// Yields to the runtime after every batch. Sends either one `Complete`
    /// or one `Error` at the end, and stops early if the receiver is gone.
    pub async fn run(self, events: UnboundedSender<DecodeEvent>) {
        let generation = self.generation;

        let bytes = match tokio::fs::read(&self.file.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                let message = format!("IO error for '{}': {}", self.file.path.display(), e);
                let _ = events.send(DecodeEvent::error(generation, message));
                return;
            }
        };

        let mut rows = 0;
        for batch in self.decoder.batches(Cursor::new(bytes)) {
            match batch {
                Ok(batch) => {
                    rows += batch.len();
                    debug!(generation = %generation, rows, "Decoded batch");
                    if events.send(DecodeEvent::batch(generation, batch)).is_err() {
                        return;
                    }
                    tokio::task::yield_now().await;
                }
                Err(e) => {
                    let _ = events.send(DecodeEvent::error(generation, e.to_string()));
                    return;
                }
            }
        }

        let _ = events.send(DecodeEvent::complete(generation));
    }
}
