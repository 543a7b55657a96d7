//! File intake and CSV decoding.

mod decoder;
mod intake;
mod source;

pub use decoder::{CsvDecoder, DecodeEvent, DecodeEventKind, DecodeJob, RowBatches};
pub use intake::{AcceptedFile, FileIntake, IntakeRejection};
pub use source::SourceMetadata;
