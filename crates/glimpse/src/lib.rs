//! Glimpse: drop in a CSV file, browse its rows, and infer column types.
//!
//! A [`Session`] owns the table state for one viewer. Files go through
//! [`FileIntake`] (one CSV file per drop), are decoded in batches by
//! [`CsvDecoder`], and land in [`TableState`]. Picking a column runs the
//! [`inference`] heuristic, which classifies the column as Numeric, Text or
//! Unknown. [`View`] turns the state into something a front end can render.
//!
//! # Example
//!
//! ```no_run
//! use glimpse::{ColumnType, DecodeEvent, GlimpseConfig, Session};
//! use tokio::sync::mpsc;
//!
//! # async fn demo() -> glimpse::Result<()> {
//! let mut session = Session::new(GlimpseConfig::default());
//! let (tx, mut rx) = mpsc::unbounded_channel::<DecodeEvent>();
//!
//! let job = session.open(&["people.csv".into()])?;
//! job.run(tx).await;
//! while let Some(event) = rx.recv().await {
//!     session.handle_decode(event);
//! }
//!
//! session.select_column("Age");
//! assert_eq!(session.state().column_type(), Some(ColumnType::Numeric));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod inference;
pub mod input;
pub mod table;
pub mod view;

mod session;

pub use config::{DecoderConfig, DisplayConfig, GlimpseConfig, IntakeConfig};
pub use error::{GlimpseError, Result};
pub use inference::{ColumnType, infer_all, infer_column_type, is_numeric_value};
pub use input::{
    AcceptedFile, CsvDecoder, DecodeEvent, DecodeEventKind, DecodeJob, FileIntake,
    IntakeRejection, SourceMetadata,
};
pub use session::{Session, StateObserver};
pub use table::{Dataset, Generation, Row, TableState, Transition};
pub use view::{IntakeView, TableView, View};
