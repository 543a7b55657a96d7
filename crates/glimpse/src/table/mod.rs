//! Decoded rows and the state machine that owns them.

mod row;
mod state;

pub use row::{Dataset, Row};
pub use state::{Generation, TableState, Transition};
