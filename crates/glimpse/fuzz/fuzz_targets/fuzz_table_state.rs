//! Fuzz target for table state transitions.
//!
//! Drives the state with arbitrary event sequences, including events from
//! superseded decodes, and checks the invariants after every step.

#![no_main]

use std::path::PathBuf;

use arbitrary::Arbitrary;
use glimpse::{Row, SourceMetadata, TableState, Transition};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Step {
    Accept,
    Batch { stale: bool, values: Vec<String> },
    Complete { stale: bool },
    Fail { stale: bool },
    Select(String),
    Reset,
}

fuzz_target!(|steps: Vec<Step>| {
    let mut state = TableState::new();
    let first = state.generation();

    for step in steps {
        let generation = state.generation();
        let rows_before = state.dataset().len();
        let loading_before = state.is_loading();
        let target = |stale: bool| if stale { first } else { generation };

        let transition = match step {
            Step::Accept => {
                state.on_file_accepted(SourceMetadata::new(PathBuf::from("fuzz.csv"), 0, "text/csv"));
                Transition::Changed
            }
            Step::Batch { stale, values } => {
                let rows = values
                    .into_iter()
                    .map(|v| [("value", v)].into_iter().collect::<Row>())
                    .collect();
                state.on_rows_batch(target(stale), rows)
            }
            Step::Complete { stale } => state.on_decode_complete(target(stale)),
            Step::Fail { stale } => state.on_decode_error(target(stale), "fuzz"),
            Step::Select(column) => state.on_column_selected(&column),
            Step::Reset => state.reset(),
        };

        if transition == Transition::Stale {
            assert_ne!(state.generation(), first);
            assert_eq!(state.dataset().len(), rows_before);
            assert_eq!(state.is_loading(), loading_before);
        }
        assert_eq!(state.selected_column().is_some(), state.column_type().is_some());
    }
});
