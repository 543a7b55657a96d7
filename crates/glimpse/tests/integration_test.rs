//! Integration tests for Glimpse.

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tokio::sync::mpsc;

use glimpse::view::{IDLE_PROMPT, LOADING_TEXT, RESET_LABEL};
use glimpse::{
    ColumnType, DecodeEvent, DecodeEventKind, DecoderConfig, GlimpseConfig, IntakeRejection,
    Session, Transition, View, infer_all,
};

/// Helper to create a temporary CSV file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn small_batches(batch_size: usize) -> GlimpseConfig {
    GlimpseConfig {
        decoder: DecoderConfig { batch_size },
        ..GlimpseConfig::default()
    }
}

/// Open `file` and feed every decode event back into the session.
async fn load(session: &mut Session, file: &NamedTempFile) -> Vec<DecodeEvent> {
    let job = session
        .open(&[file.path().to_path_buf()])
        .expect("File should be accepted");

    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(job.run(tx));

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event.clone());
        session.handle_decode(event);
    }
    events
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn test_name_age_scenario() {
    let file = create_test_file("Name,Age\nAlice,30\nBob,25");
    let mut session = Session::default();
    load(&mut session, &file).await;

    let dataset = session.state().dataset();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.rows()[0].iter().collect::<Vec<_>>(), vec![("Name", "Alice"), ("Age", "30")]);
    assert_eq!(dataset.rows()[1].iter().collect::<Vec<_>>(), vec![("Name", "Bob"), ("Age", "25")]);

    session.select_column("Age");
    assert_eq!(session.state().column_type(), Some(ColumnType::Numeric));

    session.select_column("Name");
    assert_eq!(session.state().selected_column(), Some("Name"));
    assert_eq!(session.state().column_type(), Some(ColumnType::Text));
}

#[tokio::test]
async fn test_blank_cell_scenario() {
    let file = create_test_file("Name,Age\nAlice,30\nBob,");
    let mut session = Session::default();
    load(&mut session, &file).await;

    session.select_column("Age");
    assert_eq!(session.state().column_type(), Some(ColumnType::Text));
}

#[tokio::test]
async fn test_reset_after_populated_table() {
    let file = create_test_file("Name,Age\nAlice,30\nBob,25");
    let mut session = Session::default();
    load(&mut session, &file).await;
    session.select_column("Age");

    let view = session.view();
    let table = view.as_table().expect("table view");
    assert_eq!(table.reset_label, RESET_LABEL);
    assert!(table.reset_visible());

    session.reset();
    let state = session.state();
    assert!(state.dataset().is_empty());
    assert!(!state.is_loading());
    assert_eq!(state.selected_column(), None);
    assert_eq!(state.column_type(), None);

    match session.view() {
        View::Intake(intake) => assert_eq!(intake.prompt, IDLE_PROMPT),
        other => panic!("expected intake view, got {other:?}"),
    }
}

// =============================================================================
// Decoding
// =============================================================================

#[tokio::test]
async fn test_batches_then_complete() {
    let mut content = String::from("id,value\n");
    for i in 0..10 {
        content.push_str(&format!("{i},{}\n", i * 2));
    }
    let file = create_test_file(&content);
    let mut session = Session::new(small_batches(4));

    let events = load(&mut session, &file).await;
    let batch_sizes: Vec<usize> = events
        .iter()
        .filter_map(|e| match &e.kind {
            DecodeEventKind::Batch(rows) => Some(rows.len()),
            _ => None,
        })
        .collect();

    assert_eq!(batch_sizes, vec![4, 4, 2]);
    assert_eq!(events.last().map(|e| &e.kind), Some(&DecodeEventKind::Complete));
    assert_eq!(session.state().dataset().len(), 10);
    assert_eq!(session.state().dataset().row(9).and_then(|r| r.get("value")), Some("18"));
}

#[tokio::test]
async fn test_loading_view_before_rows() {
    let file = create_test_file("a\n1\n");
    let mut session = Session::default();
    let _job = session.open(&[file.path().to_path_buf()]).unwrap();

    assert!(session.state().is_loading());
    assert!(matches!(session.view(), View::Loading { message, .. } if message == LOADING_TEXT));
}

#[tokio::test]
async fn test_malformed_file_keeps_partial_rows() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(b"name,score\nAlice,1\nBob,2\n\xc3\x28,3\n").unwrap();
    let mut session = Session::new(small_batches(1));

    let events = load(&mut session, &file).await;
    assert!(matches!(events.last().map(|e| &e.kind), Some(DecodeEventKind::Error(_))));
    assert!(!events.iter().any(|e| e.kind == DecodeEventKind::Complete));

    let state = session.state();
    assert!(!state.is_loading());
    assert_eq!(state.dataset().len(), 2);
    assert!(state.error().is_some());

    let view = session.view();
    assert!(view.as_table().and_then(|t| t.error).is_some());
}

#[tokio::test]
async fn test_header_only_file() {
    let file = create_test_file("Name,Age\n");
    let mut session = Session::default();
    load(&mut session, &file).await;

    assert!(session.state().dataset().is_empty());
    assert!(!session.state().is_loading());
    assert!(matches!(session.view(), View::Intake(_)));
}

#[tokio::test]
async fn test_ragged_rows() {
    let file = create_test_file("a,b,c\n1,2,3\n4,5\n6,7,8,9\n");
    let mut session = Session::default();
    load(&mut session, &file).await;

    let dataset = session.state().dataset();
    assert_eq!(dataset.columns(), ["a", "b", "c"]);
    assert_eq!(dataset.len(), 3);
    assert!(!dataset.rows()[1].contains("c"));
    assert_eq!(dataset.rows()[2].len(), 3);

    // The short row is skipped for inference, not counted as empty.
    session.select_column("c");
    assert_eq!(session.state().column_type(), Some(ColumnType::Numeric));
}

// =============================================================================
// Intake
// =============================================================================

#[tokio::test]
async fn test_rejected_file_leaves_table_alone() {
    let file = create_test_file("Name,Age\nAlice,30\n");
    let mut session = Session::default();
    load(&mut session, &file).await;

    let mut txt = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    txt.write_all(b"x\n1\n").unwrap();

    let err = session.open(&[txt.path().to_path_buf()]).unwrap_err();
    assert!(matches!(err, IntakeRejection::UnsupportedType { .. }));
    assert_eq!(session.state().dataset().len(), 1);
    assert!(!session.state().is_loading());
}

#[tokio::test]
async fn test_multi_file_drop_uses_first() {
    let first = create_test_file("first\n1\n");
    let second = create_test_file("second\n2\n");
    let mut session = Session::default();

    let job = session
        .open(&[first.path().to_path_buf(), second.path().to_path_buf()])
        .unwrap();
    assert_eq!(job.path(), first.path());
}

#[tokio::test]
async fn test_new_file_supersedes_running_decode() {
    let first = create_test_file("old\n1\n2\n");
    let second = create_test_file("new\nx\n");
    let mut session = Session::default();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let old_job = session.open(&[first.path().to_path_buf()]).unwrap();
    tokio::spawn(old_job.run(tx.clone()));
    let new_job = session.open(&[second.path().to_path_buf()]).unwrap();
    tokio::spawn(new_job.run(tx));

    let mut stale = 0;
    while let Some(event) = rx.recv().await {
        if session.handle_decode(event) == Transition::Stale {
            stale += 1;
        }
    }

    assert_eq!(stale, 2);
    assert_eq!(session.state().dataset().columns(), ["new"]);
    assert!(!session.state().is_loading());
}

#[tokio::test]
async fn test_missing_path_rejected() {
    let mut session = Session::default();
    let err = session
        .open(&[PathBuf::from("/nonexistent/dir/data.csv")])
        .unwrap_err();
    assert!(matches!(err, IntakeRejection::NotAFile(_)));
}

// =============================================================================
// Inference over files
// =============================================================================

#[tokio::test]
async fn test_infer_all_columns() {
    let file = create_test_file(
        "id,name,score,notes\n\
         1,Alice,9.5,\n\
         2,Bob,1e2,late\n\
         3,Carol,-0.25,\n",
    );
    let mut session = Session::default();
    load(&mut session, &file).await;

    let types = infer_all(session.state().dataset());
    assert_eq!(types["id"], ColumnType::Numeric);
    assert_eq!(types["name"], ColumnType::Text);
    assert_eq!(types["score"], ColumnType::Numeric);
    assert_eq!(types["notes"], ColumnType::Text);
}

#[tokio::test]
async fn test_whitespace_padded_numbers() {
    let file = create_test_file("n\n\" 1 \"\n 2\n3 \n");
    let mut session = Session::default();
    load(&mut session, &file).await;

    session.select_column("n");
    assert_eq!(session.state().column_type(), Some(ColumnType::Numeric));
}
