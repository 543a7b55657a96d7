//! The viewer component: owns the table state and tells observers about changes.

use std::path::PathBuf;

use crate::config::GlimpseConfig;
use crate::input::{CsvDecoder, DecodeEvent, DecodeJob, FileIntake, IntakeRejection};
use crate::table::{TableState, Transition};
use crate::view::View;

/// Receives the fresh view after every state change.
pub trait StateObserver {
    fn state_changed(&mut self, view: &View<'_>);
}

impl<F> StateObserver for F
where
    F: FnMut(&View<'_>),
{
    fn state_changed(&mut self, view: &View<'_>) {
        self(view)
    }
}

/// One viewer instance.
///
/// The session never spawns anything itself: [`Session::open`] hands back a
/// [`DecodeJob`] for the caller to run, and the caller feeds the job's events
/// back through [`Session::handle_decode`].
pub struct Session {
    config: GlimpseConfig,
    intake: FileIntake,
    decoder: CsvDecoder,
    state: TableState,
    observers: Vec<Box<dyn StateObserver>>,
}

impl Session {
    /// Create a session with an empty table.
    pub fn new(config: GlimpseConfig) -> Self {
        Self {
            intake: FileIntake::new(config.intake.clone()),
            decoder: CsvDecoder::with_config(config.decoder.clone()),
            state: TableState::new(),
            observers: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &GlimpseConfig {
        &self.config
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// The current view.
    pub fn view(&self) -> View<'_> {
        View::from_state(&self.state, self.intake.is_drag_active())
    }

    /// Register an observer. It is called after every change, not immediately.
    pub fn subscribe(&mut self, observer: impl StateObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// A drag entered the drop surface.
    pub fn drag_enter(&mut self) {
        if !self.intake.is_drag_active() {
            self.intake.drag_enter();
            self.notify();
        }
    }

    /// The drag left without a drop.
    pub fn drag_leave(&mut self) {
        if self.intake.is_drag_active() {
            self.intake.drag_leave();
            self.notify();
        }
    }

    /// Drop or select files. Only the first is used.
    ///
    /// On success the table is cleared, loading starts, and the returned job
    /// must be run to actually decode the file. A rejected drop leaves the
    /// table untouched.
    pub fn open(&mut self, paths: &[PathBuf]) -> Result<DecodeJob, IntakeRejection> {
        let was_dragging = self.intake.is_drag_active();

        let file = match self.intake.accept(paths) {
            Ok(file) => file,
            Err(rejection) => {
                if was_dragging {
                    self.notify();
                }
                return Err(rejection);
            }
        };

        let generation = self.state.on_file_accepted(file.source.clone());
        self.notify();
        Ok(DecodeJob::new(generation, file, self.decoder.clone()))
    }

    /// Apply an event from a decode job.
    pub fn handle_decode(&mut self, event: DecodeEvent) -> Transition {
        let transition = self.state.apply(event);
        if transition.is_changed() {
            self.notify();
        }
        transition
    }

    /// Select a column (empty name clears the selection).
    pub fn select_column(&mut self, column: &str) -> Transition {
        let transition = self.state.on_column_selected(column);
        self.notify();
        transition
    }

    /// Clear everything and go back to the drop surface.
    pub fn reset(&mut self) -> Transition {
        let transition = self.state.reset();
        self.notify();
        transition
    }

    fn notify(&mut self) {
        let view = View::from_state(&self.state, self.intake.is_drag_active());
        for observer in &mut self.observers {
            observer.state_changed(&view);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GlimpseConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::ColumnType;
    use crate::input::DecodeEventKind;
    use std::cell::RefCell;
    use std::io::Write;
    use std::rc::Rc;
    use tokio::sync::mpsc;

    fn csv_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    /// Records a short label for every view an observer sees.
    fn recorder(session: &mut Session) -> Rc<RefCell<Vec<String>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session.subscribe(move |view: &View<'_>| {
            let label = match view {
                View::Intake(intake) if intake.drag_active => "drag".to_string(),
                View::Intake(_) => "intake".to_string(),
                View::Loading { .. } => "loading".to_string(),
                View::Table(table) => format!("table:{}", table.rows.len()),
            };
            sink.borrow_mut().push(label);
        });
        seen
    }

    async fn run_to_end(session: &mut Session, job: DecodeJob) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        job.run(tx).await;
        while let Some(event) = rx.recv().await {
            session.handle_decode(event);
        }
    }

    #[tokio::test]
    async fn test_open_decode_select() {
        let file = csv_file("Name,Age\nAlice,30\nBob,25");
        let mut session = Session::default();
        let seen = recorder(&mut session);

        let job = session.open(&[file.path().to_path_buf()]).unwrap();
        run_to_end(&mut session, job).await;

        session.select_column("Age");
        assert_eq!(session.state().column_type(), Some(ColumnType::Numeric));
        session.select_column("Name");
        assert_eq!(session.state().column_type(), Some(ColumnType::Text));

        assert_eq!(
            *seen.borrow(),
            vec!["loading", "table:2", "table:2", "table:2", "table:2"]
        );
    }

    #[test]
    fn test_job_is_bound_to_current_generation() {
        let file = csv_file("a\n1\n");
        let mut config = GlimpseConfig::default();
        config.decoder.batch_size = 7;
        let mut session = Session::new(config.clone());
        assert_eq!(session.config(), &config);

        let first = session.open(&[file.path().to_path_buf()]).unwrap();
        let second = session.open(&[file.path().to_path_buf()]).unwrap();
        assert_eq!(second.path(), file.path());
        assert_eq!(second.generation(), session.state().generation());
        assert!(first.generation() < second.generation());
    }

    #[tokio::test]
    async fn test_rejected_drop_changes_nothing() {
        let mut session = Session::default();
        let seen = recorder(&mut session);

        let err = session.open(&[PathBuf::from("notes.txt")]).unwrap_err();
        assert!(matches!(err, IntakeRejection::UnsupportedType { .. }));
        assert!(!session.state().is_loading());
        assert!(seen.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_drag_then_rejected_drop_clears_drag() {
        let mut session = Session::default();
        let seen = recorder(&mut session);

        session.drag_enter();
        session.drag_enter();
        let _ = session.open(&[PathBuf::from("notes.txt")]);

        assert_eq!(*seen.borrow(), vec!["drag", "intake"]);
    }

    #[tokio::test]
    async fn test_superseded_decode_is_ignored() {
        let first = csv_file("a\n1\n2\n3\n");
        let second = csv_file("b\nx\n");
        let mut session = Session::default();

        let old_job = session.open(&[first.path().to_path_buf()]).unwrap();
        let new_job = session.open(&[second.path().to_path_buf()]).unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        old_job.run(tx.clone()).await;
        new_job.run(tx).await;

        let mut stale = 0;
        while let Some(event) = rx.recv().await {
            if session.handle_decode(event) == Transition::Stale {
                stale += 1;
            }
        }

        assert_eq!(stale, 2);
        assert_eq!(session.state().dataset().columns(), ["b"]);
        assert_eq!(session.state().dataset().len(), 1);
        assert!(!session.state().is_loading());
    }

    #[tokio::test]
    async fn test_reset_mid_decode() {
        let file = csv_file("a\n1\n");
        let mut session = Session::default();
        let job = session.open(&[file.path().to_path_buf()]).unwrap();
        session.reset();

        run_to_end(&mut session, job).await;
        assert!(session.state().dataset().is_empty());
        assert!(!session.state().is_loading());
        assert!(matches!(session.view(), View::Intake(_)));
    }

    #[tokio::test]
    async fn test_missing_file_reports_error() {
        let file = csv_file("a\n1\n");
        let path = file.path().to_path_buf();
        let mut session = Session::default();
        let job = session.open(&[path]).unwrap();
        drop(file);

        let (tx, mut rx) = mpsc::unbounded_channel();
        job.run(tx).await;
        let event = rx.recv().await.unwrap();
        assert!(matches!(event.kind, DecodeEventKind::Error(_)));

        session.handle_decode(event);
        assert!(!session.state().is_loading());
        assert!(session.state().error().is_some());
    }
}
