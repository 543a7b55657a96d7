//! CLI command implementations.

pub mod infer;
pub mod session;
pub mod view;

use std::path::PathBuf;

use glimpse::{GlimpseConfig, Session};
use tokio::sync::mpsc;

/// Open `file` in a fresh session and decode it to the end.
///
/// A decode failure is not an error here: the rows read before it stay in the
/// session and the failure is recorded in its state.
pub(crate) fn load_file(
    file: PathBuf,
    config: GlimpseConfig,
) -> Result<Session, Box<dyn std::error::Error>> {
    let mut session = Session::new(config);
    let job = session.open(&[file])?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::spawn(job.run(tx));
        while let Some(event) = rx.recv().await {
            session.handle_decode(event);
        }
    });

    Ok(session)
}
