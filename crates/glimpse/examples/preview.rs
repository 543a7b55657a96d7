//! Example: Load a CSV file and print its column types.
//!
//! Usage:
//!   cargo run --example preview -- <file_path> [column]
//!
//! Example:
//!   cargo run --example preview -- people.csv Age

use std::env;
use std::path::PathBuf;

use glimpse::{GlimpseConfig, Session, View, infer_all};
use tokio::sync::mpsc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> glimpse::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example preview -- <file_path> [column]");
        std::process::exit(1);
    }

    let mut session = Session::new(GlimpseConfig::default());
    session.subscribe(|view: &View<'_>| match view {
        View::Loading { message, .. } => println!("{}", message),
        View::Table(table) if table.loading => println!("  ... {} rows so far", table.rows.len()),
        _ => {}
    });

    let job = session.open(&[PathBuf::from(&args[1])])?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(job.run(tx));
    while let Some(event) = rx.recv().await {
        session.handle_decode(event);
    }

    let state = session.state();
    if let Some(error) = state.error() {
        eprintln!("Decode stopped early: {}", error);
    }

    let separator = "=".repeat(60);
    println!("{}", separator);
    println!("{} ({} rows)", args[1], state.dataset().len());
    println!("{}", separator);
    for (column, column_type) in infer_all(state.dataset()) {
        println!("  {:30} {}", column, column_type);
    }

    if let Some(column) = args.get(2) {
        session.select_column(column);
        if let Some(line) = session.view().as_table().and_then(|t| t.type_line()) {
            println!();
            println!("{}", line);
        }
    }

    Ok(())
}
