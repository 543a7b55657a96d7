//! View command - load a file and print the table once.

use std::path::PathBuf;

use glimpse::GlimpseConfig;

use crate::render::render_view;

pub fn run(
    file: PathBuf,
    column: Option<String>,
    json_output: bool,
    config: GlimpseConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let display = config.display.clone();
    let mut session = super::load_file(file, config)?;

    if let Some(column) = column {
        session.select_column(&column);
    }

    let view = session.view();
    if json_output {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", render_view(&view, &display));
    }

    match session.state().error() {
        Some(error) => Err(format!("decode stopped early: {}", error).into()),
        None => Ok(()),
    }
}
