//! Infer command - print the inferred type of every column.

use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{Attribute, Cell, Table};
use glimpse::{ColumnType, GlimpseConfig, infer_all};

pub fn run(
    file: PathBuf,
    json_output: bool,
    config: GlimpseConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let color = config.display.color;
    let session = super::load_file(file, config)?;
    let state = session.state();
    let types = infer_all(state.dataset());

    if json_output {
        let report = serde_json::json!({
            "file": state.source().map(|s| s.file.clone()),
            "rows": state.dataset().len(),
            "columns": types,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let file = state.source().map(|s| s.file.as_str()).unwrap_or_default();
        println!(
            "{} {} ({} rows)",
            "Column types for".cyan().bold(),
            file.white(),
            state.dataset().len()
        );

        let mut table = Table::new();
        if !color {
            table.force_no_tty();
        }
        table.set_header(vec![
            Cell::new("Column").add_attribute(Attribute::Bold),
            Cell::new("Type").add_attribute(Attribute::Bold),
        ]);
        for (column, column_type) in &types {
            let label = match column_type {
                ColumnType::Numeric => column_type.label().green(),
                ColumnType::Text => column_type.label().blue(),
                ColumnType::Unknown => column_type.label().dimmed(),
            };
            table.add_row(vec![column.clone(), label.to_string()]);
        }
        println!("{table}");
    }

    match state.error() {
        Some(error) => Err(format!("decode stopped early: {}", error).into()),
        None => Ok(()),
    }
}
