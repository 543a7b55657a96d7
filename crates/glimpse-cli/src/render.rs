//! Terminal rendering of the viewer.

use std::io::{self, Write};

use colored::Colorize;
use comfy_table::{Attribute, Cell, Table};
use glimpse::view::{LOADING_TEXT, SELECT_LABEL, SELECT_PLACEHOLDER};
use glimpse::{DisplayConfig, IntakeView, StateObserver, TableView, View};

/// Apply the color preference to everything printed with `colored`.
pub fn configure_color(display: &DisplayConfig) {
    if !display.color {
        colored::control::set_override(false);
    }
}

/// Prints the view after every state change.
///
/// Terminal output only grows, so while a file is loading each new batch
/// prints a single progress line. The full table is printed once loading
/// ends, and again for any change that is not new rows.
pub struct TerminalRenderer<W = io::Stdout> {
    display: DisplayConfig,
    out: W,
    rows_shown: usize,
}

impl TerminalRenderer {
    pub fn new(display: DisplayConfig) -> Self {
        Self::with_writer(display, io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(display: DisplayConfig, out: W) -> Self {
        Self {
            display,
            out,
            rows_shown: 0,
        }
    }

    fn render(&mut self, view: &View<'_>) -> String {
        let Some(table) = view.as_table() else {
            self.rows_shown = 0;
            return render_view(view, &self.display);
        };

        let rows = table.rows.len();
        let grew = rows != self.rows_shown;
        self.rows_shown = rows;

        if table.loading && grew {
            progress_line(rows)
        } else {
            render_view(view, &self.display)
        }
    }
}

impl<W: Write> StateObserver for TerminalRenderer<W> {
    fn state_changed(&mut self, view: &View<'_>) {
        let text = self.render(view);
        let _ = writeln!(self.out, "{}", text);
    }
}

fn progress_line(rows: usize) -> String {
    format!("{} {}", LOADING_TEXT.yellow(), format!("{} rows so far", rows).dimmed())
}

/// Render a view to text.
pub fn render_view(view: &View<'_>, display: &DisplayConfig) -> String {
    match view {
        View::Intake(intake) => render_intake(intake),
        View::Loading { message, file } => match file {
            Some(file) => format!("{} {}", message.yellow(), format!("({})", file).dimmed()),
            None => message.yellow().to_string(),
        },
        View::Table(table) => render_table(table, display),
    }
}

fn render_intake(intake: &IntakeView<'_>) -> String {
    let border = "- ".repeat(34);
    let prompt = if intake.drag_active {
        intake.prompt.cyan().bold()
    } else {
        intake.prompt.normal()
    };

    let mut out = format!("{}\n\n    {}\n\n{}", border.dimmed(), prompt, border.dimmed());
    if let Some(error) = intake.error {
        out.push('\n');
        out.push_str(&error_line(error));
    }
    out
}

fn render_table(view: &TableView<'_>, display: &DisplayConfig) -> String {
    let mut lines = Vec::new();

    // Title bar with the reset action
    let mut title = view.title.cyan().bold().to_string();
    if let Some(source) = view.source {
        title.push_str(&format!("  {}", source.file.white()));
    }
    if view.reset_visible() {
        title.push_str(&format!(
            "    {}",
            format!("[{}] (reset)", view.reset_label).yellow()
        ));
    }
    lines.push(title);
    lines.push(String::new());

    // Column selector
    let selected = view.selected_column.unwrap_or(SELECT_PLACEHOLDER);
    let options = view
        .columns
        .iter()
        .map(|c| {
            if Some(c.as_str()) == view.selected_column {
                format!("[{}]", c).green().bold().to_string()
            } else {
                c.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ");
    lines.push(format!("{} {}    {}", SELECT_LABEL, selected.bold(), options.dimmed()));
    if let Some(type_line) = view.type_line() {
        lines.push(type_line.green().to_string());
    }
    lines.push(String::new());

    // Data
    let mut table = Table::new();
    if !display.color {
        table.force_no_tty();
    }
    table.set_header(
        view.columns
            .iter()
            .map(|c| Cell::new(c).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );

    let limit = if display.max_rows == 0 {
        view.rows.len()
    } else {
        display.max_rows.min(view.rows.len())
    };
    for row in &view.rows[..limit] {
        table.add_row(view.cells(row).collect::<Vec<_>>());
    }
    lines.push(table.to_string());

    let hidden = view.rows.len() - limit;
    if hidden > 0 {
        lines.push(format!("... {} more rows", hidden).dimmed().to_string());
    }
    lines.push(format!("{} rows", view.rows.len()).green().to_string());
    if view.loading {
        lines.push("Still loading...".yellow().to_string());
    }
    if let Some(error) = view.error {
        lines.push(error_line(error));
    }

    lines.join("\n")
}

fn error_line(error: &str) -> String {
    format!("{} {}", "Could not read the whole file:".red().bold(), error.red())
}
