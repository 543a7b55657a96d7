//! Session command - interactive viewer on the terminal.
//!
//! Reads one command per line. Dragging a file onto most terminals pastes its
//! path, so a line that is not a command is treated as a drop.

use std::path::PathBuf;

use colored::Colorize;
use glimpse::{DecodeEvent, GlimpseConfig, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::debug;

use crate::render::{TerminalRenderer, render_view};

const HELP: &str = "\
Commands:
  open <path>...     Load a CSV file (only the first path is used)
  drop               Start a drag; the next line is taken as the dropped path(s)
  <path>             Paste or drag a file path to drop it
  select <column>    Show the inferred type of a column
  select             Clear the column selection
  reset              Upload another CSV file
  show               Print the current view again
  help               Show this help
  quit               Leave";

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
enum Input {
    Open(Vec<PathBuf>),
    Drag,
    Select(String),
    Reset,
    Show,
    Help,
    Quit,
    Empty,
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Input::Empty;
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "open" | "o" => Input::Open(split_paths(rest)),
            "drop" | "drag" => Input::Drag,
            "select" | "s" => Input::Select(unquote(rest).to_string()),
            "reset" | "r" => Input::Reset,
            "show" | "ls" => Input::Show,
            "help" | "h" | "?" => Input::Help,
            "quit" | "q" | "exit" => Input::Quit,
            _ => Input::Open(split_paths(line)),
        }
    }
}

/// Split a pasted path list, honoring quotes, backslash escapes and `file://` URIs.
fn split_paths(input: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => quote = Some(c),
            (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            (None, c) if c.is_whitespace() => {
                if !current.is_empty() {
                    paths.push(to_path(&current));
                    current.clear();
                }
            }
            (None, c) => current.push(c),
        }
    }
    if !current.is_empty() {
        paths.push(to_path(&current));
    }
    paths
}

fn to_path(raw: &str) -> PathBuf {
    PathBuf::from(raw.strip_prefix("file://").unwrap_or(raw))
}

fn unquote(s: &str) -> &str {
    for q in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(q).and_then(|s| s.strip_suffix(q)) {
            return inner;
        }
    }
    s
}

pub fn run(file: Option<PathBuf>, config: GlimpseConfig) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(event_loop(file, config))
}

async fn event_loop(
    file: Option<PathBuf>,
    config: GlimpseConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new(config);
    let display = session.config().display.clone();
    session.subscribe(TerminalRenderer::new(display.clone()));

    let (tx, mut rx) = mpsc::unbounded_channel::<DecodeEvent>();

    println!("{}", render_view(&session.view(), &display));
    println!("{}", "Type 'help' for commands.".dimmed());

    if let Some(file) = file {
        open(&mut session, &[file], &tx);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut dragging = false;

    loop {
        tokio::select! {
            Some(event) = rx.recv() => {
                session.handle_decode(event);
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                if dragging {
                    dragging = false;
                    let paths = split_paths(line.trim());
                    if paths.is_empty() {
                        session.drag_leave();
                    } else {
                        open(&mut session, &paths, &tx);
                    }
                    continue;
                }

                match Input::parse(&line) {
                    Input::Open(paths) => open(&mut session, &paths, &tx),
                    Input::Drag => {
                        dragging = true;
                        session.drag_enter();
                    }
                    Input::Select(column) => {
                        session.select_column(&column);
                    }
                    Input::Reset => {
                        session.reset();
                    }
                    Input::Show => println!("{}", render_view(&session.view(), &display)),
                    Input::Help => println!("{}", HELP),
                    Input::Quit => break,
                    Input::Empty => {}
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    debug!("Session ended");
    Ok(())
}

/// Drop files on the session and start decoding on this thread's runtime.
fn open(session: &mut Session, paths: &[PathBuf], events: &UnboundedSender<DecodeEvent>) {
    match session.open(paths) {
        Ok(job) => {
            debug!(path = %job.path().display(), generation = %job.generation(), "Starting decode");
            tokio::spawn(job.run(events.clone()));
        }
        Err(rejection) => {
            println!("{} {}", "Rejected:".red().bold(), rejection);
        }
    }
}
