//! CLI argument definitions using clap.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Glimpse: drop in a CSV file, browse its rows, and infer column types
#[derive(Parser)]
#[command(name = "glimpse")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// CSV file to open in an interactive session
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file (default: <config dir>/glimpse/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive session: drop files, pick columns, reset
    Session {
        /// CSV file to open right away
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Load a CSV file and print the table once
    View {
        /// Path to the CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Column to infer the type of
        #[arg(short, long)]
        column: Option<String>,

        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the inferred type of every column
    Infer {
        /// Path to the CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
