//! Glimpse CLI - drop in a CSV file, browse it, and infer column types.

mod cli;
mod commands;
mod logging;
mod render;

use clap::Parser;
use cli::{Cli, Commands};
use glimpse::GlimpseConfig;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match GlimpseConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    render::configure_color(&config.display);

    let result = match cli.command {
        None => commands::session::run(cli.file, config),
        Some(Commands::Session { file }) => commands::session::run(file, config),
        Some(Commands::View { file, column, json }) => {
            commands::view::run(file, column, json, config)
        }
        Some(Commands::Infer { file, json }) => commands::infer::run(file, json, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
