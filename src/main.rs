mod cli;
mod commands;
mod logging;
mod model;
mod stats;
mod storage;
mod ui;
mod view;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let command = args.command.unwrap_or(cli::Command::Tui);
    if !matches!(command, cli::Command::Tui) {
        logging::init_stderr(args.verbose)?;
    }
    let store = args.store;
    match command {
        cli::Command::Init => commands::init(),
        cli::Command::List { category } => commands::list(store, category),
        cli::Command::Add { text, category } => commands::add(store, text, category),
        cli::Command::Done { position, undo } => commands::done(store, position, undo),
        cli::Command::Edit { position, text } => commands::edit(store, position, text),
        cli::Command::Rm { position } => commands::remove(store, position),
        cli::Command::Stats => commands::stats(store),
        cli::Command::Tui => commands::tui(store, args.verbose),
    }
}
