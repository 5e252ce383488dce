//! `runlog` command-line front-end.
//!
//! # Responsibility
//! - Parse flags/env into settings and dispatch one command per process.
//! - Act as the form, renderer and file collaborator of `runlog_core`.

mod args;
mod commands;
mod render;

use args::Cli;
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = commands::run(cli) {
        log::error!("event=command module=cli status=error error={err:#}");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
