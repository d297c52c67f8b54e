//! `folio` executable: admin operations over the portfolio document.
//!
//! # Responsibility
//! - Parse arguments and hand off to command dispatch.
//! - Map failures to a non-zero exit with the full error chain.

mod cli;
mod commands;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
