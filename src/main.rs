#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod app;
mod cli;

use cli::commands::Cli;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    app::dispatch::dispatch(cli)
}
