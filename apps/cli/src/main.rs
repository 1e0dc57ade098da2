//! stima CLI — cost and timeline summary for markdown quotes.
//!
//! Reads the phases of a quote document, prices them, and writes the
//! summary back into the document, to stdout, to a file, and/or to the
//! clipboard.

mod clipboard;
mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
