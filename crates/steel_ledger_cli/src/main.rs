//! Text front-end for the steel ledger core.
//!
//! # Responsibility
//! - Collect arguments, hand them to core use cases, print what comes back.
//! - Hold no state of its own between invocations.

use clap::Parser;

mod cli;
mod commands;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    commands::run_command(cli)
}
