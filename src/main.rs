//! # pomtree CLI
//!
//! This is the binary entry point for the `pomtree` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging from the global `--log-level` flag.
//! - Executing the appropriate command and reporting errors.
//!
//! The descriptor model, tree loading and transformations live in the
//! `pomtree` library crate; the binary is a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
