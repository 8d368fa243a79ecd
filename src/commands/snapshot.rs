//! # Snapshot Command Implementation
//!
//! This module implements the `snapshot` subcommand. Every release project
//! of the solution moves to the next snapshot version, and references to
//! those projects inside the solution follow.

use anyhow::Result;
use clap::Args;

use pomtree::actions::SwitchToSnapshot;

use super::{open_solution, save_solution, SolutionArgs};

/// Switch release versions to the next snapshot
#[derive(Args, Debug)]
pub struct SnapshotArgs {
    #[command(flatten)]
    pub solution: SolutionArgs,

    /// Report what would change without writing any file.
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the `snapshot` command.
pub fn execute(args: SnapshotArgs) -> Result<()> {
    let mut solution = open_solution(&args.solution)?;
    let changed = solution.apply(&SwitchToSnapshot)?;
    println!("Moved {} project(s) to the next snapshot", changed);
    save_solution(&mut solution, args.dry_run)
}
