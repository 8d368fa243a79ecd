//! # Release Command Implementation
//!
//! This module implements the `release` subcommand. Every snapshot project
//! of the solution becomes a release, optionally qualified, and references
//! to those projects inside the solution follow.

use anyhow::Result;
use clap::Args;

use pomtree::actions::SwitchToRelease;

use super::{open_solution, save_solution, SolutionArgs};

/// Switch snapshot versions to releases
#[derive(Args, Debug)]
pub struct ReleaseArgs {
    #[command(flatten)]
    pub solution: SolutionArgs,

    /// Qualifier appended to each release version (e.g. `rc1`).
    #[arg(long, value_name = "QUALIFIER")]
    pub qualifier: Option<String>,

    /// Report what would change without writing any file.
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the `release` command.
pub fn execute(args: ReleaseArgs) -> Result<()> {
    let mut solution = open_solution(&args.solution)?;
    let changed = solution.apply(&SwitchToRelease {
        qualifier: args.qualifier,
    })?;
    println!("Released {} project(s)", changed);
    save_solution(&mut solution, args.dry_run)
}
