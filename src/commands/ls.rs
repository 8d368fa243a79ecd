//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which lists every descriptor
//! loaded into a solution with its effective coordinates.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;

use super::{open_solution, SolutionArgs};

/// List every descriptor of a solution
#[derive(Args, Debug)]
pub struct LsArgs {
    #[command(flatten)]
    pub solution: SolutionArgs,

    /// Show only snapshot projects.
    #[arg(long)]
    pub snapshots: bool,

    /// Show only the total count of descriptors.
    #[arg(long)]
    pub count: bool,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs) -> Result<()> {
    let solution = open_solution(&args.solution)?;

    let mut lines = Vec::new();
    for (index, item) in solution.items().iter().enumerate() {
        let resolved = solution.resolved(index);
        if args.snapshots && resolved.is_snapshot != Some(true) {
            continue;
        }
        let path = item
            .path
            .strip_prefix(solution.base_dir())
            .unwrap_or(&item.path);
        lines.push(format!(
            "{}:{}:{}\t{}",
            resolved.group_id.as_deref().unwrap_or("?"),
            item.project.reference.artifact_id.as_deref().unwrap_or("?"),
            resolved.version,
            path.display()
        ));
    }

    if args.count {
        println!("{}", lines.len());
    } else {
        for line in lines {
            println!("{}", line);
        }
    }
    Ok(())
}
