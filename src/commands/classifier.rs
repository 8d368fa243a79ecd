//! # Classifier Command Implementation
//!
//! This module implements the `classifier` subcommand, which replaces a
//! `${property}` placeholder inside dependency classifiers across a solution
//! and saves every descriptor.

use anyhow::Result;
use clap::Args;

use pomtree::actions::ApplyClassifier;

use super::{open_solution, save_solution, SolutionArgs};

/// Substitute a ${property} placeholder in dependency classifiers
#[derive(Args, Debug)]
pub struct ClassifierArgs {
    #[command(flatten)]
    pub solution: SolutionArgs,

    /// Property name inside the placeholder, without `${}`.
    #[arg(long, value_name = "NAME")]
    pub property: String,

    /// Replacement value.
    #[arg(long, value_name = "VALUE")]
    pub value: String,

    /// Report what would change without writing any file.
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the `classifier` command.
pub fn execute(args: ClassifierArgs) -> Result<()> {
    let mut solution = open_solution(&args.solution)?;
    let changed = solution.apply(&ApplyClassifier::new(&args.property, &args.value))?;
    println!(
        "Replaced ${{{}}} in {} classifier(s)",
        args.property, changed
    );
    save_solution(&mut solution, args.dry_run)
}
