//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `pomtree` command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic.
//!
//! Commands that open a solution share [`SolutionArgs`] and
//! [`open_solution`]; commands that rewrite descriptors finish with
//! [`save_solution`].

pub mod classifier;
pub mod completions;
pub mod ls;
pub mod release;
pub mod snapshot;
pub mod tree;

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use pomtree::config::{self, Config};
use pomtree::solution::Solution;

/// Arguments shared by every command that opens a solution
#[derive(Args, Debug, Clone)]
pub struct SolutionArgs {
    /// Entry descriptor, or a directory containing one.
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Load every descriptor under the base directory instead of following
    /// module and parent links.
    #[arg(long)]
    pub disconnected: bool,

    /// Path to a .pomtree.yaml configuration file.
    ///
    /// Defaults to `.pomtree.yaml` in the entry directory, if present.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl SolutionArgs {
    fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => config::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display())),
            None => {
                let dir = if self.path.is_dir() {
                    self.path.as_path()
                } else {
                    self.path.parent().unwrap_or(Path::new("."))
                };
                let dir = if dir.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    dir
                };
                config::discover(dir).context("Failed to load .pomtree.yaml")
            }
        }
    }
}

/// Open the solution described by `args`. Flags override the config file.
pub fn open_solution(args: &SolutionArgs) -> Result<Solution> {
    let config = args.load_config()?;
    let disconnected = args.disconnected || config.disconnected;
    Solution::open_in(
        pomtree::filesystem::DiskFS::new(),
        &args.path,
        disconnected,
        &config,
    )
    .with_context(|| format!("Failed to open solution at {}", args.path.display()))
}

/// Write every descriptor back, or report what would change.
pub fn save_solution(solution: &mut Solution, dry_run: bool) -> Result<()> {
    if dry_run {
        let mut pending = 0;
        for ((path, content), item) in solution.preview_all()?.iter().zip(solution.items()) {
            if content != item.source() {
                println!("Would update {}", path.display());
                pending += 1;
            }
        }
        println!("Dry run: {} descriptor(s) would change", pending);
        return Ok(());
    }

    solution
        .force_save_all()
        .context("Failed to save descriptors")?;
    println!("Saved {} descriptor(s)", solution.len());
    Ok(())
}
