//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays the module
//! hierarchy of a solution.
//!
//! ## Functionality
//!
//! - **Module Tree Visualization**: Roots are descriptors that are not a
//!   module of any other descriptor; children are their declared modules.
//! - **Depth Control**: Supports `--depth` flag to limit tree depth
//! - **Effective Coordinates**: Group id and version inherited from a parent
//!   are shown resolved.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::{Context, Result};
use clap::Args;
use ptree::{print_tree, TreeItem};
use std::path::Path;

use pomtree::solution::Solution;

use super::{open_solution, SolutionArgs};

/// Display the module hierarchy of a solution
#[derive(Args, Debug)]
pub struct TreeArgs {
    #[command(flatten)]
    pub solution: SolutionArgs,

    /// Maximum depth to display in the tree.
    ///
    /// If not specified, displays the full tree.
    /// Use 0 to show only the roots, 1 to show their modules, etc.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs) -> Result<()> {
    let solution = open_solution(&args.solution)?;
    println!("Module tree for: {}", solution.base_dir().display());

    let max_depth = args.depth.unwrap_or(usize::MAX);
    for root in solution.roots() {
        let node = build_tree_node(&solution, root, max_depth, 0, &mut Vec::new());
        print_tree(&node).context("Failed to display tree")?;
    }
    Ok(())
}

/// One line of output for `item`: effective coordinates and path.
fn label(solution: &Solution, item: usize) -> String {
    let tree_item = &solution.items()[item];
    let resolved = solution.resolved(item);
    let path = tree_item
        .path
        .strip_prefix(solution.base_dir())
        .unwrap_or(&tree_item.path);
    format!(
        "{}:{}:{} ({})",
        resolved.group_id.as_deref().unwrap_or("?"),
        tree_item
            .project
            .reference
            .artifact_id
            .as_deref()
            .unwrap_or("?"),
        resolved.version,
        display_path(path)
    )
}

fn display_path(path: &Path) -> String {
    if path.as_os_str().is_empty() {
        ".".to_string()
    } else {
        path.display().to_string()
    }
}

/// Build a tree node for `item`; `ancestors` guards against module cycles.
fn build_tree_node(
    solution: &Solution,
    item: usize,
    max_depth: usize,
    current_depth: usize,
    ancestors: &mut Vec<usize>,
) -> TreeNode {
    let label = label(solution, item);
    if current_depth >= max_depth || ancestors.contains(&item) {
        return TreeNode {
            label,
            children: vec![],
        };
    }

    ancestors.push(item);
    let children = solution
        .modules_of(item)
        .iter()
        .map(|&module| build_tree_node(solution, module, max_depth, current_depth + 1, ancestors))
        .collect();
    ancestors.pop();
    TreeNode { label, children }
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> std::borrow::Cow<'_, [Self::Child]> {
        std::borrow::Cow::Borrowed(&self.children)
    }
}
