//! # Project Tree Loading
//!
//! [`ProjectTreeLoader`] turns descriptors on a [`FileSystemAccess`] into a
//! flat list of [`ProjectTreeItem`]s wired by index.
//!
//! ## Connected mode
//!
//! Starting from an entry descriptor, the loader follows:
//!
//! - every `<module>` path, relative to the declaring descriptor's directory.
//!   A path naming a directory resolves to the descriptor inside it;
//! - the `<parent>` path from `<relativePath>`, defaulting to `../pom.xml`.
//!
//! Each descriptor path is loaded at most once. A path reached through two
//! edges (or through a cycle) maps to the item loaded the first time.
//!
//! Missing module paths are skipped with a warning. Missing parents, or
//! parent descriptors whose artifactId differs from the `<parent>` reference,
//! are skipped quietly since external parents are the common case.
//!
//! ## Disconnected mode
//!
//! Every file named like the descriptor under a base directory is loaded in
//! sorted order, skipping exclude globs. No parent or module wiring is done.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glob::Pattern;
use log::{debug, warn};

use crate::defaults::{DEFAULT_DESCRIPTOR_NAME, DEFAULT_PARENT_RELATIVE_PATH};
use crate::error::Result;
use crate::filesystem::FileSystemAccess;
use crate::model::{ParentReference, Project};
use crate::serializer::ProjectSerializer;

/// One loaded descriptor.
#[derive(Debug, Clone)]
pub struct ProjectTreeItem {
    /// Absolute, normalized descriptor path.
    pub path: PathBuf,
    pub project: Project,
    /// Markup the project was read from, or last written as.
    pub(crate) source: String,
    /// Index of the in-solution parent, if the declared parent was loaded.
    pub parent: Option<usize>,
    /// Indices of the declared modules that were found, in declaration order.
    pub modules: Vec<usize>,
}

impl ProjectTreeItem {
    /// Markup the project was read from, or last written as.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Loads descriptors into [`ProjectTreeItem`]s.
pub struct ProjectTreeLoader<'a, FS: FileSystemAccess> {
    fs: &'a FS,
    serializer: ProjectSerializer,
    descriptor_name: String,
    items: Vec<ProjectTreeItem>,
    visited: HashMap<PathBuf, usize>,
}

impl<'a, FS: FileSystemAccess> ProjectTreeLoader<'a, FS> {
    pub fn new(fs: &'a FS) -> Self {
        Self::with_descriptor_name(fs, DEFAULT_DESCRIPTOR_NAME)
    }

    /// Use `descriptor_name` when a module path names a directory.
    pub fn with_descriptor_name(fs: &'a FS, descriptor_name: impl Into<String>) -> Self {
        Self {
            fs,
            serializer: ProjectSerializer::new(),
            descriptor_name: descriptor_name.into(),
            items: Vec::new(),
            visited: HashMap::new(),
        }
    }

    /// Load `entry_file` and everything reachable from it.
    pub fn load_project_tree(mut self, entry_file: &Path) -> Result<Vec<ProjectTreeItem>> {
        let entry_file = self.fs.full_path(entry_file)?;
        self.load(&entry_file)?;
        Ok(self.items)
    }

    /// Load every descriptor under `base_dir` not matching `excludes`.
    ///
    /// Patterns are matched against the path relative to `base_dir`.
    pub fn scan_for_projects(
        mut self,
        base_dir: &Path,
        excludes: &[Pattern],
    ) -> Result<Vec<ProjectTreeItem>> {
        let base_dir = self.fs.full_path(base_dir)?;
        for file in self.fs.find_files(&base_dir, &self.descriptor_name)? {
            let relative = file.strip_prefix(&base_dir).unwrap_or(&file);
            if excludes.iter().any(|pattern| pattern.matches_path(relative)) {
                debug!("Excluded {}", relative.display());
                continue;
            }
            let (source, project) = self.read(&file)?;
            self.insert(file, source, project);
        }
        Ok(self.items)
    }

    fn read(&self, path: &Path) -> Result<(String, Project)> {
        let source = self.fs.read_to_string(path)?;
        let project = self.serializer.deserialize(&source)?;
        debug!("Loaded {} ({})", path.display(), project.reference);
        Ok((source, project))
    }

    fn insert(&mut self, path: PathBuf, source: String, project: Project) -> usize {
        let index = self.items.len();
        self.visited.insert(path.clone(), index);
        self.items.push(ProjectTreeItem {
            path,
            project,
            source,
            parent: None,
            modules: Vec::new(),
        });
        index
    }

    fn load(&mut self, path: &Path) -> Result<usize> {
        if let Some(&index) = self.visited.get(path) {
            return Ok(index);
        }
        let (source, project) = self.read(path)?;
        self.attach(path.to_path_buf(), source, project)
    }

    /// Register a parsed descriptor, then follow its module and parent edges.
    fn attach(&mut self, path: PathBuf, source: String, project: Project) -> Result<usize> {
        let dir = self.fs.parent_dir(&path);
        let module_paths: Vec<String> = project
            .build
            .modules
            .iter()
            .filter_map(|module| module.path.clone())
            .filter(|module| !module.is_empty())
            .collect();
        let parent = project.parent.clone();
        let index = self.insert(path, source, project);

        for module_path in module_paths {
            match self.resolve_descriptor(&dir, &module_path) {
                Some(module_file) => {
                    let module = self.load(&module_file)?;
                    self.items[index].modules.push(module);
                }
                None => warn!(
                    "Module `{}` of {} not found, skipping",
                    module_path,
                    self.items[index].path.display()
                ),
            }
        }

        if let Some(parent) = parent {
            self.items[index].parent = self.load_parent(&dir, &parent)?;
        }
        Ok(index)
    }

    fn load_parent(&mut self, dir: &Path, parent: &ParentReference) -> Result<Option<usize>> {
        let relative = parent
            .relative_path
            .as_deref()
            .unwrap_or(DEFAULT_PARENT_RELATIVE_PATH);
        if relative.is_empty() {
            return Ok(None);
        }
        let Some(parent_file) = self.resolve_descriptor(dir, relative) else {
            debug!("Parent {} is not in the tree", parent.reference);
            return Ok(None);
        };

        if let Some(&index) = self.visited.get(&parent_file) {
            let matches = self.items[index].project.reference.artifact_id
                == parent.reference.artifact_id;
            return Ok(matches.then_some(index));
        }

        let (source, project) = self.read(&parent_file)?;
        if project.reference.artifact_id != parent.reference.artifact_id {
            debug!(
                "{} is not parent {}, skipping",
                parent_file.display(),
                parent.reference
            );
            return Ok(None);
        }
        self.attach(parent_file, source, project).map(Some)
    }

    fn resolve_descriptor(&self, dir: &Path, relative: &str) -> Option<PathBuf> {
        let candidate = self.fs.join(dir, relative);
        if self.fs.is_file(&candidate) {
            Some(candidate)
        } else if self.fs.is_dir(&candidate) {
            let inner = candidate.join(&self.descriptor_name);
            self.fs.is_file(&inner).then_some(inner)
        } else {
            None
        }
    }
}
