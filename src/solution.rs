//! # Solution
//!
//! A [`Solution`] is the set of descriptors opened from one entry point. It
//! owns the loaded [`ProjectTreeItem`]s, exposes them flat or as a module
//! tree, and writes every project back with [`Solution::force_save_all`].
//!
//! Saving is always a merge-update against the markup each descriptor was
//! read from, so formatting, comments and unmodeled elements survive.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::filesystem::{DiskFS, FileSystemAccess};
use crate::model::Project;
use crate::serializer::ProjectSerializer;
use crate::tree::{ProjectTreeItem, ProjectTreeLoader};
use crate::version::ComponentVersion;

/// Effective coordinates of a project after parent inheritance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedProjectData {
    pub group_id: Option<String>,
    pub version: ComponentVersion,
    /// `None` when no version could be resolved.
    pub is_snapshot: Option<bool>,
    /// Descriptor path of the in-solution parent.
    pub parent_path: Option<PathBuf>,
}

/// Descriptors loaded from one entry point.
pub struct Solution<FS: FileSystemAccess = DiskFS> {
    fs: FS,
    base_dir: PathBuf,
    items: Vec<ProjectTreeItem>,
    serializer: ProjectSerializer,
}

impl Solution<DiskFS> {
    /// Open a solution on disk with the default configuration.
    pub fn open(entry_point: impl AsRef<Path>, use_disconnected_scan: bool) -> Result<Self> {
        Self::open_in(
            DiskFS::new(),
            entry_point.as_ref(),
            use_disconnected_scan,
            &Config::default(),
        )
    }
}

impl<FS: FileSystemAccess> Solution<FS> {
    /// Open a solution on `fs`.
    ///
    /// `entry_point` is a descriptor file or a directory holding one. With
    /// `use_disconnected_scan` every descriptor under the base directory is
    /// loaded instead of following module and parent edges.
    pub fn open_in(
        fs: FS,
        entry_point: &Path,
        use_disconnected_scan: bool,
        config: &Config,
    ) -> Result<Self> {
        if entry_point.as_os_str().is_empty() {
            return Err(Error::InvalidArgument {
                argument: "entry_point".to_string(),
                message: "path must not be empty".to_string(),
            });
        }

        let full_path = fs.full_path(entry_point)?;
        let (base_dir, entry_file) = if fs.is_file(&full_path) {
            (fs.parent_dir(&full_path), full_path)
        } else if fs.is_dir(&full_path) {
            let entry_file = full_path.join(&config.descriptor);
            (full_path, entry_file)
        } else {
            return Err(Error::NotFound { path: full_path });
        };

        let loader = ProjectTreeLoader::with_descriptor_name(&fs, config.descriptor.as_str());
        let items = if use_disconnected_scan {
            loader.scan_for_projects(&base_dir, &config.exclude_patterns()?)?
        } else {
            loader.load_project_tree(&entry_file)?
        };
        info!(
            "Opened {} descriptor(s) under {}",
            items.len(),
            base_dir.display()
        );

        Ok(Self {
            fs,
            base_dir,
            items,
            serializer: ProjectSerializer::new(),
        })
    }

    /// Directory of the entry descriptor.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn items(&self) -> &[ProjectTreeItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn all_projects(&self) -> impl Iterator<Item = &Project> {
        self.items.iter().map(|item| &item.project)
    }

    pub fn all_projects_mut(&mut self) -> impl Iterator<Item = &mut Project> {
        self.items.iter_mut().map(|item| &mut item.project)
    }

    /// Items that are not a module of any other item, in load order.
    pub fn roots(&self) -> Vec<usize> {
        let modules: HashSet<usize> = self
            .items
            .iter()
            .flat_map(|item| item.modules.iter().copied())
            .collect();
        let roots: Vec<usize> = (0..self.items.len())
            .filter(|index| !modules.contains(index))
            .collect();
        if roots.is_empty() && !self.items.is_empty() {
            // every item sits on a module cycle
            return vec![0];
        }
        roots
    }

    /// Modules of `item` that were loaded, in declaration order.
    pub fn modules_of(&self, item: usize) -> &[usize] {
        self.items
            .get(item)
            .map(|item| item.modules.as_slice())
            .unwrap_or_default()
    }

    /// In-solution parent of `item`.
    pub fn parent_of(&self, item: usize) -> Option<usize> {
        self.items.get(item).and_then(|item| item.parent)
    }

    /// Group id and version of `item`, falling back to its parent when the
    /// project omits them.
    pub fn resolved(&self, item: usize) -> ResolvedProjectData {
        let mut group_id = None;
        let mut version = ComponentVersion::undefined();
        let mut seen = HashSet::new();
        let mut current = Some(item);

        while let Some(index) = current {
            let Some(tree_item) = self.items.get(index) else {
                break;
            };
            if !seen.insert(index) {
                break;
            }
            let project = &tree_item.project;
            let declared_parent = project.parent.as_ref().map(|parent| &parent.reference);

            if group_id.is_none() {
                group_id = project
                    .reference
                    .group_id
                    .clone()
                    .or_else(|| declared_parent.and_then(|parent| parent.group_id.clone()));
            }
            if !version.is_defined() {
                version = if project.reference.version.is_defined() {
                    project.reference.version.clone()
                } else {
                    declared_parent
                        .map(|parent| parent.version.clone())
                        .unwrap_or_default()
                };
            }
            if group_id.is_some() && version.is_defined() {
                break;
            }
            current = tree_item.parent;
        }

        ResolvedProjectData {
            is_snapshot: version.is_defined().then(|| version.is_snapshot()),
            group_id,
            version,
            parent_path: self
                .parent_of(item)
                .map(|parent| self.items[parent].path.clone()),
        }
    }

    /// Re-serialize every project against its last known markup and write
    /// it back.
    ///
    /// Every project is written whether or not it changed. A failure leaves
    /// earlier files already written.
    pub fn force_save_all(&mut self) -> Result<()> {
        for item in &mut self.items {
            let content = self.serializer.serialize_update(&item.project, &item.source)?;
            self.fs.write_string(&item.path, &content)?;
            debug!("Saved {}", item.path.display());
            item.source = content;
        }
        info!("Saved {} descriptor(s)", self.items.len());
        Ok(())
    }

    /// Render every project against its last known markup without writing.
    pub fn preview_all(&self) -> Result<Vec<(PathBuf, String)>> {
        self.items
            .iter()
            .map(|item| {
                let content = self.serializer.serialize_update(&item.project, &item.source)?;
                Ok((item.path.clone(), content))
            })
            .collect()
    }

    /// The file system the solution reads and writes.
    pub fn file_system(&self) -> &FS {
        &self.fs
    }
}
