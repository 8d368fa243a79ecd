//! # Transformation Actions
//!
//! Commands that rewrite the projects of an opened solution in memory.
//! Persisting the result is a separate step
//! ([`Solution::force_save_all`](crate::solution::Solution::force_save_all)).
//!
//! ## Available Actions
//!
//! - [`ApplyClassifier`]: substitute a `${name}` placeholder inside
//!   dependency classifiers.
//! - [`SwitchToRelease`]: turn every snapshot version into a release.
//! - [`SwitchToSnapshot`]: turn every release version into the next snapshot.
//! - [`SetVersion`]: assign an explicit version to one artifact.
//!
//! The version actions keep a multi-module build consistent: when a project's
//! version changes, every reference to its old coordinate inside the solution
//! (parents, dependencies, managed dependencies and plugins) follows.

use std::collections::HashSet;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::filesystem::FileSystemAccess;
use crate::model::{Project, ProjectReference};
use crate::solution::Solution;
use crate::version::ComponentVersion;

/// An in-memory transformation of a set of projects.
pub trait Action {
    /// Short name used in log output.
    fn name(&self) -> &str;

    /// Apply the action and return how many entities changed.
    fn execute(&self, projects: &mut [&mut Project]) -> Result<usize>;
}

impl<FS: FileSystemAccess> Solution<FS> {
    /// Run `action` over every project of the solution.
    pub fn apply(&mut self, action: &dyn Action) -> Result<usize> {
        let mut projects: Vec<&mut Project> = self.all_projects_mut().collect();
        let changed = action.execute(&mut projects)?;
        info!("{}: {} change(s)", action.name(), changed);
        Ok(changed)
    }
}

fn property_placeholder(property_name: &str) -> String {
    format!("${{{}}}", property_name)
}

/// Replace `${property_name}` with `value` in every dependency classifier.
#[derive(Debug, Clone)]
pub struct ApplyClassifier {
    pub property_name: String,
    pub value: String,
}

impl ApplyClassifier {
    pub fn new(property_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            value: value.into(),
        }
    }
}

impl Action for ApplyClassifier {
    fn name(&self) -> &str {
        "apply-classifier"
    }

    fn execute(&self, projects: &mut [&mut Project]) -> Result<usize> {
        if self.property_name.is_empty() {
            return Err(Error::InvalidArgument {
                argument: "property_name".to_string(),
                message: "property name must not be empty".to_string(),
            });
        }
        let placeholder = property_placeholder(&self.property_name);
        let mut changed = 0;
        for project in projects.iter_mut() {
            for dependency in project.all_dependencies_mut() {
                let Some(classifier) = dependency.classifier.as_mut() else {
                    continue;
                };
                if classifier.is_empty() || !classifier.contains(&placeholder) {
                    continue;
                }
                *classifier = classifier.replace(&placeholder, &self.value);
                debug!("Classifier of {} is now `{}`", dependency.reference, classifier);
                changed += 1;
            }
        }
        Ok(changed)
    }
}

/// A project whose version moved from `from` to `to`.
#[derive(Debug, Clone, PartialEq)]
struct VersionChange {
    group_id: Option<String>,
    artifact_id: String,
    from: ComponentVersion,
    to: ComponentVersion,
}

impl VersionChange {
    fn matches(&self, reference: &ProjectReference) -> bool {
        reference.artifact_id.as_deref() == Some(self.artifact_id.as_str())
            && (reference.group_id.is_none()
                || self.group_id.is_none()
                || reference.group_id == self.group_id)
            && reference.version == self.from
    }
}

/// Group id of `project`, inherited from its `<parent>` when omitted.
fn effective_group_id(project: &Project) -> Option<String> {
    project.reference.group_id.clone().or_else(|| {
        project
            .parent
            .as_ref()
            .and_then(|parent| parent.reference.group_id.clone())
    })
}

/// Set each project's own version through `transition`, then record
/// inheriting projects and rewrite every matching reference.
///
/// Returns the number of projects whose effective version changed.
fn transition_versions(
    projects: &mut [&mut Project],
    mut transition: impl FnMut(&Project) -> Result<Option<ComponentVersion>>,
) -> Result<usize> {
    // No version moves until every transition has succeeded.
    let mut planned = Vec::new();
    for (index, project) in projects.iter().enumerate() {
        if let Some(to) = transition(&**project)? {
            planned.push((index, to));
        }
    }

    let mut changes = Vec::new();
    let mut recorded = HashSet::new();

    for (index, to) in planned {
        let project = &mut *projects[index];
        let Some(artifact_id) = project.reference.artifact_id.clone() else {
            continue;
        };
        let from = std::mem::replace(&mut project.reference.version, to.clone());
        debug!("{}: {} -> {}", artifact_id, from, to);
        changes.push(VersionChange {
            group_id: effective_group_id(project),
            artifact_id,
            from,
            to,
        });
        recorded.insert(index);
    }

    // Projects that inherit their version move with their parent.
    loop {
        let mut inherited = Vec::new();
        for (index, project) in projects.iter().enumerate() {
            if recorded.contains(&index) || project.reference.version.is_defined() {
                continue;
            }
            let (Some(artifact_id), Some(parent)) =
                (project.reference.artifact_id.clone(), project.parent.as_ref())
            else {
                continue;
            };
            if let Some(change) = changes.iter().find(|c| c.matches(&parent.reference)) {
                inherited.push((
                    index,
                    VersionChange {
                        group_id: effective_group_id(&**project),
                        artifact_id,
                        from: change.from.clone(),
                        to: change.to.clone(),
                    },
                ));
            }
        }
        if inherited.is_empty() {
            break;
        }
        for (index, change) in inherited {
            recorded.insert(index);
            changes.push(change);
        }
    }

    let mut rewritten = 0;
    for project in projects.iter_mut() {
        for reference in project.references_mut() {
            if let Some(change) = changes.iter().find(|c| c.matches(reference)) {
                reference.version = change.to.clone();
                rewritten += 1;
            }
        }
    }
    debug!("Rewrote {} in-solution reference(s)", rewritten);
    Ok(changes.len())
}

/// Switch every snapshot project to a release, optionally qualified.
#[derive(Debug, Clone, Default)]
pub struct SwitchToRelease {
    pub qualifier: Option<String>,
}

impl Action for SwitchToRelease {
    fn name(&self) -> &str {
        "switch-to-release"
    }

    fn execute(&self, projects: &mut [&mut Project]) -> Result<usize> {
        transition_versions(projects, |project| {
            let version = &project.reference.version;
            if !version.is_snapshot() {
                return Ok(None);
            }
            version
                .switch_snapshot_to_release(self.qualifier.as_deref())
                .map(Some)
        })
    }
}

/// Switch every release project to the next snapshot.
#[derive(Debug, Clone, Default)]
pub struct SwitchToSnapshot;

impl Action for SwitchToSnapshot {
    fn name(&self) -> &str {
        "switch-to-snapshot"
    }

    fn execute(&self, projects: &mut [&mut Project]) -> Result<usize> {
        transition_versions(projects, |project| {
            let version = &project.reference.version;
            if !version.is_release() {
                return Ok(None);
            }
            version.switch_release_to_snapshot_with_increment().map(Some)
        })
    }
}

/// Assign `version` to the project `artifact_id` (and `group_id`, if given).
#[derive(Debug, Clone)]
pub struct SetVersion {
    pub group_id: Option<String>,
    pub artifact_id: String,
    pub version: ComponentVersion,
}

impl Action for SetVersion {
    fn name(&self) -> &str {
        "set-version"
    }

    fn execute(&self, projects: &mut [&mut Project]) -> Result<usize> {
        if !self.version.is_defined() {
            return Err(Error::InvalidArgument {
                argument: "version".to_string(),
                message: "version must not be empty".to_string(),
            });
        }
        transition_versions(projects, |project| {
            let selected = project.reference.artifact_id.as_deref()
                == Some(self.artifact_id.as_str())
                && (self.group_id.is_none() || effective_group_id(project) == self.group_id)
                && project.reference.version.is_defined()
                && project.reference.version != self.version;
            Ok(selected.then(|| self.version.clone()))
        })
    }
}
