//! # Typed Descriptor Model
//!
//! Plain records for the parts of a POM that release tooling reads and
//! rewrites. Anything not modeled here stays in the markup and survives a
//! save untouched; subtrees that are carried but never interpreted are held
//! as [`BlackBox`] captures.
//!
//! Coordinates (`groupId`, `artifactId`, `version`) are an embedded
//! [`ProjectReference`] value shared by projects, parents, dependencies and
//! plugins. [`BuildContainer`] is the shape shared by a project and each of
//! its profiles.
//!
//! Instances are created through a [`DataFactory`] so the serializer never
//! constructs entities directly.

use std::fmt;

use crate::pom::BlackBox;
use crate::version::ComponentVersion;

/// A `groupId:artifactId:version` coordinate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectReference {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: ComponentVersion,
}

impl ProjectReference {
    /// Display form `group:artifact:version`.
    pub fn coordinates(&self) -> String {
        format!(
            "{}:{}:{}",
            self.group_id.as_deref().unwrap_or_default(),
            self.artifact_id.as_deref().unwrap_or_default(),
            self.version
        )
    }
}

impl fmt::Display for ProjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.coordinates())
    }
}

/// `<parent>` of a project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParentReference {
    pub reference: ProjectReference,
    pub relative_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dependency {
    pub reference: ProjectReference,
    pub classifier: Option<String>,
    /// `<type>`
    pub kind: Option<String>,
    pub scope: Option<String>,
    pub optional: bool,
    pub exclusions: BlackBox,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plugin {
    pub reference: ProjectReference,
    pub extensions: bool,
    pub executions: BlackBox,
    pub configuration: BlackBox,
    pub dependencies: Vec<Dependency>,
}

/// One child of `<properties>`: element name and text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: Option<String>,
}

/// One `<module>` entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Module {
    pub path: Option<String>,
}

/// Sections shared by a project and its profiles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildContainer {
    pub properties: Vec<Property>,
    pub modules: Vec<Module>,
    pub dependencies: Vec<Dependency>,
    pub dependency_management: Vec<Dependency>,
    pub plugins: Vec<Plugin>,
    pub plugin_management: Vec<Plugin>,
    pub test_resources: BlackBox,
}

impl BuildContainer {
    /// Direct, managed and plugin-scoped dependencies of this container.
    pub fn all_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies
            .iter()
            .chain(self.dependency_management.iter())
            .chain(
                self.plugins
                    .iter()
                    .chain(self.plugin_management.iter())
                    .flat_map(|plugin| plugin.dependencies.iter()),
            )
    }

    /// Mutable counterpart of [`BuildContainer::all_dependencies`].
    pub fn all_dependencies_mut(&mut self) -> impl Iterator<Item = &mut Dependency> {
        self.dependencies
            .iter_mut()
            .chain(self.dependency_management.iter_mut())
            .chain(
                self.plugins
                    .iter_mut()
                    .chain(self.plugin_management.iter_mut())
                    .flat_map(|plugin| plugin.dependencies.iter_mut()),
            )
    }

    /// Value of the property `name`, if declared.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|property| property.name == name)
            .and_then(|property| property.value.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub id: Option<String>,
    pub build: BuildContainer,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Project {
    pub reference: ProjectReference,
    pub packaging: Option<String>,
    pub name: Option<String>,
    pub model_version: Option<String>,
    pub parent: Option<ParentReference>,
    pub build: BuildContainer,
    pub profiles: Vec<Profile>,
}

impl Project {
    /// Every dependency of the project and of all of its profiles.
    pub fn all_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.build.all_dependencies().chain(
            self.profiles
                .iter()
                .flat_map(|profile| profile.build.all_dependencies()),
        )
    }

    /// Mutable counterpart of [`Project::all_dependencies`].
    pub fn all_dependencies_mut(&mut self) -> impl Iterator<Item = &mut Dependency> {
        self.build.all_dependencies_mut().chain(
            self.profiles
                .iter_mut()
                .flat_map(|profile| profile.build.all_dependencies_mut()),
        )
    }

    /// Every coordinate this project points at: parent, dependencies and
    /// plugins, in the project and all profiles.
    pub fn references_mut(&mut self) -> Vec<&mut ProjectReference> {
        let Project {
            parent,
            build,
            profiles,
            ..
        } = self;

        let mut references: Vec<&mut ProjectReference> = Vec::new();
        if let Some(parent) = parent {
            references.push(&mut parent.reference);
        }
        for container in std::iter::once(build).chain(profiles.iter_mut().map(|p| &mut p.build)) {
            let BuildContainer {
                dependencies,
                dependency_management,
                plugins,
                plugin_management,
                ..
            } = container;
            references.extend(
                dependencies
                    .iter_mut()
                    .chain(dependency_management.iter_mut())
                    .map(|d| &mut d.reference),
            );
            for plugin in plugins.iter_mut().chain(plugin_management.iter_mut()) {
                let Plugin {
                    reference,
                    dependencies,
                    ..
                } = plugin;
                references.push(reference);
                references.extend(dependencies.iter_mut().map(|d| &mut d.reference));
            }
        }
        references
    }
}

/// Construction of empty entities, so the serializer stays independent of
/// how entities are built.
pub trait DataFactory {
    fn create_project(&self) -> Project;
    fn create_parent_reference(&self) -> ParentReference;
    fn create_dependency(&self) -> Dependency;
    fn create_plugin(&self) -> Plugin;
    fn create_profile(&self) -> Profile;
    fn create_property(&self) -> Property;
    fn create_module(&self) -> Module;
}

/// Factory producing `Default` entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDataFactory;

impl DataFactory for DefaultDataFactory {
    fn create_project(&self) -> Project {
        Project::default()
    }

    fn create_parent_reference(&self) -> ParentReference {
        ParentReference::default()
    }

    fn create_dependency(&self) -> Dependency {
        Dependency::default()
    }

    fn create_plugin(&self) -> Plugin {
        Plugin::default()
    }

    fn create_profile(&self) -> Profile {
        Profile::default()
    }

    fn create_property(&self) -> Property {
        Property::default()
    }

    fn create_module(&self) -> Module {
        Module::default()
    }
}
