//! # Descriptor Serialization
//!
//! [`ProjectSerializer`] maps between descriptor markup and the typed
//! [`Project`] model in both directions.
//!
//! ## Modes
//!
//! - **Deserialize**: parse markup and populate a project built by the
//!   [`DataFactory`].
//! - **Fresh serialize**: write a project into an empty `<project>` document.
//! - **Merge-update serialize**: parse the descriptor's previous content and
//!   overlay the project onto it. Elements the model never reads are left
//!   exactly as they were.
//!
//! ## Field mapping
//!
//! - Scalars are written with their raw string when present and removed when
//!   absent.
//! - `optional` and `extensions` are written as `true` only when set.
//! - `<parent>` is removed when the project has no parent.
//! - List sections are cleared and re-emitted in in-memory order; an empty
//!   list removes its container. Module entries with no path are skipped.
//! - `<build>` is removed only when plugins, plugin management and test
//!   resources are all empty.
//! - Profiles are merged by id: a matching element is updated in place, new
//!   ids are appended and elements whose id is gone are deleted.

use std::collections::HashSet;
use std::rc::Rc;

use crate::error::Result;
use crate::model::{
    BuildContainer, DataFactory, DefaultDataFactory, Dependency, Module, ParentReference, Plugin,
    Profile, Project, ProjectReference, Property,
};
use crate::pom::{BlackBox, PomDocument, PomElement};
use crate::version::ComponentVersion;

const TRUE_LITERAL: &str = "true";

/// Converts descriptors to and from [`Project`] values.
#[derive(Debug, Clone, Default)]
pub struct ProjectSerializer<F: DataFactory = DefaultDataFactory> {
    factory: F,
}

impl ProjectSerializer<DefaultDataFactory> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: DataFactory> ProjectSerializer<F> {
    /// Use a custom entity factory.
    pub fn with_factory(factory: F) -> Self {
        Self { factory }
    }

    /// Parse descriptor markup into a project.
    pub fn deserialize(&self, content: &str) -> Result<Project> {
        let document = Rc::new(PomDocument::parse(content)?);
        let mut project = self.factory.create_project();
        self.load_project(&document, &mut project);
        Ok(project)
    }

    /// Write `project` into a fresh descriptor.
    pub fn serialize(&self, project: &Project) -> Result<String> {
        let mut document = PomDocument::new();
        self.save_project(project, &mut document)?;
        document.to_xml_string()
    }

    /// Overlay `project` onto `existing_content` and return the result.
    pub fn serialize_update(&self, project: &Project, existing_content: &str) -> Result<String> {
        let mut document = PomDocument::parse(existing_content)?;
        self.save_project(project, &mut document)?;
        document.to_xml_string()
    }

    fn load_project(&self, doc: &Rc<PomDocument>, project: &mut Project) {
        let root = doc.root();

        project.reference = load_reference(doc, root);
        project.parent = self.load_parent(doc, root);

        project.packaging = doc.read_value_or_none(root, &["packaging"]);
        project.name = doc.read_value_or_none(root, &["name"]);
        project.model_version = doc.read_value_or_none(root, &["modelVersion"]);

        self.load_build_container(doc, root, &mut project.build);

        project.profiles = doc
            .read_elements(root, &["profiles"], "profile")
            .into_iter()
            .map(|element| self.load_profile(doc, element))
            .collect();
    }

    fn save_project(&self, project: &Project, doc: &mut PomDocument) -> Result<()> {
        let root = doc.root();

        save_reference(&project.reference, doc, root)?;
        save_parent(project.parent.as_ref(), doc, root)?;

        doc.set_value(root, "packaging", project.packaging.as_deref())?;
        doc.set_value(root, "name", project.name.as_deref())?;
        doc.set_value(root, "modelVersion", project.model_version.as_deref())?;

        save_build_container(&project.build, doc, root)?;
        save_profiles(&project.profiles, doc, root)
    }

    fn load_parent(&self, doc: &Rc<PomDocument>, root: PomElement) -> Option<ParentReference> {
        let element = doc.single_or_none(root, &["parent"])?;
        let mut parent = self.factory.create_parent_reference();
        parent.reference = load_reference(doc, element);
        parent.relative_path = doc.read_value_or_none(element, &["relativePath"]);
        Some(parent)
    }

    fn load_property(&self, doc: &Rc<PomDocument>, element: PomElement) -> Property {
        let mut property = self.factory.create_property();
        property.name = doc.local_name(element).to_string();
        property.value = Some(doc.value(element));
        property
    }

    fn load_module(&self, doc: &Rc<PomDocument>, element: PomElement) -> Module {
        let mut module = self.factory.create_module();
        module.path = Some(doc.value(element));
        module
    }

    fn load_dependency(&self, doc: &Rc<PomDocument>, element: PomElement) -> Dependency {
        let mut dependency = self.factory.create_dependency();
        dependency.reference = load_reference(doc, element);
        dependency.scope = doc.read_value_or_none(element, &["scope"]);
        dependency.kind = doc.read_value_or_none(element, &["type"]);
        dependency.classifier = doc.read_value_or_none(element, &["classifier"]);
        dependency.optional = read_flag(doc, element, "optional");
        dependency.exclusions = BlackBox::capture(doc, doc.single_or_none(element, &["exclusions"]));
        dependency
    }

    fn load_dependencies(
        &self,
        doc: &Rc<PomDocument>,
        element: PomElement,
        path: &[&str],
    ) -> Vec<Dependency> {
        doc.read_elements(element, path, "dependency")
            .into_iter()
            .map(|child| self.load_dependency(doc, child))
            .collect()
    }

    fn load_plugin(&self, doc: &Rc<PomDocument>, element: PomElement) -> Plugin {
        let mut plugin = self.factory.create_plugin();
        plugin.reference = load_reference(doc, element);
        plugin.extensions = read_flag(doc, element, "extensions");
        plugin.executions = BlackBox::capture(doc, doc.single_or_none(element, &["executions"]));
        plugin.configuration =
            BlackBox::capture(doc, doc.single_or_none(element, &["configuration"]));
        plugin.dependencies = self.load_dependencies(doc, element, &["dependencies"]);
        plugin
    }

    fn load_plugins(&self, doc: &Rc<PomDocument>, element: PomElement, path: &[&str]) -> Vec<Plugin> {
        doc.read_elements(element, path, "plugin")
            .into_iter()
            .map(|child| self.load_plugin(doc, child))
            .collect()
    }

    fn load_build_container(
        &self,
        doc: &Rc<PomDocument>,
        element: PomElement,
        container: &mut BuildContainer,
    ) {
        if let Some(properties) = doc.single_or_none(element, &["properties"]) {
            container.properties = doc
                .child_elements(properties)
                .into_iter()
                .map(|child| self.load_property(doc, child))
                .collect();
        }

        container.modules = doc
            .read_elements(element, &["modules"], "module")
            .into_iter()
            .map(|child| self.load_module(doc, child))
            .collect();

        container.dependencies = self.load_dependencies(doc, element, &["dependencies"]);
        container.dependency_management =
            self.load_dependencies(doc, element, &["dependencyManagement", "dependencies"]);

        container.plugins = self.load_plugins(doc, element, &["build", "plugins"]);
        container.plugin_management =
            self.load_plugins(doc, element, &["build", "pluginManagement", "plugins"]);

        container.test_resources =
            BlackBox::capture(doc, doc.single_or_none(element, &["build", "testResources"]));
    }

    fn load_profile(&self, doc: &Rc<PomDocument>, element: PomElement) -> Profile {
        let mut profile = self.factory.create_profile();
        profile.id = doc.read_value_or_none(element, &["id"]);
        self.load_build_container(doc, element, &mut profile.build);
        profile
    }
}

fn load_reference(doc: &PomDocument, element: PomElement) -> ProjectReference {
    ProjectReference {
        group_id: doc.read_value_or_none(element, &["groupId"]),
        artifact_id: doc.read_value_or_none(element, &["artifactId"]),
        version: ComponentVersion::from_optional(doc.read_value_or_none(element, &["version"])),
    }
}

/// Absent or anything but a case-insensitive `true` reads as `false`.
fn read_flag(doc: &PomDocument, element: PomElement, name: &str) -> bool {
    doc.read_value_or_none(element, &[name])
        .is_some_and(|value| value.trim().eq_ignore_ascii_case(TRUE_LITERAL))
}

fn save_reference(
    reference: &ProjectReference,
    doc: &mut PomDocument,
    element: PomElement,
) -> Result<()> {
    doc.set_value(element, "groupId", reference.group_id.as_deref())?;
    doc.set_value(element, "artifactId", reference.artifact_id.as_deref())?;
    doc.set_value(element, "version", reference.version.value())
}

fn save_parent(
    parent: Option<&ParentReference>,
    doc: &mut PomDocument,
    root: PomElement,
) -> Result<()> {
    match parent {
        None => doc.remove_element(root, "parent"),
        Some(parent) => {
            let element = doc.single_or_create(root, &["parent"])?;
            save_reference(&parent.reference, doc, element)?;
            doc.set_value(element, "relativePath", parent.relative_path.as_deref())
        }
    }
}

/// Clear and re-emit a list section, or drop its container when empty.
///
/// `path` leads from `parent` to the container; an empty list removes the
/// first segment of `path`.
fn save_list<T>(
    items: &[T],
    doc: &mut PomDocument,
    parent: PomElement,
    path: &[&str],
    item_name: &str,
    mut save_item: impl FnMut(&T, &mut PomDocument, PomElement) -> Result<()>,
) -> Result<()> {
    if items.is_empty() {
        return doc.remove_element(parent, path[0]);
    }
    let container = doc.single_or_create(parent, path)?;
    doc.remove_all_children(container)?;
    for item in items {
        let element = doc.add_element(container, item_name)?;
        save_item(item, doc, element)?;
    }
    Ok(())
}

fn save_dependency(dependency: &Dependency, doc: &mut PomDocument, element: PomElement) -> Result<()> {
    save_reference(&dependency.reference, doc, element)?;

    doc.set_value(element, "type", dependency.kind.as_deref())?;
    doc.set_value(element, "classifier", dependency.classifier.as_deref())?;
    doc.set_value(element, "scope", dependency.scope.as_deref())?;

    if dependency.optional {
        doc.set_value(element, "optional", Some(TRUE_LITERAL))?;
    }
    doc.append_capture(element, &dependency.exclusions)
}

fn save_dependencies(
    dependencies: &[Dependency],
    doc: &mut PomDocument,
    parent: PomElement,
    path: &[&str],
) -> Result<()> {
    save_list(dependencies, doc, parent, path, "dependency", save_dependency)
}

fn save_plugin(plugin: &Plugin, doc: &mut PomDocument, element: PomElement) -> Result<()> {
    save_reference(&plugin.reference, doc, element)?;

    if plugin.extensions {
        doc.set_value(element, "extensions", Some(TRUE_LITERAL))?;
    }
    doc.append_capture(element, &plugin.configuration)?;
    doc.append_capture(element, &plugin.executions)?;

    save_dependencies(&plugin.dependencies, doc, element, &["dependencies"])
}

fn save_build_container(
    container: &BuildContainer,
    doc: &mut PomDocument,
    element: PomElement,
) -> Result<()> {
    save_properties(&container.properties, doc, element)?;

    let modules: Vec<&str> = container
        .modules
        .iter()
        .filter_map(|module| module.path.as_deref())
        .filter(|path| !path.is_empty())
        .collect();
    save_list(&modules, doc, element, &["modules"], "module", |path, doc, module| {
        doc.set_text(module, path)
    })?;

    save_dependencies(&container.dependencies, doc, element, &["dependencies"])?;
    save_dependencies(
        &container.dependency_management,
        doc,
        element,
        &["dependencyManagement", "dependencies"],
    )?;

    if container.plugins.is_empty()
        && container.plugin_management.is_empty()
        && container.test_resources.is_empty()
    {
        return doc.remove_element(element, "build");
    }

    let build = doc.single_or_create(element, &["build"])?;
    save_list(&container.plugins, doc, build, &["plugins"], "plugin", save_plugin)?;
    save_list(
        &container.plugin_management,
        doc,
        build,
        &["pluginManagement", "plugins"],
        "plugin",
        save_plugin,
    )?;

    if container.test_resources.is_empty() {
        doc.remove_element(build, "testResources")
    } else {
        let test_resources = doc.single_or_create(build, &["testResources"])?;
        doc.replace_with(test_resources, &container.test_resources)?;
        Ok(())
    }
}

/// Properties without a value are not written.
fn save_properties(properties: &[Property], doc: &mut PomDocument, element: PomElement) -> Result<()> {
    let valued: Vec<(&str, &str)> = properties
        .iter()
        .filter_map(|property| Some((property.name.as_str(), property.value.as_deref()?)))
        .collect();
    if valued.is_empty() {
        return doc.remove_element(element, "properties");
    }
    let container = doc.single_or_create(element, &["properties"])?;
    doc.remove_all_children(container)?;
    for (name, value) in valued {
        doc.set_value(container, name, Some(value))?;
    }
    Ok(())
}

fn save_profile(profile: &Profile, doc: &mut PomDocument, element: PomElement) -> Result<()> {
    match profile.id.as_deref() {
        Some(id) if !id.is_empty() => doc.set_value(element, "id", Some(id))?,
        _ => doc.remove_element(element, "id")?,
    }
    save_build_container(&profile.build, doc, element)
}

fn save_profiles(profiles: &[Profile], doc: &mut PomDocument, root: PomElement) -> Result<()> {
    if profiles.is_empty() {
        return doc.remove_element(root, "profiles");
    }

    let container = doc.single_or_create(root, &["profiles"])?;
    let mut used: HashSet<PomElement> = HashSet::new();
    for profile in profiles {
        let existing = doc
            .child_elements(container)
            .into_iter()
            .find(|&element| doc.read_value_or_none(element, &["id"]) == profile.id);
        let element = match existing {
            Some(element) => element,
            None => doc.add_element(container, "profile")?,
        };
        used.insert(element);
        save_profile(profile, doc, element)?;
    }

    for element in doc.child_elements(container) {
        if !used.contains(&element) {
            doc.remove(element)?;
        }
    }
    Ok(())
}
