//! # pomtree
//!
//! This library loads a multi-module Maven build as a tree of descriptors,
//! exposes each `pom.xml` as a typed [`model::Project`], lets transformation
//! actions rewrite those projects, and writes them back while keeping the
//! hand-authored markup (formatting, comments and unmodeled elements) intact.
//!
//! It is designed to be used by the `pomtree` command-line tool but can also
//! be embedded in other release tooling.
//!
//! ## Quick Example
//!
//! ```
//! use pomtree::serializer::ProjectSerializer;
//!
//! let source = "<project>\n    <artifactId>demo</artifactId>\n    <version>1.2.3-SNAPSHOT</version>\n    <!-- keep me -->\n</project>\n";
//!
//! let serializer = ProjectSerializer::new();
//! let mut project = serializer.deserialize(source).unwrap();
//! project.reference.version = project
//!     .reference
//!     .version
//!     .switch_snapshot_to_release(None)
//!     .unwrap();
//!
//! let updated = serializer.serialize_update(&project, source).unwrap();
//! assert!(updated.contains("<version>1.2.3</version>"));
//! assert!(updated.contains("<!-- keep me -->"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Element wrapper (`pom`)**: Namespace-aware navigation and mutation of
//!   one parsed descriptor, plus [`pom::BlackBox`] captures of subtrees that
//!   are carried through untouched.
//! - **Model (`model`)**: Plain records for coordinates, dependencies,
//!   plugins, profiles and build sections, created through a
//!   [`model::DataFactory`].
//! - **Serializer (`serializer`)**: Fresh and merge-update conversion between
//!   markup and the model.
//! - **Tree loading (`tree`, `solution`)**: Connected loading along module
//!   and parent links, or a disconnected scan of a directory.
//! - **Versions (`version`)**: The snapshot/release state machine.
//! - **Actions (`actions`)**: Classifier substitution and solution-wide
//!   version transitions.

pub mod actions;
pub mod config;
pub mod defaults;
pub mod error;
pub mod filesystem;
pub mod model;
pub mod path;
pub mod pom;
pub mod serializer;
pub mod solution;
pub mod tree;
pub mod version;

#[cfg(test)]
mod path_proptest;
