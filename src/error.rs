//! # Error Handling
//!
//! This module defines the centralized error type for `pomtree`. It uses the
//! `thiserror` library to create an `Error` enum covering every failure mode
//! the library can report, each with enough context to explain what went
//! wrong.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all possible errors. Variants carry the
//!   offending path, version string or configuration message.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library.
//!
//! Missing optional markup is never an error: navigation helpers in
//! [`crate::pom`] degrade to `None` or an empty sequence instead. Only
//! malformed markup, bad call arguments, invalid version transitions and I/O
//! failures surface here.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for pomtree operations
#[derive(Error, Debug)]
pub enum Error {
    /// A caller handed in an argument that can never be valid, such as an
    /// empty entry path.
    #[error("Invalid argument `{argument}`: {message}")]
    InvalidArgument { argument: String, message: String },

    /// The solution entry point is neither a file nor a directory.
    #[error("Solution entry point is missing: {}", path.display())]
    NotFound { path: PathBuf },

    /// The descriptor markup could not be parsed. The parser's own error is
    /// kept as the source.
    #[error("XML parsing error: {0}")]
    XmlParse(#[from] xot::ParseError),

    /// The XML tree could not be navigated, mutated or serialized.
    #[error("XML error: {0}")]
    Xml(#[from] xot::Error),

    /// The descriptor parsed, but it has no root element to read from.
    #[error("Descriptor has no root element")]
    MissingRoot,

    /// A version operation was invoked in a state that does not allow it,
    /// such as switching a release version to release.
    #[error("Invalid version state for `{version}`: {message}")]
    InvalidVersionState { version: String, message: String },

    /// A version segment that must be incremented is not a number, or is too
    /// large to increment.
    #[error("Version format error in `{version}`: segment `{segment}` is not an incrementable number")]
    VersionFormat { version: String, segment: String },

    /// An error occurred while parsing the `.pomtree.yaml` configuration file.
    ///
    /// This error includes the specific parsing issue and optionally a hint
    /// about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// Reading or writing a specific descriptor failed.
    #[error("File access error for {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// Walking the directory tree during a disconnected scan failed.
    #[error("Directory scan error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
