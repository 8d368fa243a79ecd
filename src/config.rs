//! # Configuration
//!
//! This module defines the optional `.pomtree.yaml` configuration file and
//! the logic for loading it. Every key is optional:
//!
//! ```yaml
//! descriptor: pom.xml          # descriptor file name inside a module directory
//! disconnected: false          # scan for descriptors instead of following modules
//! exclude: ["**/target/**"]    # glob patterns skipped by a disconnected scan
//! ```
//!
//! Unknown keys are rejected so typos surface instead of being ignored.
//! Command-line flags override whatever the file sets.

use crate::defaults::{default_exclude_patterns, DEFAULT_CONFIG_FILENAME, DEFAULT_DESCRIPTOR_NAME};
use crate::error::{Error, Result};
use glob::Pattern;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for opening a solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Descriptor file name looked up inside a directory entry point or
    /// module directory.
    pub descriptor: String,
    /// Use the disconnected scan instead of the connected tree.
    pub disconnected: bool,
    /// Glob patterns, relative to the base directory, skipped by the
    /// disconnected scan.
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            descriptor: DEFAULT_DESCRIPTOR_NAME.to_string(),
            disconnected: false,
            exclude: default_exclude_patterns(),
        }
    }
}

impl Config {
    /// Compiled exclude patterns.
    pub fn exclude_patterns(&self) -> Result<Vec<Pattern>> {
        self.exclude
            .iter()
            .map(|pattern| Pattern::new(pattern).map_err(Error::Glob))
            .collect()
    }

    fn validate(self) -> Result<Self> {
        if self.descriptor.is_empty()
            || self.descriptor.contains('/')
            || self.descriptor.contains('\\')
        {
            return Err(Error::ConfigParse {
                message: format!("descriptor must be a file name, got `{}`", self.descriptor),
                hint: Some(format!(
                    "Use a plain file name such as `{}`",
                    DEFAULT_DESCRIPTOR_NAME
                )),
            });
        }
        self.exclude_patterns()?;
        Ok(self)
    }
}

/// Parse a configuration from YAML text.
///
/// An empty document yields the defaults.
pub fn parse(yaml_content: &str) -> Result<Config> {
    if yaml_content.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: None,
    })?;
    config.validate()
}

/// Load a configuration file.
pub fn from_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content)
}

/// Load `.pomtree.yaml` from `dir` if it exists, defaults otherwise.
pub fn discover(dir: &Path) -> Result<Config> {
    let candidate = dir.join(DEFAULT_CONFIG_FILENAME);
    if candidate.is_file() {
        debug!("Using configuration {}", candidate.display());
        from_file(&candidate)
    } else {
        Ok(Config::default())
    }
}
