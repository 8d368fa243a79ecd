//! Default values for pomtree configuration.
//!
//! This module provides centralized default values used across the library
//! and the CLI, ensuring consistency and avoiding duplication.

/// File name of a descriptor inside a module directory.
pub const DEFAULT_DESCRIPTOR_NAME: &str = "pom.xml";

/// File name of the optional configuration file.
pub const DEFAULT_CONFIG_FILENAME: &str = ".pomtree.yaml";

/// Parent descriptor path used when `<relativePath>` is absent.
pub const DEFAULT_PARENT_RELATIVE_PATH: &str = "../pom.xml";

/// Paths skipped by a disconnected scan unless configured otherwise.
pub fn default_exclude_patterns() -> Vec<String> {
    vec!["**/target/**".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_exclude_skips_build_output() {
        let patterns = default_exclude_patterns();
        assert_eq!(patterns, vec!["**/target/**"]);
    }

    #[test]
    fn test_default_parent_path_points_at_descriptor() {
        assert!(DEFAULT_PARENT_RELATIVE_PATH.ends_with(DEFAULT_DESCRIPTOR_NAME));
    }
}
