//! Shared test utilities for integration and E2E tests.
//!
//! This module provides a fixture that lays out a small multi-module Maven
//! build in a temporary directory, plus the descriptor texts it uses.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_multi_module_build();
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::poms;
    pub use super::TestFixture;
}

/// Descriptor texts for a three-module build.
#[allow(dead_code)]
pub mod poms {
    /// Aggregator with a comment and an unmodeled `<description>`.
    pub const ROOT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
    <modelVersion>4.0.0</modelVersion>
    <!-- release train parent -->
    <groupId>org.example</groupId>
    <artifactId>root</artifactId>
    <version>1.2.3-SNAPSHOT</version>
    <packaging>pom</packaging>
    <description>Parent of everything</description>
    <modules>
        <module>core</module>
        <module>app</module>
    </modules>
</project>
"#;

    /// Library module with its own version.
    pub const CORE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <parent>
        <groupId>org.example</groupId>
        <artifactId>root</artifactId>
        <version>1.2.3-SNAPSHOT</version>
    </parent>
    <artifactId>core</artifactId>
    <version>1.2.3-SNAPSHOT</version>
</project>
"#;

    /// Application module inheriting its version, with a classifier
    /// placeholder.
    pub const APP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <parent>
        <groupId>org.example</groupId>
        <artifactId>root</artifactId>
        <version>1.2.3-SNAPSHOT</version>
    </parent>
    <artifactId>app</artifactId>
    <dependencies>
        <dependency>
            <groupId>org.example</groupId>
            <artifactId>core</artifactId>
            <version>1.2.3-SNAPSHOT</version>
            <classifier>native-${env}</classifier>
        </dependency>
    </dependencies>
    <build>
        <plugins>
            <plugin>
                <artifactId>maven-jar-plugin</artifactId>
                <configuration>
                    <archive><manifest><mainClass>org.example.App</mainClass></manifest></archive>
                </configuration>
            </plugin>
        </plugins>
    </build>
</project>
"#;

    /// A copy left behind by a build, excluded from scans by default.
    pub const BUILD_OUTPUT: &str =
        "<project><groupId>org.example</groupId><artifactId>stale</artifactId></project>\n";
}

/// A test fixture that provides a temporary directory holding descriptors.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Lay out `pom.xml`, `core/pom.xml`, `app/pom.xml` and a stale copy
    /// under `app/target/`.
    pub fn with_multi_module_build(self) -> Self {
        self.with_file("pom.xml", poms::ROOT)
            .with_file("core/pom.xml", poms::CORE)
            .with_file("app/pom.xml", poms::APP)
            .with_file("app/target/classes/pom.xml", poms::BUILD_OUTPUT)
    }

    /// Add a `.pomtree.yaml` configuration file with the given content.
    #[allow(dead_code)]
    pub fn with_config(self, content: &str) -> Self {
        self.with_file(".pomtree.yaml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Read a file below the fixture root.
    #[allow(dead_code)]
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.temp_dir.path().join(path)).expect("Failed to read file")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
