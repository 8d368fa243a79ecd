//! Property-based tests for path normalization and version transitions.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::config::Config;
    use crate::path::normalize;
    use crate::version::ComponentVersion;
    use proptest::prelude::*;
    use std::path::{Component, Path};

    // ============================================================================
    // normalize property tests
    // ============================================================================

    proptest! {
        /// Property: normalize is idempotent
        #[test]
        fn normalize_is_idempotent(segments in prop::collection::vec("(\\.|\\.\\.|[a-z]{1,6})", 0..10)) {
            let path = format!("/{}", segments.join("/"));
            let once = normalize(Path::new(&path));
            let twice = normalize(&once);
            prop_assert_eq!(once, twice);
        }

        /// Property: an absolute path never keeps `.` or `..` after normalization
        #[test]
        fn normalize_absolute_has_no_dot_segments(segments in prop::collection::vec("(\\.|\\.\\.|[a-z]{1,6})", 0..10)) {
            let path = format!("/{}", segments.join("/"));
            let normalized = normalize(Path::new(&path));
            prop_assert!(normalized.is_absolute());
            for component in normalized.components() {
                prop_assert!(!matches!(component, Component::CurDir | Component::ParentDir));
            }
        }

        /// Property: plain segments survive normalization unchanged
        #[test]
        fn normalize_preserves_plain_paths(segments in prop::collection::vec("[a-z]{1,6}", 1..8)) {
            let path = format!("/{}", segments.join("/"));
            prop_assert_eq!(normalize(Path::new(&path)), Path::new(&path).to_path_buf());
        }

        /// Property: anything under a target directory is excluded by the default glob
        #[test]
        fn target_glob_matches_nested_build_output(
            prefix in prop::collection::vec("[a-z]{1,6}", 0..4),
            suffix in prop::collection::vec("[a-z]{1,6}", 1..4),
        ) {
            let mut parts = prefix.clone();
            parts.push("target".to_string());
            parts.extend(suffix);
            let path = parts.join("/");
            let excludes = Config::default().exclude_patterns().unwrap();
            prop_assert!(excludes.iter().any(|pattern| pattern.matches(&path)));
        }
    }

    // ============================================================================
    // ComponentVersion property tests
    // ============================================================================

    fn numeric_version() -> impl Strategy<Value = String> {
        prop::collection::vec(0u32..1000, 2..5).prop_map(|segments| {
            segments
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(".")
        })
    }

    proptest! {
        /// Property: release -> snapshot always yields a snapshot
        #[test]
        fn increment_yields_snapshot(version in numeric_version()) {
            let next = ComponentVersion::new(version)
                .switch_release_to_snapshot_with_increment()
                .unwrap();
            prop_assert!(next.is_snapshot());
            prop_assert!(!next.is_release());
        }

        /// Property: increment bumps the second segment and zeroes the rest
        #[test]
        fn increment_bumps_second_segment(version in numeric_version()) {
            let segments: Vec<u64> = version.split('.').map(|s| s.parse().unwrap()).collect();
            let next = ComponentVersion::new(version.clone())
                .switch_release_to_snapshot_with_increment()
                .unwrap();
            let numeric = next.value().unwrap().trim_end_matches("-SNAPSHOT");
            let bumped: Vec<u64> = numeric.split('.').map(|s| s.parse().unwrap()).collect();

            prop_assert_eq!(bumped.len(), segments.len());
            prop_assert_eq!(bumped[0], segments[0]);
            prop_assert_eq!(bumped[1], segments[1] + 1);
            prop_assert!(bumped[2..].iter().all(|&s| s == 0));
        }

        /// Property: snapshot -> release without qualifier strips exactly the suffix
        #[test]
        fn release_strips_suffix(version in numeric_version()) {
            let snapshot = ComponentVersion::new(format!("{}-SNAPSHOT", version));
            let release = snapshot.switch_snapshot_to_release(None).unwrap();
            prop_assert_eq!(release.value(), Some(version.as_str()));
            prop_assert!(release.is_release());
        }

        /// Property: a snapshot is never accepted by the increment
        #[test]
        fn increment_rejects_snapshots(version in numeric_version()) {
            let snapshot = ComponentVersion::new(format!("{}-SNAPSHOT", version));
            prop_assert!(snapshot.switch_release_to_snapshot_with_increment().is_err());
        }
    }
}
