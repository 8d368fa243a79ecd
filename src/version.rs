//! # Component Versions
//!
//! [`ComponentVersion`] wraps the raw `<version>` string of a descriptor and
//! implements the snapshot/release state machine used by release tooling.
//!
//! ## States
//!
//! - **Undefined**: no version string, or an empty one.
//! - **Snapshot**: the string ends with [`SNAPSHOT_SUFFIX`].
//! - **Release**: any other defined string.
//!
//! Classification is a fixed-suffix textual test. No numeric comparison is
//! ever performed, and equality is exact-string: `1.0` and `1.0.0` differ.
//!
//! ## Transitions
//!
//! - `switch_snapshot_to_release` strips the suffix and appends an optional
//!   qualifier (`1.2.3-SNAPSHOT` → `1.2.3-rc1`).
//! - `switch_release_to_snapshot_with_increment` bumps the segment at
//!   [`INCREMENT_POSITION`], zeroes every later segment and appends the suffix
//!   (`1.2.3` → `1.3.0-SNAPSHOT`).
//!
//! The bumped segment is the minor number, not the patch number:
//! `1.2.3` never becomes `1.2.4-SNAPSHOT`. A patch-level bump is an explicit
//! [`SetVersion`](crate::actions::SetVersion).

use std::fmt;

use crate::error::{Error, Result};

/// Suffix that marks a snapshot version.
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Version used when authoring a new descriptor.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Zero-based index of the numeric segment bumped on release → snapshot.
pub const INCREMENT_POSITION: usize = 1;

const QUALIFIER_SEPARATOR: char = '-';

/// Immutable version value of a project coordinate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ComponentVersion {
    value: Option<String>,
}

impl ComponentVersion {
    /// Wrap a raw version string.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    /// A version with no value at all (no `<version>` element).
    pub fn undefined() -> Self {
        Self::default()
    }

    /// Wrap an optional raw version string, as read from markup.
    pub fn from_optional(value: Option<String>) -> Self {
        Self { value }
    }

    /// The raw string, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_defined(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.is_empty())
    }

    pub fn is_snapshot(&self) -> bool {
        self.defined_value()
            .is_some_and(|v| v.ends_with(SNAPSHOT_SUFFIX))
    }

    pub fn is_release(&self) -> bool {
        self.defined_value()
            .is_some_and(|v| !v.ends_with(SNAPSHOT_SUFFIX))
    }

    fn defined_value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }

    /// Switch a snapshot to its release, appending `qualifier` if given.
    ///
    /// A qualifier without a leading `-` gets one; an empty qualifier appends
    /// nothing.
    pub fn switch_snapshot_to_release(&self, qualifier: Option<&str>) -> Result<Self> {
        let value = self.require_defined()?;
        if !self.is_snapshot() {
            return Err(self.state_error("version already in release"));
        }
        let base = &value[..value.len() - SNAPSHOT_SUFFIX.len()];
        Ok(Self::new(format!("{}{}", base, normalize_qualifier(qualifier))))
    }

    /// Switch a release to the next snapshot.
    pub fn switch_release_to_snapshot_with_increment(&self) -> Result<Self> {
        let value = self.require_defined()?;
        if !self.is_release() {
            return Err(self.state_error("version already in snapshot"));
        }
        let incremented = increment_segment(value, INCREMENT_POSITION)?;
        Ok(Self::new(format!("{}{}", incremented, SNAPSHOT_SUFFIX)))
    }

    fn require_defined(&self) -> Result<&str> {
        self.defined_value()
            .ok_or_else(|| self.state_error("version undefined"))
    }

    fn state_error(&self, message: &str) -> Error {
        Error::InvalidVersionState {
            version: self.value.clone().unwrap_or_default(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ComponentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value.as_deref().unwrap_or_default())
    }
}

impl From<&str> for ComponentVersion {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

fn normalize_qualifier(qualifier: Option<&str>) -> String {
    match qualifier {
        None | Some("") => String::new(),
        Some(q) if q.starts_with(QUALIFIER_SEPARATOR) => q.to_string(),
        Some(q) => format!("{}{}", QUALIFIER_SEPARATOR, q),
    }
}

/// Bump the numeric segment at `position` and zero every later one.
///
/// Everything from the first `-` on is kept as an opaque suffix. Segments
/// after `position` are reset without being parsed.
fn increment_segment(version: &str, position: usize) -> Result<String> {
    let (numbers, suffix) = match version.find(QUALIFIER_SEPARATOR) {
        Some(at) => version.split_at(at),
        None => (version, ""),
    };

    let mut segments = Vec::new();
    for (index, segment) in numbers.split('.').enumerate() {
        if index > position {
            segments.push("0".to_string());
            continue;
        }
        let number: u64 = segment.parse().map_err(|_| Error::VersionFormat {
            version: version.to_string(),
            segment: segment.to_string(),
        })?;
        if index == position {
            let next = number.checked_add(1).ok_or_else(|| Error::VersionFormat {
                version: version.to_string(),
                segment: segment.to_string(),
            })?;
            segments.push(next.to_string());
        } else {
            segments.push(segment.to_string());
        }
    }

    Ok(format!("{}{}", segments.join("."), suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let snapshot = ComponentVersion::new("1.2.3-SNAPSHOT");
        assert!(snapshot.is_defined());
        assert!(snapshot.is_snapshot());
        assert!(!snapshot.is_release());

        let release = ComponentVersion::new("1.2.3");
        assert!(release.is_release());
        assert!(!release.is_snapshot());
    }

    #[test]
    fn test_undefined_is_neither() {
        for version in [ComponentVersion::undefined(), ComponentVersion::new("")] {
            assert!(!version.is_defined());
            assert!(!version.is_snapshot());
            assert!(!version.is_release());
        }
    }

    #[test]
    fn test_snapshot_to_release() {
        let v = ComponentVersion::new("1.2.3-SNAPSHOT");
        assert_eq!(v.switch_snapshot_to_release(None).unwrap().value(), Some("1.2.3"));
        assert_eq!(v.switch_snapshot_to_release(Some("")).unwrap().value(), Some("1.2.3"));
        assert_eq!(
            v.switch_snapshot_to_release(Some("rc1")).unwrap().value(),
            Some("1.2.3-rc1")
        );
        assert_eq!(
            v.switch_snapshot_to_release(Some("-rc1")).unwrap().value(),
            Some("1.2.3-rc1")
        );
    }

    #[test]
    fn test_release_to_snapshot() {
        let v = ComponentVersion::new("1.2.3");
        assert_eq!(
            v.switch_release_to_snapshot_with_increment().unwrap().value(),
            Some("1.3.0-SNAPSHOT")
        );
    }

    #[test]
    fn test_release_to_snapshot_keeps_suffix() {
        let v = ComponentVersion::new("1.2.3-beta");
        assert_eq!(
            v.switch_release_to_snapshot_with_increment().unwrap().value(),
            Some("1.3.0-beta-SNAPSHOT")
        );
    }

    #[test]
    fn test_release_to_snapshot_resets_every_later_segment() {
        let v = ComponentVersion::new("2.7.9.4");
        assert_eq!(
            v.switch_release_to_snapshot_with_increment().unwrap().value(),
            Some("2.8.0.0-SNAPSHOT")
        );
    }

    #[test]
    fn test_short_version_has_no_padding() {
        let v = ComponentVersion::new("4");
        assert_eq!(
            v.switch_release_to_snapshot_with_increment().unwrap().value(),
            Some("4-SNAPSHOT")
        );
    }

    #[test]
    fn test_wrong_state_errors() {
        let snapshot = ComponentVersion::new("1.0-SNAPSHOT");
        assert!(matches!(
            snapshot.switch_release_to_snapshot_with_increment(),
            Err(Error::InvalidVersionState { .. })
        ));

        let release = ComponentVersion::new("1.0");
        let err = release.switch_snapshot_to_release(None).unwrap_err();
        assert!(err.to_string().contains("already in release"));

        let undefined = ComponentVersion::undefined();
        let err = undefined.switch_snapshot_to_release(None).unwrap_err();
        assert!(err.to_string().contains("version undefined"));
        assert!(undefined.switch_release_to_snapshot_with_increment().is_err());
    }

    #[test]
    fn test_non_numeric_segment_is_format_error() {
        let v = ComponentVersion::new("1.x.3");
        assert!(matches!(
            v.switch_release_to_snapshot_with_increment(),
            Err(Error::VersionFormat { segment, .. }) if segment == "x"
        ));
    }

    #[test]
    fn test_overflowing_segment_is_format_error() {
        let v = ComponentVersion::new("1.18446744073709551615.0");
        assert!(matches!(
            v.switch_release_to_snapshot_with_increment(),
            Err(Error::VersionFormat { segment, .. }) if segment == "18446744073709551615"
        ));
    }

    #[test]
    fn test_default_version_is_a_release() {
        let version = ComponentVersion::from(DEFAULT_VERSION);
        assert!(version.is_release());
        assert_eq!(
            version.switch_release_to_snapshot_with_increment().unwrap().value(),
            Some("1.1.0-SNAPSHOT")
        );
    }

    #[test]
    fn test_equality_is_exact_string() {
        assert_eq!(ComponentVersion::new("1.0"), ComponentVersion::new("1.0"));
        assert_ne!(ComponentVersion::new("1.0"), ComponentVersion::new("1.0.0"));
        assert_eq!(ComponentVersion::new("1.0").to_string(), "1.0");
    }
}
