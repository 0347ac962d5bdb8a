//! Version comparison for declared dependencies
//!
//! Comparison is exact string equality between the operator-stripped
//! declared version and the published latest version. No semver range
//! satisfaction is attempted.

use crate::parser::types::Dependency;

/// A declared dependency joined with its registry lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub name: String,
    /// Declared version, operator-stripped
    pub current_version: String,
    /// Latest published version; `None` when the lookup failed
    pub latest_version: Option<String>,
}

/// Status of the version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionStatus {
    /// Declared version equals the latest published version
    UpToDate,
    /// A different version is published as latest
    NeedsUpdate,
}

impl VersionInfo {
    pub fn new(dependency: Dependency, latest_version: Option<String>) -> Self {
        Self {
            name: dependency.name,
            current_version: dependency.version,
            latest_version,
        }
    }

    /// Compare declared and latest versions.
    /// Returns `None` when the latest version is unknown.
    pub fn status(&self) -> Option<VersionStatus> {
        let latest = self.latest_version.as_deref()?;
        if latest == self.current_version {
            Some(VersionStatus::UpToDate)
        } else {
            Some(VersionStatus::NeedsUpdate)
        }
    }
}
