//! Common types for parsers

use std::path::Path;

/// Supported manifest formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// requirements.txt (one requirement per line)
    RequirementsTxt,
    /// package.json (dependencies / devDependencies objects)
    PackageJson,
    /// pyproject.toml (project.dependencies and optional-dependencies)
    PyprojectToml,
    /// Gemfile (`gem 'name', 'constraint'` calls)
    Gemfile,
}

impl FileType {
    /// Detect the file type from an exact base name
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        match file_name {
            "requirements.txt" => Some(FileType::RequirementsTxt),
            "package.json" => Some(FileType::PackageJson),
            "pyproject.toml" => Some(FileType::PyprojectToml),
            "Gemfile" => Some(FileType::Gemfile),
            _ => None,
        }
    }

    /// Detect the file type ignoring case (`gemfile`, `Package.json`, ...)
    pub fn from_file_name_case_insensitive(file_name: &str) -> Option<Self> {
        match file_name.to_lowercase().as_str() {
            "requirements.txt" => Some(FileType::RequirementsTxt),
            "package.json" => Some(FileType::PackageJson),
            "pyproject.toml" => Some(FileType::PyprojectToml),
            "gemfile" => Some(FileType::Gemfile),
            _ => None,
        }
    }

    /// Detect the file type from the last segment of a document URI
    pub fn from_uri(uri: &str) -> Option<Self> {
        Self::from_file_name(base_name(uri))
    }

    /// Like [`FileType::from_uri`] but ignoring case
    pub fn from_uri_case_insensitive(uri: &str) -> Option<Self> {
        Self::from_file_name_case_insensitive(base_name(uri))
    }

    /// Registry that publishes the packages declared in this file type
    pub fn registry_type(&self) -> RegistryType {
        match self {
            FileType::RequirementsTxt | FileType::PyprojectToml => RegistryType::PyPI,
            FileType::PackageJson => RegistryType::Npm,
            FileType::Gemfile => RegistryType::RubyGems,
        }
    }
}

/// Type of package registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryType {
    /// npm registry (package.json)
    Npm,
    /// PyPI (requirements.txt, pyproject.toml)
    PyPI,
    /// RubyGems (Gemfile)
    RubyGems,
}

impl RegistryType {
    /// Returns the string representation of the registry type
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryType::Npm => "npm",
            RegistryType::PyPI => "pypi",
            RegistryType::RubyGems => "rubygems",
        }
    }

    /// Map a file name or path to the registry whose changelogs apply to it.
    /// The base name is compared case-insensitively.
    pub fn from_changelog_hint(hint: &str) -> Option<Self> {
        let file_name = Path::new(hint)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(hint);

        FileType::from_file_name_case_insensitive(file_name)
            .map(|file_type| file_type.registry_type())
    }
}

/// A dependency declared in a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Package name as written in the manifest
    pub name: String,
    /// Declared version with range operators stripped, or `latest`
    pub version: String,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Version used for entries that name a package without constraining it
pub const LATEST_SENTINEL: &str = "latest";

/// Strip leading range operators (`^`, `~`, `>`, `<`, `=`) and surrounding whitespace
pub fn strip_range_operators(version: &str) -> &str {
    version
        .trim()
        .trim_start_matches(['^', '~', '>', '<', '='])
        .trim()
}

fn base_name(uri: &str) -> &str {
    uri.rsplit(['/', '\\']).next().unwrap_or(uri)
}
