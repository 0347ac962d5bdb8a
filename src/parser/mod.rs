//! Parser layer
//! - traits.rs: LineParser trait definition
//! - types.rs: Common types (Dependency, FileType, RegistryType)
//! - requirements_txt.rs: requirements.txt parser
//! - package_json.rs: package.json parser
//! - pyproject_toml.rs: pyproject.toml parser
//! - gemfile.rs: Gemfile parser
//! - hover.rs: stateless single-line extraction for hovers

pub mod gemfile;
pub mod hover;
pub mod package_json;
pub mod pyproject_toml;
pub mod requirements_txt;
pub mod traits;
pub mod types;

pub use gemfile::GemfileParser;
pub use hover::HoverExtractor;
pub use package_json::PackageJsonParser;
pub use pyproject_toml::PyprojectTomlParser;
pub use requirements_txt::RequirementsTxtParser;
pub use traits::{LineParser, ParseError};
pub use types::{Dependency, FileType, RegistryType};

/// One parser per manifest format, selected by [`FileType`]
pub enum ManifestParser {
    RequirementsTxt(RequirementsTxtParser),
    PackageJson(PackageJsonParser),
    PyprojectToml(PyprojectTomlParser),
    Gemfile(GemfileParser),
}

impl ManifestParser {
    pub fn new(file_type: FileType) -> Self {
        match file_type {
            FileType::RequirementsTxt => Self::RequirementsTxt(RequirementsTxtParser::new()),
            FileType::PackageJson => Self::PackageJson(PackageJsonParser::new()),
            FileType::PyprojectToml => Self::PyprojectToml(PyprojectTomlParser::new()),
            FileType::Gemfile => Self::Gemfile(GemfileParser::new()),
        }
    }

    pub fn file_type(&self) -> FileType {
        match self {
            Self::RequirementsTxt(_) => FileType::RequirementsTxt,
            Self::PackageJson(_) => FileType::PackageJson,
            Self::PyprojectToml(_) => FileType::PyprojectToml,
            Self::Gemfile(_) => FileType::Gemfile,
        }
    }

    /// Whether declarations come from `parse_document` rather than `parse_line`
    pub fn is_document_based(&self) -> bool {
        matches!(self, Self::PyprojectToml(_))
    }
}

impl LineParser for ManifestParser {
    fn parse_line(&mut self, line: &str) -> Option<Dependency> {
        match self {
            Self::RequirementsTxt(parser) => parser.parse_line(line),
            Self::PackageJson(parser) => parser.parse_line(line),
            Self::PyprojectToml(parser) => parser.parse_line(line),
            Self::Gemfile(parser) => parser.parse_line(line),
        }
    }

    fn parse_document(&mut self) -> Vec<Dependency> {
        match self {
            Self::RequirementsTxt(parser) => parser.parse_document(),
            Self::PackageJson(parser) => parser.parse_document(),
            Self::PyprojectToml(parser) => parser.parse_document(),
            Self::Gemfile(parser) => parser.parse_document(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::RequirementsTxt(parser) => parser.reset(),
            Self::PackageJson(parser) => parser.reset(),
            Self::PyprojectToml(parser) => parser.reset(),
            Self::Gemfile(parser) => parser.reset(),
        }
    }
}
