//! pyproject.toml parser for Python dependencies
//!
//! Document-based: `parse_line` only buffers text, and `parse_document`
//! parses the whole buffer once every line has been fed. Supports:
//! - `[project].dependencies` - Main project dependencies
//! - `[project.optional-dependencies]` - Every named group
//!
//! Entries must look like `name==1.0`, `name>=1.0` or `name~=1.0`;
//! anything else (URL dependencies, bare names, markers only) is dropped.

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::parser::traits::{LineParser, ParseError};
use crate::parser::types::Dependency;

#[derive(Debug, Default, Deserialize)]
struct PyprojectDocument {
    #[serde(default)]
    project: Option<ProjectTable>,
}

#[derive(Debug, Default, Deserialize)]
struct ProjectTable {
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default, rename = "optional-dependencies")]
    optional_dependencies: IndexMap<String, Vec<String>>,
}

/// Parser for pyproject.toml files
pub struct PyprojectTomlParser {
    /// Regex for a single requirement entry: `name<op>version`
    requirement_re: Regex,
    /// Text accumulated since the last reset
    buffer: String,
}

impl PyprojectTomlParser {
    pub fn new() -> Self {
        Self {
            requirement_re: Regex::new(r"^([a-zA-Z0-9\-_.]+)\s*(==|>=|~=)\s*([\d.]+)").unwrap(),
            buffer: String::new(),
        }
    }

    /// Parse a complete pyproject.toml document
    pub fn parse_content(&self, content: &str) -> Result<Vec<Dependency>, ParseError> {
        let document: PyprojectDocument = toml::from_str(content)?;
        let Some(project) = document.project else {
            return Ok(Vec::new());
        };

        let entries = project
            .dependencies
            .iter()
            .chain(project.optional_dependencies.values().flatten());

        Ok(entries
            .filter_map(|entry| self.parse_requirement(entry))
            .collect())
    }

    fn parse_requirement(&self, entry: &str) -> Option<Dependency> {
        let Some(caps) = self.requirement_re.captures(entry) else {
            debug!("Skipping unsupported requirement: {:?}", entry);
            return None;
        };
        Some(Dependency::new(&caps[1], &caps[3]))
    }
}

impl Default for PyprojectTomlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser for PyprojectTomlParser {
    fn parse_line(&mut self, line: &str) -> Option<Dependency> {
        self.buffer.push_str(line);
        self.buffer.push('\n');
        None
    }

    fn parse_document(&mut self) -> Vec<Dependency> {
        self.parse_content(&self.buffer)
            .inspect_err(|e| warn!("Failed to parse pyproject.toml: {}", e))
            .unwrap_or_default()
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(parser: &mut PyprojectTomlParser, content: &str) -> Vec<Dependency> {
        for line in content.lines() {
            assert_eq!(parser.parse_line(line), None);
        }
        parser.parse_document()
    }

    #[test]
    fn parse_document_extracts_project_dependencies() {
        let mut parser = PyprojectTomlParser::new();
        let content = r#"
[project]
dependencies = [
    "fastapi>=0.110.0",
    "sqlalchemy>=2.0.0",
    "pydantic>=2.6.0"
]"#;

        assert_eq!(
            feed(&mut parser, content),
            vec![
                Dependency::new("fastapi", "0.110.0"),
                Dependency::new("sqlalchemy", "2.0.0"),
                Dependency::new("pydantic", "2.6.0"),
            ]
        );
    }

    #[test]
    fn parse_document_flattens_optional_dependencies() {
        let mut parser = PyprojectTomlParser::new();
        let content = r#"
[project]
dependencies = ["fastapi>=0.110.0"]

[project.optional-dependencies]
test = [
    "pytest>=8.0.0",
    "pytest-cov>=4.1.0"
]
docs = ["mkdocs~=1.5.3"]"#;

        assert_eq!(
            feed(&mut parser, content),
            vec![
                Dependency::new("fastapi", "0.110.0"),
                Dependency::new("pytest", "8.0.0"),
                Dependency::new("pytest-cov", "4.1.0"),
                Dependency::new("mkdocs", "1.5.3"),
            ]
        );
    }

    #[test]
    fn parse_document_drops_unsupported_entries() {
        let mut parser = PyprojectTomlParser::new();
        let content = r#"
[project]
dependencies = [
    "requests",
    "httpx<1.0",
    "pkg @ git+https://github.com/org/pkg.git",
    "django>=3.2,<4.0",
    "numpy==1.26.4",
]"#;

        assert_eq!(
            feed(&mut parser, content),
            vec![
                Dependency::new("django", "3.2"),
                Dependency::new("numpy", "1.26.4"),
            ]
        );
    }

    #[test]
    fn parse_document_returns_empty_for_invalid_toml() {
        let mut parser = PyprojectTomlParser::new();
        assert!(feed(&mut parser, "invalid toml content").is_empty());
    }

    #[test]
    fn parse_document_returns_empty_without_dependencies() {
        let mut parser = PyprojectTomlParser::new();
        let content = r#"
[project]
name = "example-project"
version = "0.1.0""#;

        assert!(feed(&mut parser, content).is_empty());
    }

    #[test]
    fn parse_content_reports_toml_errors() {
        let parser = PyprojectTomlParser::new();
        assert!(matches!(
            parser.parse_content("[project"),
            Err(ParseError::Toml(_))
        ));
    }

    #[test]
    fn reset_discards_buffered_text() {
        let mut parser = PyprojectTomlParser::new();
        feed(
            &mut parser,
            "[project]\ndependencies = [\"fastapi>=0.110.0\"]",
        );

        parser.reset();
        let result = feed(&mut parser, "[project]\ndependencies = [\"flask==3.0.0\"]");

        assert_eq!(result, vec![Dependency::new("flask", "3.0.0")]);
    }
}
