//! Stateless single-line extraction used by the changelog hover
//!
//! Unlike the pass parsers, nothing here tracks blocks or buffers text:
//! the hovered line alone decides which dependency (if any) it names.

use regex::Regex;

use crate::parser::gemfile::GemfileParser;
use crate::parser::requirements_txt::RequirementsTxtParser;
use crate::parser::types::{Dependency, FileType, strip_range_operators};

/// Extracts the dependency named on a single manifest line
pub struct HoverExtractor {
    /// `"key": "value"` in package.json
    json_pair_re: Regex,
    /// Quoted PEP 508 entry in pyproject.toml: `"name>=1.0"`
    quoted_requirement_re: Regex,
    /// Inline table in pyproject.toml: `name = { version = "1.0" }`
    inline_table_re: Regex,
    /// Plain assignment in pyproject.toml: `name = "1.0"`
    assignment_re: Regex,
    requirements: RequirementsTxtParser,
    gemfile: GemfileParser,
}

impl HoverExtractor {
    pub fn new() -> Self {
        Self {
            json_pair_re: Regex::new(r#""([^"]+)":\s*"([^"]+)""#).unwrap(),
            quoted_requirement_re: Regex::new(
                r#"["']([A-Za-z0-9\-_.]+)(?:\[[^\]]*\])?\s*[~=<>!]+\s*([0-9A-Za-z\-_.]+)[^"']*["']"#,
            )
            .unwrap(),
            inline_table_re: Regex::new(
                r#"^\s*([^=\s]+)\s*=\s*\{\s*version\s*=\s*["']([^"']+)["']"#,
            )
            .unwrap(),
            assignment_re: Regex::new(r#"^\s*([^=\s]+)\s*=\s*["']([^"']+)["']"#).unwrap(),
            requirements: RequirementsTxtParser::new(),
            gemfile: GemfileParser::new(),
        }
    }

    /// Extract the dependency declared on `line` of a file of type `file_type`
    pub fn extract(&self, file_type: FileType, line: &str) -> Option<Dependency> {
        match file_type {
            FileType::PackageJson => {
                let caps = self.json_pair_re.captures(line)?;
                Some(Dependency::new(&caps[1], strip_range_operators(&caps[2])))
            }
            FileType::RequirementsTxt => self.requirements.parse_requirement(line),
            FileType::PyprojectToml => self.extract_pyproject(line),
            FileType::Gemfile => self.gemfile.parse_gem(line),
        }
    }

    fn extract_pyproject(&self, line: &str) -> Option<Dependency> {
        let caps = [
            &self.quoted_requirement_re,
            &self.inline_table_re,
            &self.assignment_re,
        ]
        .into_iter()
        .find_map(|re| re.captures(line))?;

        let version = strip_range_operators(&caps[2]);
        if version.is_empty() {
            return None;
        }
        Some(Dependency::new(caps[1].trim(), version))
    }
}

impl Default for HoverExtractor {
    fn default() -> Self {
        Self::new()
    }
}
