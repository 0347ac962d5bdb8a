//! requirements.txt parser
//!
//! Each non-empty, non-comment line is matched against, in order:
//! - `name<op>version` (e.g. `requests==2.31.0`)
//! - `name[extras]<op>version` (e.g. `uvicorn[standard]>=0.29.0`)
//! - a bare `name`, which maps to the `latest` sentinel

use regex::Regex;
use tracing::debug;

use crate::parser::traits::LineParser;
use crate::parser::types::{Dependency, LATEST_SENTINEL};

/// Parser for requirements.txt files
pub struct RequirementsTxtParser {
    /// Regex for `name<op>version`
    versioned_re: Regex,
    /// Regex for `name[extras]<op>version`
    extras_re: Regex,
    /// Regex for a line consisting of a package name only
    bare_name_re: Regex,
}

impl RequirementsTxtParser {
    pub fn new() -> Self {
        Self {
            versioned_re: Regex::new(
                r"^([A-Za-z0-9\-_.]+)\s*(===|==|>=|<=|~=|!=|>|<)\s*([0-9A-Za-z\-_.]+)",
            )
            .unwrap(),
            extras_re: Regex::new(
                r"^([A-Za-z0-9\-_.]+)\[[^\]]+\]\s*(===|==|>=|<=|~=|!=|>|<)\s*([0-9A-Za-z\-_.]+)",
            )
            .unwrap(),
            bare_name_re: Regex::new(r"^([A-Za-z0-9\-_.]+)$").unwrap(),
        }
    }

    /// Parse a single requirement line. Stateless.
    pub fn parse_requirement(&self, line: &str) -> Option<Dependency> {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }

        for re in [&self.versioned_re, &self.extras_re] {
            if let Some(caps) = re.captures(trimmed) {
                return Some(Dependency::new(&caps[1], &caps[3]));
            }
        }

        if let Some(caps) = self.bare_name_re.captures(trimmed) {
            return Some(Dependency::new(&caps[1], LATEST_SENTINEL));
        }

        debug!("No requirement found in line: {:?}", trimmed);
        None
    }
}

impl Default for RequirementsTxtParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser for RequirementsTxtParser {
    fn parse_line(&mut self, line: &str) -> Option<Dependency> {
        self.parse_requirement(line)
    }
}
