//! package.json parser
//!
//! Line-oriented: a line mentioning `"dependencies"` or `"devDependencies"`
//! opens a block, and a line that is exactly `},` (after trimming) closes
//! every open block. Only `"name": "version"` pairs inside an open block
//! are reported.

use regex::Regex;
use tracing::debug;

use crate::parser::traits::LineParser;
use crate::parser::types::{Dependency, strip_range_operators};

/// Parser for package.json files
pub struct PackageJsonParser {
    /// Regex for `"key": "value"` pairs
    pair_re: Regex,
    in_dependencies: bool,
    in_dev_dependencies: bool,
}

impl PackageJsonParser {
    pub fn new() -> Self {
        Self {
            pair_re: Regex::new(r#""([^"]+)":\s*"([^"]+)""#).unwrap(),
            in_dependencies: false,
            in_dev_dependencies: false,
        }
    }

    fn in_dependency_block(&self) -> bool {
        self.in_dependencies || self.in_dev_dependencies
    }
}

impl Default for PackageJsonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser for PackageJsonParser {
    fn parse_line(&mut self, line: &str) -> Option<Dependency> {
        if line.contains(r#""dependencies""#) {
            self.in_dependencies = true;
            return None;
        }
        if line.contains(r#""devDependencies""#) {
            self.in_dev_dependencies = true;
            return None;
        }
        if line.trim() == "}," {
            self.in_dependencies = false;
            self.in_dev_dependencies = false;
            return None;
        }

        if !self.in_dependency_block() {
            return None;
        }

        let caps = self.pair_re.captures(line)?;
        let dependency = Dependency::new(&caps[1], strip_range_operators(&caps[2]));
        debug!(
            "Parsed npm dependency: {}@{}",
            dependency.name, dependency.version
        );
        Some(dependency)
    }

    fn reset(&mut self) {
        self.in_dependencies = false;
        self.in_dev_dependencies = false;
    }
}
