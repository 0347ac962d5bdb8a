//! Gemfile parser
//!
//! Matches `gem 'name', 'constraint'` declarations. Gems without a version
//! argument are not tracked.

use regex::Regex;
use tracing::{debug, warn};

use crate::parser::traits::LineParser;
use crate::parser::types::{Dependency, strip_range_operators};

/// Parser for Gemfile files
pub struct GemfileParser {
    /// Regex for `gem 'name'[, 'constraint']`
    gem_re: Regex,
}

impl GemfileParser {
    pub fn new() -> Self {
        Self {
            gem_re: Regex::new(r#"^\s*gem\s+['"]([^'"]+)['"](?:,\s*['"]([^'"]+)['"])?"#).unwrap(),
        }
    }

    /// Parse a single Gemfile line. Stateless.
    pub fn parse_gem(&self, line: &str) -> Option<Dependency> {
        let caps = self.gem_re.captures(line)?;
        let name = &caps[1];
        let constraint = caps.get(2)?;

        let version = strip_range_operators(constraint.as_str());
        if version.is_empty() {
            warn!("Failed to parse version for Ruby gem: {}", name);
            return None;
        }

        debug!("Parsed Ruby gem: {}@{}", name, version);
        Some(Dependency::new(name, version))
    }
}

impl Default for GemfileParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser for GemfileParser {
    fn parse_line(&mut self, line: &str) -> Option<Dependency> {
        self.parse_gem(line)
    }
}
