//! One manifest processing pass: parse, look up, classify

use indexmap::IndexMap;
use regex::Regex;
use tracing::debug;

use crate::parser::ManifestParser;
use crate::parser::traits::LineParser;
use crate::parser::types::Dependency;
use crate::version::checker::{VersionInfo, VersionStatus};
use crate::version::registry::{Registry, lookup_latest_version};

/// End of an annotated line. `column` counts UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMark {
    pub line: u32,
    pub column: u32,
}

impl LineMark {
    pub fn end_of_line(line: usize, text: &str) -> Self {
        Self {
            line: line as u32,
            column: text.encode_utf16().count() as u32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMark {
    pub mark: LineMark,
    pub current_version: String,
    pub latest_version: String,
}

/// Verdicts of one pass, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestReport {
    pub up_to_date: Vec<LineMark>,
    pub needs_update: Vec<UpdateMark>,
}

impl ManifestReport {
    /// Needs-update marks grouped by target version, first seen first
    pub fn grouped_updates(&self) -> IndexMap<String, Vec<LineMark>> {
        let mut groups: IndexMap<String, Vec<LineMark>> = IndexMap::new();
        for update in &self.needs_update {
            groups
                .entry(update.latest_version.clone())
                .or_default()
                .push(update.mark);
        }
        groups
    }

    pub fn is_empty(&self) -> bool {
        self.up_to_date.is_empty() && self.needs_update.is_empty()
    }

    fn record(&mut self, mark: LineMark, info: VersionInfo) {
        match info.status() {
            Some(VersionStatus::UpToDate) => self.up_to_date.push(mark),
            Some(VersionStatus::NeedsUpdate) => self.needs_update.push(UpdateMark {
                mark,
                current_version: info.current_version,
                latest_version: info.latest_version.unwrap_or_default(),
            }),
            None => debug!("No latest version for {}, skipping", info.name),
        }
    }
}

/// Run one pass over `lines`.
///
/// The parser is reset first. Declarations are resolved one at a time in
/// document order; failed lookups leave their line unannotated.
pub async fn process_manifest(
    parser: &mut ManifestParser,
    registry: &dyn Registry,
    lines: &[&str],
) -> ManifestReport {
    parser.reset();
    let mut report = ManifestReport::default();

    if parser.is_document_based() {
        for line in lines {
            parser.parse_line(line);
        }

        for dependency in parser.parse_document() {
            let Some(line) = find_table_anchor(lines, &dependency.name) else {
                debug!("No line found for {}", dependency.name);
                continue;
            };
            let info = resolve(registry, dependency).await;
            report.record(LineMark::end_of_line(line, lines[line]), info);
        }
    } else {
        for (line, text) in lines.iter().enumerate() {
            let Some(dependency) = parser.parse_line(text) else {
                continue;
            };
            let info = resolve(registry, dependency).await;
            report.record(LineMark::end_of_line(line, text), info);
        }
    }

    report
}

async fn resolve(registry: &dyn Registry, dependency: Dependency) -> VersionInfo {
    let latest = lookup_latest_version(registry, &dependency.name).await;
    VersionInfo::new(dependency, latest)
}

/// First line holding a quoted `name==`, `name>=` or `name~=` entry
fn find_table_anchor(lines: &[&str], name: &str) -> Option<usize> {
    let re = Regex::new(&format!(r#"["']{}\s*(==|>=|~=)"#, regex::escape(name))).ok()?;
    lines.iter().position(|line| re.is_match(line))
}
