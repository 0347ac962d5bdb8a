//! Parser trait definition

use crate::parser::types::Dependency;

/// Trait for line-oriented manifest parsers
///
/// Parsers may keep session state between calls (e.g. "inside a dependency
/// block"). `reset` must be called before each new pass over a manifest;
/// skipping it never panics but lets state from the previous pass leak in.
pub trait LineParser {
    /// Parse one line, yielding at most one dependency
    fn parse_line(&mut self, line: &str) -> Option<Dependency>;

    /// Parse everything accumulated since the last reset.
    /// Only document-based formats return anything here.
    fn parse_document(&mut self) -> Vec<Dependency> {
        Vec::new()
    }

    /// Clear session state before processing a new manifest
    fn reset(&mut self) {}
}

/// Error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The accumulated document is not valid TOML
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}
