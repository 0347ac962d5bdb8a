//! Dependency manifest annotations over LSP
//!
//! Parses `requirements.txt`, `package.json`, `pyproject.toml` and `Gemfile`,
//! looks up the latest published version of every declared dependency and
//! resolves changelogs for hovers.

pub mod changelog;
pub mod config;
pub mod lsp;
pub mod parser;
pub mod version;
