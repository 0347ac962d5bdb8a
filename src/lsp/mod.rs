//! LSP (Language Server Protocol) implementation layer
//!
//! This module carries the core's verdicts and changelogs to the editor.
//!
//! # Modules
//!
//! - [`backend`]: Main LSP backend implementing `LanguageServer` trait
//! - [`process`]: One manifest pass from lines to verdicts
//! - [`scheduler`]: Debounce and busy guard per document
//! - [`diagnostics`]: Inlay hints and diagnostics from a pass report
//! - [`hover`]: Changelog hover
//! - [`server`]: LSP server initialization and lifecycle

pub mod backend;
pub mod diagnostics;
pub mod hover;
pub mod process;
pub mod scheduler;
pub mod server;
