//! Version lookup layer
//!
//! This module provides the registry clients that report the latest
//! published version of a package, and the comparison that turns a
//! declared dependency plus a lookup into a verdict.
//!
//! # Modules
//!
//! - [`checker`]: Version comparison and status determination
//! - [`registry`]: Registry trait for fetching versions from remote sources
//! - [`registries`]: Concrete registry implementations (npm, PyPI, RubyGems)
//! - [`error`]: Error types for registry operations

pub mod checker;
pub mod error;
pub mod registries;
pub mod registry;
