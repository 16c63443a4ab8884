//! Resolve the runtime release lines a project should be tested against.
//!
//! A project's constraint expression (e.g. `requires-python = ">=3.10"`) is
//! intersected with the release lines that have not reached end of life,
//! giving an ascending support matrix for CI.
//!
//! # Modules
//!
//! - [`constraint`]: normalizer, grammar, comparator and resolver
//! - [`catalog`]: end-of-life feed client with cache, retry and fallback
//! - [`matrix`]: [`matrix::compute_support_matrix`], the single entry point
//! - [`tool_version`]: version string from a runtime's `--version` output
//! - [`config`]: client configuration and defaults

pub mod catalog;
pub mod config;
pub mod constraint;
pub mod matrix;
pub mod tool_version;
