//! CLI support for jsweep
//!
//! Provides programmatic access to the command implementations so other
//! tools can embed the linter without shelling out.

mod check;
mod rules;
mod tokens;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use rules::{RuleInfo, list_rules, render_rule_list};
pub use tokens::dump_tokens;

use crate::linter::ConfigError;
use std::io;
use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Cannot render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No input provided. Pass a file or pipe source to stdin.")]
    NoInput,
}
