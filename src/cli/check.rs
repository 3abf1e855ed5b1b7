//! Lint source text and render the reports

use super::CliError;
use crate::linter::{LintConfig, Linter};
use crate::output::{to_json, to_json_pretty};
use crate::rules::Report;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Source text to analyze
    pub source: String,
    /// Pretty-print the output
    pub pretty: bool,
    /// Rule selection and tuning
    pub config: LintConfig,
}

/// Result of a check operation
#[derive(Debug)]
pub struct CheckResult {
    pub reports: Vec<Report>,
    /// Reports rendered as JSON
    pub output: String,
}

impl CheckResult {
    /// True when nothing was reported, not even a parse failure.
    pub fn is_clean(&self) -> bool {
        self.reports.is_empty()
    }
}

/// Execute a jsweep check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let linter = Linter::from_config(&options.config)?;
    let reports = linter.analyze(&options.source);

    let output = if options.pretty {
        to_json_pretty(&reports)?
    } else {
        to_json(&reports)?
    };
    Ok(CheckResult { reports, output })
}
