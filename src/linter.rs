//! The analysis pipeline: tokenize, parse, index, check.

use crate::index::build_index;
use crate::lexer::{Lexer, LexicalGap};
use crate::parser::Parser;
use crate::rules::builtin::{NAMING_PATTERN, NamingPattern, builtin_rules};
use crate::rules::{Report, Rule, RuleError, run_rules};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Checker name of the entry listing skipped input.
pub const LEXICAL_GAP: &str = "Lexical gap";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid name pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown rule: '{0}'")]
    UnknownRule(String),

    #[error("Cannot read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which built-in rules run and how they are tuned.
///
/// ```json
/// { "disabled_rules": ["Unused identifier"], "name_pattern": "^tmp" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Rule names as they appear in `checker`
    pub disabled_rules: Vec<String>,
    /// Replaces the naming rule's default pattern
    pub name_pattern: Option<String>,
}

impl LintConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// Owns an ordered rule list and runs it over source text.
pub struct Linter {
    rules: Vec<Box<dyn Rule>>,
}

impl Linter {
    /// A linter with exactly `rules`, in the given order.
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Linter { rules }
    }

    pub fn with_builtin_rules() -> Self {
        Linter::new(builtin_rules())
    }

    /// Built-in rules adjusted by `config`.
    pub fn from_config(config: &LintConfig) -> Result<Self, ConfigError> {
        let mut rules = builtin_rules();

        for name in &config.disabled_rules {
            if !rules.iter().any(|r| r.name() == name.as_str()) {
                return Err(ConfigError::UnknownRule(name.clone()));
            }
        }
        rules.retain(|r| !config.disabled_rules.iter().any(|name| name == r.name()));

        if let Some(pattern) = &config.name_pattern {
            let naming =
                NamingPattern::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?;
            if let Some(slot) = rules.iter_mut().find(|r| r.name() == NAMING_PATTERN) {
                *slot = Box::new(naming);
            }
        }

        info!(rules = rules.len(), "configured linter");
        Ok(Linter::new(rules))
    }

    /// Appends a rule; it runs after every rule registered before it.
    pub fn register_rule(&mut self, rule: Box<dyn Rule>) {
        debug!(rule = rule.name(), target = %rule.target(), "registered rule");
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Runs every rule over `source`.
    ///
    /// Never fails: a syntax error comes back as the only entry, a
    /// [`Report::Failure`] carrying the parser's message.
    pub fn analyze(&self, source: &str) -> Vec<Report> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize();
        debug!(tokens = tokens.len(), gaps = lexer.gaps().len(), "tokenized");

        let root = match Parser::new(tokens).parse() {
            Ok(root) => root,
            Err(err) => {
                warn!(error = %err, "parse failed");
                return vec![Report::Failure {
                    message: err.to_string(),
                }];
            }
        };

        let mut reports = Vec::new();
        if !lexer.gaps().is_empty() {
            reports.push(gap_report(lexer.gaps()));
        }

        let index = build_index(&root);
        reports.extend(run_rules(&root, &index, &self.rules));
        reports
    }
}

impl Default for Linter {
    fn default() -> Self {
        Linter::with_builtin_rules()
    }
}

fn gap_report(gaps: &[LexicalGap]) -> Report {
    Report::Findings {
        checker: LEXICAL_GAP.to_string(),
        errors: gaps
            .iter()
            .map(|gap| {
                RuleError::new(format!(
                    "Unrecognized input '{}' at ({}).",
                    gap.lexeme, gap.position
                ))
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin::{UNUSED_IDENTIFIER, WRONG_ARGUMENT_COUNT};

    #[test]
    fn test_default_has_all_builtin_rules() {
        assert_eq!(Linter::default().rules().len(), builtin_rules().len());
    }

    #[test]
    fn test_config_disables_rules() {
        let config = LintConfig::from_json(r#"{"disabled_rules": ["Unused identifier"]}"#).unwrap();
        let linter = Linter::from_config(&config).unwrap();
        assert!(linter.rules().iter().all(|r| r.name() != UNUSED_IDENTIFIER));
        assert!(linter.rules().iter().any(|r| r.name() == WRONG_ARGUMENT_COUNT));
    }

    #[test]
    fn test_config_rejects_unknown_rule() {
        let config = LintConfig {
            disabled_rules: vec!["No such rule".to_string()],
            name_pattern: None,
        };
        assert!(matches!(
            Linter::from_config(&config),
            Err(ConfigError::UnknownRule(name)) if name == "No such rule"
        ));
    }

    #[test]
    fn test_config_rejects_bad_pattern() {
        let config = LintConfig {
            disabled_rules: vec![],
            name_pattern: Some("[".to_string()),
        };
        assert!(matches!(
            Linter::from_config(&config),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        assert!(matches!(
            LintConfig::from_json(r#"{"rules": []}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_gaps_reported_first() {
        let reports = Linter::new(vec![]).analyze("var a = 1; # a;");
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].checker(), Some(LEXICAL_GAP));
        assert_eq!(reports[0].messages(), vec!["Unrecognized input '#' at (1:11)."]);
    }
}
