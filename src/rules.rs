//! Rule contract and the engine that runs rules over a tree.
//!
//! A rule targets one [`NodeType`]. The engine walks the tree once and hands
//! every node of that type to the rule together with the symbol index and the
//! ancestor context; whatever the rule returns becomes part of the report.

pub mod builtin;

use crate::ast::{Context, Node, NodeType};
use crate::index::SymbolIndex;
use serde::Serialize;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// A finding reported by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleError {
    pub message: String,
}

impl RuleError {
    pub fn new(message: impl Into<String>) -> Self {
        RuleError {
            message: message.into(),
        }
    }
}

/// One entry of an analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Report {
    /// Findings of one rule at one node
    Findings {
        checker: String,
        errors: Vec<RuleError>,
    },
    /// The analysis itself could not run
    Failure { message: String },
}

impl Report {
    pub fn checker(&self) -> Option<&str> {
        match self {
            Report::Findings { checker, .. } => Some(checker),
            Report::Failure { .. } => None,
        }
    }

    /// Messages of this entry, whichever shape it has.
    pub fn messages(&self) -> Vec<&str> {
        match self {
            Report::Findings { errors, .. } => errors.iter().map(|e| e.message.as_str()).collect(),
            Report::Failure { message } => vec![message.as_str()],
        }
    }
}

/// A check run against every node of one type.
///
/// Rules must not keep state between calls: the same input always yields the
/// same findings.
pub trait Rule: Send + Sync {
    /// Name shown as `checker` in reports
    fn name(&self) -> &str;

    fn target(&self) -> NodeType;

    fn description(&self) -> &str {
        ""
    }

    fn check(&self, node: &Node, index: &SymbolIndex<'_>, context: &Context<'_>)
    -> Vec<RuleError>;
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Runs one rule, turning a panic into a finding that names the rule.
fn run_isolated(
    rule: &dyn Rule,
    node: &Node,
    index: &SymbolIndex<'_>,
    context: &Context<'_>,
) -> Vec<RuleError> {
    match panic::catch_unwind(AssertUnwindSafe(|| rule.check(node, index, context))) {
        Ok(errors) => errors,
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            warn!(rule = rule.name(), node = %node.node_type(), %reason, "rule panicked");
            vec![RuleError::new(format!(
                "Rule '{}' failed: {}",
                rule.name(),
                reason
            ))]
        }
    }
}

/// Walks `root` once, running each rule on the nodes it targets.
///
/// Reports come out in traversal order, and for one node in rule order.
/// Rules that find nothing contribute nothing.
pub fn run_rules(root: &Node, index: &SymbolIndex<'_>, rules: &[Box<dyn Rule>]) -> Vec<Report> {
    let mut reports = Vec::new();

    root.walk(&mut |node: &Node, context: &Context<'_>| {
        let node_type = node.node_type();
        for rule in rules.iter().filter(|r| r.target() == node_type) {
            let errors = run_isolated(rule.as_ref(), node, index, context);
            if !errors.is_empty() {
                reports.push(Report::Findings {
                    checker: rule.name().to_string(),
                    errors,
                });
            }
        }
    });

    debug!(reports = reports.len(), rules = rules.len(), "ran rules");
    reports
}
