//! Rules shipped with the crate.

use super::{Rule, RuleError};
use crate::ast::{Context, Node, NodeKind, NodeType};
use crate::index::SymbolIndex;
use regex::Regex;
use tracing::warn;

pub const UNKNOWN_IDENTIFIER: &str = "Unknown identifier";
pub const UNUSED_IDENTIFIER: &str = "Unused identifier";
pub const WRONG_ARGUMENT_COUNT: &str = "Wrong number of arguments";
pub const NAMING_PATTERN: &str = "No funny names";
pub const RETURN_OUTSIDE_FUNCTION: &str = "Return outside function";

/// Names the naming rule rejects unless configured otherwise.
pub const DEFAULT_NAME_PATTERN: &str = "fun";

/// Flags references to names that were never declared.
pub struct UnknownIdentifier;

impl Rule for UnknownIdentifier {
    fn name(&self) -> &str {
        UNKNOWN_IDENTIFIER
    }

    fn target(&self) -> NodeType {
        NodeType::Identifier
    }

    fn description(&self) -> &str {
        "Reports identifiers that no var, function, parameter or catch clause declares"
    }

    fn check(&self, node: &Node, index: &SymbolIndex<'_>, _context: &Context<'_>) -> Vec<RuleError> {
        match &node.kind {
            NodeKind::Identifier { name } if !index.is_declared(name) => vec![RuleError::new(
                format!("Unknown identifier: '{}' at ({}).", name, node.loc),
            )],
            _ => vec![],
        }
    }
}

/// Flags declarations whose name is never referenced anywhere.
pub struct UnusedIdentifier;

impl Rule for UnusedIdentifier {
    fn name(&self) -> &str {
        UNUSED_IDENTIFIER
    }

    fn target(&self) -> NodeType {
        NodeType::Program
    }

    fn description(&self) -> &str {
        "Reports variables and functions that are declared but never referenced"
    }

    fn check(&self, _node: &Node, index: &SymbolIndex<'_>, _context: &Context<'_>) -> Vec<RuleError> {
        let unused_vars = index
            .declared_vars
            .iter()
            .filter(|(name, _)| !index.declared_functions.contains_key(*name))
            .filter(|(name, _)| !index.is_referenced(name))
            .map(|(name, decl)| {
                RuleError::new(format!("Unused var: '{}' at ({}).", name, decl.loc))
            });

        let unused_functions = index
            .declared_functions
            .iter()
            .filter(|(name, _)| !index.is_referenced(name))
            .map(|(name, decl)| {
                RuleError::new(format!("Unused function: '{}' at ({}).", name, decl.loc))
            });

        unused_vars.chain(unused_functions).collect()
    }
}

/// Compares call sites against the declared parameter count.
pub struct WrongArgumentCount;

impl Rule for WrongArgumentCount {
    fn name(&self) -> &str {
        WRONG_ARGUMENT_COUNT
    }

    fn target(&self) -> NodeType {
        NodeType::CallExpression
    }

    fn description(&self) -> &str {
        "Reports calls to declared functions with a different number of arguments than parameters"
    }

    fn check(&self, node: &Node, index: &SymbolIndex<'_>, _context: &Context<'_>) -> Vec<RuleError> {
        let NodeKind::CallExpression { callee, .. } = &node.kind else {
            return vec![];
        };
        let NodeKind::Identifier { name } = &callee.kind else {
            return vec![];
        };

        let expected = index.function(name).and_then(Node::parameter_count);
        let given = node.argument_count();
        match (expected, given) {
            (Some(expected), Some(given)) if expected != given => vec![RuleError::new(format!(
                "Function '{}' expects {} arguments, {} given at ({}).",
                name, expected, given, node.loc
            ))],
            _ => vec![],
        }
    }
}

/// Rejects variable names matching a pattern.
pub struct NamingPattern {
    pattern: Regex,
}

impl NamingPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(NamingPattern {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Rule for NamingPattern {
    fn name(&self) -> &str {
        NAMING_PATTERN
    }

    fn target(&self) -> NodeType {
        NodeType::VariableDefinition
    }

    fn description(&self) -> &str {
        "Reports variable names matching the configured pattern"
    }

    fn check(&self, node: &Node, _index: &SymbolIndex<'_>, _context: &Context<'_>) -> Vec<RuleError> {
        match &node.kind {
            NodeKind::VariableDefinition { name, .. } if self.pattern.is_match(name) => {
                vec![RuleError::new(format!(
                    "Disallowed name: '{}' matches /{}/ at ({}).",
                    name,
                    self.pattern.as_str(),
                    node.loc
                ))]
            }
            _ => vec![],
        }
    }
}

/// Flags `return` with no enclosing function.
pub struct ReturnOutsideFunction;

impl Rule for ReturnOutsideFunction {
    fn name(&self) -> &str {
        RETURN_OUTSIDE_FUNCTION
    }

    fn target(&self) -> NodeType {
        NodeType::ReturnStatement
    }

    fn description(&self) -> &str {
        "Reports return statements that are not inside a function body"
    }

    fn check(&self, node: &Node, _index: &SymbolIndex<'_>, context: &Context<'_>) -> Vec<RuleError> {
        if context.ancestors().any(NodeType::is_function) {
            vec![]
        } else {
            vec![RuleError::new(format!(
                "Return outside function at ({}).",
                node.loc
            ))]
        }
    }
}

/// Every built-in rule with its default settings, in reporting order.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    let mut rules: Vec<Box<dyn Rule>> = vec![
        Box::new(UnknownIdentifier),
        Box::new(UnusedIdentifier),
        Box::new(WrongArgumentCount),
    ];
    match NamingPattern::new(DEFAULT_NAME_PATTERN) {
        Ok(naming) => rules.push(Box::new(naming)),
        Err(err) => warn!(error = %err, "default name pattern rejected, naming rule skipped"),
    }
    rules.push(Box::new(ReturnOutsideFunction));
    rules
}
