//! Name tables built from one pass over a finished tree.

use crate::ast::{Context, Node, NodeKind, Visitor};
use std::collections::BTreeMap;
use tracing::debug;

/// Declarations and references keyed by name.
///
/// Each map keeps the last node seen for a name: a later declaration of the
/// same name replaces an earlier one. Maps are ordered by name so anything
/// derived from them comes out in a stable order.
#[derive(Debug, Default)]
pub struct SymbolIndex<'a> {
    /// Variable definitions, plus function declarations under their name
    pub declared_vars: BTreeMap<String, &'a Node>,
    pub declared_functions: BTreeMap<String, &'a Node>,
    /// Every identifier reference
    pub identifiers: BTreeMap<String, &'a Node>,
    /// Formal parameters and catch clause bindings
    pub parameters: BTreeMap<String, &'a Node>,
}

impl<'a> SymbolIndex<'a> {
    pub fn is_declared(&self, name: &str) -> bool {
        self.declared_vars.contains_key(name) || self.parameters.contains_key(name)
    }

    pub fn is_referenced(&self, name: &str) -> bool {
        self.identifiers.contains_key(name)
    }

    pub fn function(&self, name: &str) -> Option<&'a Node> {
        self.declared_functions.get(name).copied()
    }

    fn record(&mut self, node: &'a Node) {
        match &node.kind {
            NodeKind::VariableDefinition { name, .. } => {
                self.declared_vars.insert(name.clone(), node);
            }
            NodeKind::FunctionDeclaration { name, .. } => {
                self.declared_vars.insert(name.clone(), node);
                self.declared_functions.insert(name.clone(), node);
            }
            NodeKind::Identifier { name } => {
                self.identifiers.insert(name.clone(), node);
            }
            NodeKind::FormalParameter { name }
            | NodeKind::CatchClause { param: name, .. }
            | NodeKind::FunctionExpression {
                name: Some(name), ..
            } => {
                self.parameters.insert(name.clone(), node);
            }
            _ => {}
        }
    }
}

/// Collects into a [`SymbolIndex`] while walking a tree it borrows.
struct IndexBuilder<'a> {
    index: SymbolIndex<'a>,
}

impl<'a> Visitor<'a> for IndexBuilder<'a> {
    fn visit(&mut self, node: &'a Node, _context: &Context<'_>) {
        self.index.record(node);
    }
}

/// Builds the symbol index of `root` in one pre-order pass.
pub fn build_index(root: &Node) -> SymbolIndex<'_> {
    let mut builder = IndexBuilder {
        index: SymbolIndex::default(),
    };
    root.walk(&mut builder);

    debug!(
        vars = builder.index.declared_vars.len(),
        functions = builder.index.declared_functions.len(),
        identifiers = builder.index.identifiers.len(),
        parameters = builder.index.parameters.len(),
        "built symbol index"
    );
    builder.index
}
