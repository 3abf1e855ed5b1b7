//! Pre-order traversal with ancestor context.
//!
//! A [`Context`] is a linked list of frames living on the call stack: each
//! descent pushes one frame that borrows its parent, so sibling subtrees see
//! independent snapshots without copying the ancestor chain.

use crate::ast::node::{Node, NodeType};

/// Ancestor chain of the node being visited, root first.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    frame: Option<&'a Frame<'a>>,
}

#[derive(Debug)]
struct Frame<'a> {
    tag: NodeType,
    depth: usize,
    parent: Context<'a>,
}

impl<'a> Context<'a> {
    /// Context of the root node: no ancestors.
    pub fn root() -> Self {
        Context { frame: None }
    }

    pub fn len(&self) -> usize {
        self.frame.map_or(0, |f| f.depth)
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_none()
    }

    /// Closest ancestor.
    pub fn parent(&self) -> Option<NodeType> {
        self.frame.map(|f| f.tag)
    }

    /// Ancestors from the closest outwards.
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors { next: self.frame }
    }

    pub fn contains(&self, tag: NodeType) -> bool {
        self.ancestors().any(|t| t == tag)
    }

    /// Ancestors root first, the order a path is usually read in.
    pub fn to_vec(&self) -> Vec<NodeType> {
        let mut tags: Vec<NodeType> = self.ancestors().collect();
        tags.reverse();
        tags
    }
}

impl Default for Context<'_> {
    fn default() -> Self {
        Context::root()
    }
}

pub struct Ancestors<'a> {
    next: Option<&'a Frame<'a>>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeType;

    fn next(&mut self) -> Option<NodeType> {
        let frame = self.next?;
        self.next = frame.parent.frame;
        Some(frame.tag)
    }
}

/// Receives every node of a traversal over a tree borrowed for `'a`.
pub trait Visitor<'a> {
    fn visit(&mut self, node: &'a Node, context: &Context<'_>);
}

impl<'a, F> Visitor<'a> for F
where
    F: FnMut(&'a Node, &Context<'_>),
{
    fn visit(&mut self, node: &'a Node, context: &Context<'_>) {
        self(node, context)
    }
}

impl Node {
    /// Visits this node, then each child with this node's tag appended to
    /// the context.
    pub fn accept<'a, V: Visitor<'a> + ?Sized>(&'a self, visitor: &mut V, context: &Context<'_>) {
        visitor.visit(self, context);

        let children = self.children();
        if children.is_empty() {
            return;
        }

        let frame = Frame {
            tag: self.node_type(),
            depth: context.len() + 1,
            parent: *context,
        };
        let inner = Context {
            frame: Some(&frame),
        };
        for child in children {
            child.accept(visitor, &inner);
        }
    }

    /// Traverses the tree from this node with an empty context.
    pub fn walk<'a, V: Visitor<'a> + ?Sized>(&'a self, visitor: &mut V) {
        self.accept(visitor, &Context::root());
    }
}
