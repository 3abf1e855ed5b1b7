//! # Syntax tree for the analyzed JavaScript dialect
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[tables]** - Keyword and punctuator lookup tables
//! - **[operators]** - Unary, binary, update and assignment operators
//! - **[node]** - The node sum type, its type tags and source locations
//! - **[visit]** - Pre-order traversal carrying the ancestor context
//!
//! ## Shape of the tree
//!
//! ```text
//! let x = 1; f(x);
//! ```
//!
//! parses to
//!
//! ```text
//! Program
//! ├── VariableDefinitionList (let)
//! │   └── VariableDefinition x
//! │       └── Literal 1
//! └── ExpressionStatement
//!     └── CallExpression
//!         ├── Identifier f
//!         └── FunctionArgumentList
//!             └── Identifier x
//! ```
//!
//! Every node is visited exactly once by [`Node::accept`], parents before
//! children, children in the order they appear in the source.
pub mod node;
pub mod operators;
pub mod tables;
pub mod tokens;
pub mod visit;

pub use node::{DeclarationKind, LiteralValue, Location, Node, NodeKind, NodeType};
pub use operators::{AssignOperator, BinaryOperator, UnaryOperator, UpdateOperator};
pub use tokens::{Keyword, Position, Punctuator, Token, TokenKind, TokenValue};
pub use visit::{Context, Visitor};
