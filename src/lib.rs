//! A static analyzer for a small JavaScript-like language.
//!
//! Source text flows through a tokenizer, a recursive-descent parser, a
//! symbol index and a rule engine:
//!
//! ```
//! use jsweep::Linter;
//!
//! let reports = Linter::default().analyze("function f(a, b) {}\nf(1);");
//! let messages: Vec<&str> = reports.iter().flat_map(|r| r.messages()).collect();
//! assert!(messages.contains(&"Function 'f' expects 2 arguments, 1 given at (2:0)."));
//! ```

pub mod ast;
pub mod index;
pub mod lexer;
pub mod linter;
pub mod output;
pub mod parser;
pub mod rules;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{Context, Node, NodeKind, NodeType, Position, Token, TokenKind, Visitor};
pub use index::{SymbolIndex, build_index};
pub use lexer::{Lexer, LexicalGap, tokenize, tokenize_excluding};
pub use linter::{ConfigError, LintConfig, Linter};
pub use output::{to_json, to_json_pretty};
pub use parser::{ParseError, Parser, parse_source};
pub use rules::{Report, Rule, RuleError, run_rules};
