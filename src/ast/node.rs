use crate::ast::operators::{AssignOperator, BinaryOperator, UnaryOperator, UpdateOperator};
use crate::ast::tokens::Position;
use std::fmt;

/// Source span of a node: from the first character of its first token to the
/// end of its last token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub first_line: usize,
    pub first_column: usize,
    pub last_line: usize,
    pub last_column: usize,
}

impl Location {
    pub fn new(start: Position, end: Position) -> Self {
        Location {
            first_line: start.line,
            first_column: start.column,
            last_line: end.line,
            last_column: end.column,
        }
    }

    pub fn start(&self) -> Position {
        Position::new(self.first_line, self.first_column)
    }

    pub fn end(&self) -> Position {
        Position::new(self.last_line, self.last_column)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.first_line, self.first_column)
    }
}

/// Discriminant of [`NodeKind`]; what rules target and what traversal
/// contexts are made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeType {
    Program,
    EmptyStatement,
    CompoundStatement,
    ExpressionStatement,
    EmptyExpression,
    IfStatement,
    BreakStatement,
    ContinueStatement,
    WithStatement,
    SwitchStatement,
    SwitchCase,
    ReturnStatement,
    ThrowStatement,
    TryStatement,
    CatchClause,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForInStatement,
    DebuggerStatement,
    FunctionDeclaration,
    FunctionExpression,
    FormalParameter,
    FormalParameterList,
    FunctionArgumentList,
    VariableDefinition,
    VariableDefinitionList,
    ThisExpression,
    UnaryExpression,
    BinaryExpression,
    AssignmentExpression,
    UpdateExpression,
    ConditionalExpression,
    SequenceExpression,
    NewExpression,
    CallExpression,
    MemberExpression,
    ArrayExpression,
    ObjectExpression,
    Property,
    Identifier,
    Literal,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        use NodeType::*;
        match self {
            Program => "Program",
            EmptyStatement => "EmptyStatement",
            CompoundStatement => "CompoundStatement",
            ExpressionStatement => "ExpressionStatement",
            EmptyExpression => "EmptyExpression",
            IfStatement => "IfStatement",
            BreakStatement => "BreakStatement",
            ContinueStatement => "ContinueStatement",
            WithStatement => "WithStatement",
            SwitchStatement => "SwitchStatement",
            SwitchCase => "SwitchCase",
            ReturnStatement => "ReturnStatement",
            ThrowStatement => "ThrowStatement",
            TryStatement => "TryStatement",
            CatchClause => "CatchClause",
            WhileStatement => "WhileStatement",
            DoWhileStatement => "DoWhileStatement",
            ForStatement => "ForStatement",
            ForInStatement => "ForInStatement",
            DebuggerStatement => "DebuggerStatement",
            FunctionDeclaration => "FunctionDeclaration",
            FunctionExpression => "FunctionExpression",
            FormalParameter => "FormalParameter",
            FormalParameterList => "FormalParameterList",
            FunctionArgumentList => "FunctionArgumentList",
            VariableDefinition => "VariableDefinition",
            VariableDefinitionList => "VariableDefinitionList",
            ThisExpression => "ThisExpression",
            UnaryExpression => "UnaryExpression",
            BinaryExpression => "BinaryExpression",
            AssignmentExpression => "AssignmentExpression",
            UpdateExpression => "UpdateExpression",
            ConditionalExpression => "ConditionalExpression",
            SequenceExpression => "SequenceExpression",
            NewExpression => "NewExpression",
            CallExpression => "CallExpression",
            MemberExpression => "MemberExpression",
            ArrayExpression => "ArrayExpression",
            ObjectExpression => "ObjectExpression",
            Property => "Property",
            Identifier => "Identifier",
            Literal => "Literal",
        }
    }

    /// Function boundaries, for rules that care about the enclosing scope.
    pub fn is_function(self) -> bool {
        matches!(self, NodeType::FunctionDeclaration | NodeType::FunctionExpression)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a [`NodeKind::Literal`].
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Number(f64),
    String(String),
    Boolean(bool),
    Null,
    Undefined,
}

/// Keyword that introduced a [`NodeKind::VariableDefinitionList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
}

/// A node of the syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub loc: Location,
    pub kind: NodeKind,
    /// Levels in the subtree rooted here, counted when the node is built
    height: usize,
}

/// Variant-specific payload of a [`Node`].
///
/// Children are owned outright, so the tree can never share a subtree or form
/// a cycle. Declared names (functions, variables, parameters, catch bindings,
/// object keys, dotted member names) are plain strings rather than
/// [`NodeKind::Identifier`] children: only references become identifiers.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Program {
        body: Vec<Node>,
    },
    /// A lone `;`
    EmptyStatement,
    /// `{ ... }`
    CompoundStatement {
        body: Vec<Node>,
    },
    ExpressionStatement {
        expression: Box<Node>,
    },
    /// Placeholder for an omitted `for` clause or an array hole
    EmptyExpression,
    IfStatement {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Option<Box<Node>>,
    },
    BreakStatement {
        label: Option<String>,
    },
    ContinueStatement {
        label: Option<String>,
    },
    WithStatement {
        object: Box<Node>,
        body: Box<Node>,
    },
    SwitchStatement {
        discriminant: Box<Node>,
        cases: Vec<Node>,
    },
    /// `case test:` or, with no test, `default:`
    SwitchCase {
        test: Option<Box<Node>>,
        consequent: Vec<Node>,
    },
    ReturnStatement {
        argument: Option<Box<Node>>,
    },
    ThrowStatement {
        argument: Box<Node>,
    },
    TryStatement {
        block: Box<Node>,
        handler: Option<Box<Node>>,
        finalizer: Option<Box<Node>>,
    },
    CatchClause {
        param: String,
        body: Box<Node>,
    },
    WhileStatement {
        test: Box<Node>,
        body: Box<Node>,
    },
    DoWhileStatement {
        body: Box<Node>,
        test: Box<Node>,
    },
    /// Omitted clauses are [`NodeKind::EmptyExpression`]
    ForStatement {
        init: Box<Node>,
        test: Box<Node>,
        update: Box<Node>,
        body: Box<Node>,
    },
    /// `left` is either a declaration list or an assignable expression
    ForInStatement {
        left: Box<Node>,
        right: Box<Node>,
        body: Box<Node>,
    },
    DebuggerStatement,
    FunctionDeclaration {
        name: String,
        params: Box<Node>,
        body: Box<Node>,
    },
    FunctionExpression {
        name: Option<String>,
        params: Box<Node>,
        body: Box<Node>,
    },
    FormalParameter {
        name: String,
    },
    FormalParameterList {
        parameters: Vec<Node>,
    },
    FunctionArgumentList {
        args: Vec<Node>,
    },
    VariableDefinition {
        name: String,
        init: Option<Box<Node>>,
    },
    VariableDefinitionList {
        declaration: DeclarationKind,
        definitions: Vec<Node>,
    },
    ThisExpression,
    UnaryExpression {
        operator: UnaryOperator,
        argument: Box<Node>,
    },
    BinaryExpression {
        operator: BinaryOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    AssignmentExpression {
        operator: AssignOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    UpdateExpression {
        operator: UpdateOperator,
        prefix: bool,
        argument: Box<Node>,
    },
    ConditionalExpression {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Box<Node>,
    },
    /// `a, b, c`
    SequenceExpression {
        expressions: Vec<Node>,
    },
    /// `new callee` or `new callee(args)`
    NewExpression {
        callee: Box<Node>,
        arguments: Option<Box<Node>>,
    },
    CallExpression {
        callee: Box<Node>,
        arguments: Box<Node>,
    },
    /// `object.name` keeps `name` as a string [`NodeKind::Literal`];
    /// `object[expr]` is computed.
    MemberExpression {
        object: Box<Node>,
        property: Box<Node>,
        computed: bool,
    },
    ArrayExpression {
        elements: Vec<Node>,
    },
    ObjectExpression {
        properties: Vec<Node>,
    },
    Property {
        key: String,
        value: Box<Node>,
    },
    Identifier {
        name: String,
    },
    Literal {
        value: LiteralValue,
    },
}

impl Node {
    pub fn new(kind: NodeKind, loc: Location) -> Self {
        let mut node = Node {
            loc,
            kind,
            height: 1,
        };
        let tallest = node.children().iter().map(|c| c.height).max().unwrap_or(0);
        node.height = 1 + tallest;
        node
    }

    /// 1 for a leaf, one more than the tallest child otherwise.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn node_type(&self) -> NodeType {
        use NodeKind as K;
        match &self.kind {
            K::Program { .. } => NodeType::Program,
            K::EmptyStatement => NodeType::EmptyStatement,
            K::CompoundStatement { .. } => NodeType::CompoundStatement,
            K::ExpressionStatement { .. } => NodeType::ExpressionStatement,
            K::EmptyExpression => NodeType::EmptyExpression,
            K::IfStatement { .. } => NodeType::IfStatement,
            K::BreakStatement { .. } => NodeType::BreakStatement,
            K::ContinueStatement { .. } => NodeType::ContinueStatement,
            K::WithStatement { .. } => NodeType::WithStatement,
            K::SwitchStatement { .. } => NodeType::SwitchStatement,
            K::SwitchCase { .. } => NodeType::SwitchCase,
            K::ReturnStatement { .. } => NodeType::ReturnStatement,
            K::ThrowStatement { .. } => NodeType::ThrowStatement,
            K::TryStatement { .. } => NodeType::TryStatement,
            K::CatchClause { .. } => NodeType::CatchClause,
            K::WhileStatement { .. } => NodeType::WhileStatement,
            K::DoWhileStatement { .. } => NodeType::DoWhileStatement,
            K::ForStatement { .. } => NodeType::ForStatement,
            K::ForInStatement { .. } => NodeType::ForInStatement,
            K::DebuggerStatement => NodeType::DebuggerStatement,
            K::FunctionDeclaration { .. } => NodeType::FunctionDeclaration,
            K::FunctionExpression { .. } => NodeType::FunctionExpression,
            K::FormalParameter { .. } => NodeType::FormalParameter,
            K::FormalParameterList { .. } => NodeType::FormalParameterList,
            K::FunctionArgumentList { .. } => NodeType::FunctionArgumentList,
            K::VariableDefinition { .. } => NodeType::VariableDefinition,
            K::VariableDefinitionList { .. } => NodeType::VariableDefinitionList,
            K::ThisExpression => NodeType::ThisExpression,
            K::UnaryExpression { .. } => NodeType::UnaryExpression,
            K::BinaryExpression { .. } => NodeType::BinaryExpression,
            K::AssignmentExpression { .. } => NodeType::AssignmentExpression,
            K::UpdateExpression { .. } => NodeType::UpdateExpression,
            K::ConditionalExpression { .. } => NodeType::ConditionalExpression,
            K::SequenceExpression { .. } => NodeType::SequenceExpression,
            K::NewExpression { .. } => NodeType::NewExpression,
            K::CallExpression { .. } => NodeType::CallExpression,
            K::MemberExpression { .. } => NodeType::MemberExpression,
            K::ArrayExpression { .. } => NodeType::ArrayExpression,
            K::ObjectExpression { .. } => NodeType::ObjectExpression,
            K::Property { .. } => NodeType::Property,
            K::Identifier { .. } => NodeType::Identifier,
            K::Literal { .. } => NodeType::Literal,
        }
    }

    /// Structural children in source (grammar field) order.
    pub fn children(&self) -> Vec<&Node> {
        use NodeKind as K;
        match &self.kind {
            K::Program { body } | K::CompoundStatement { body } => body.iter().collect(),
            K::ExpressionStatement { expression } => vec![&**expression],
            K::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                let mut children: Vec<&Node> = vec![&**test, &**consequent];
                children.extend(alternate.as_deref());
                children
            }
            K::WithStatement { object, body } => vec![&**object, &**body],
            K::SwitchStatement {
                discriminant,
                cases,
            } => std::iter::once(&**discriminant).chain(cases).collect(),
            K::SwitchCase { test, consequent } => {
                test.as_deref().into_iter().chain(consequent).collect()
            }
            K::ReturnStatement { argument } => argument.as_deref().into_iter().collect(),
            K::ThrowStatement { argument } => vec![&**argument],
            K::TryStatement {
                block,
                handler,
                finalizer,
            } => std::iter::once(&**block)
                .chain(handler.as_deref())
                .chain(finalizer.as_deref())
                .collect(),
            K::CatchClause { body, .. } => vec![&**body],
            K::WhileStatement { test, body } => vec![&**test, &**body],
            K::DoWhileStatement { body, test } => vec![&**body, &**test],
            K::ForStatement {
                init,
                test,
                update,
                body,
            } => vec![&**init, &**test, &**update, &**body],
            K::ForInStatement { left, right, body } => vec![&**left, &**right, &**body],
            K::FunctionDeclaration { params, body, .. }
            | K::FunctionExpression { params, body, .. } => vec![&**params, &**body],
            K::FormalParameterList { parameters } => parameters.iter().collect(),
            K::FunctionArgumentList { args } => args.iter().collect(),
            K::VariableDefinition { init, .. } => init.as_deref().into_iter().collect(),
            K::VariableDefinitionList { definitions, .. } => definitions.iter().collect(),
            K::UnaryExpression { argument, .. } | K::UpdateExpression { argument, .. } => {
                vec![&**argument]
            }
            K::BinaryExpression { left, right, .. }
            | K::AssignmentExpression { left, right, .. } => vec![&**left, &**right],
            K::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => vec![&**test, &**consequent, &**alternate],
            K::SequenceExpression { expressions } => expressions.iter().collect(),
            K::NewExpression { callee, arguments } => std::iter::once(&**callee)
                .chain(arguments.as_deref())
                .collect(),
            K::CallExpression { callee, arguments } => vec![&**callee, &**arguments],
            K::MemberExpression {
                object, property, ..
            } => vec![&**object, &**property],
            K::ArrayExpression { elements } => elements.iter().collect(),
            K::ObjectExpression { properties } => properties.iter().collect(),
            K::Property { value, .. } => vec![&**value],
            K::EmptyStatement
            | K::EmptyExpression
            | K::BreakStatement { .. }
            | K::ContinueStatement { .. }
            | K::DebuggerStatement
            | K::FormalParameter { .. }
            | K::ThisExpression
            | K::Identifier { .. }
            | K::Literal { .. } => Vec::new(),
        }
    }

    /// The name a node declares or references, if it has one.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier { name }
            | NodeKind::VariableDefinition { name, .. }
            | NodeKind::FunctionDeclaration { name, .. }
            | NodeKind::FormalParameter { name }
            | NodeKind::CatchClause { param: name, .. } => Some(name),
            NodeKind::FunctionExpression { name, .. } => name.as_deref(),
            _ => None,
        }
    }

    /// Number of declared parameters of a function node.
    pub fn parameter_count(&self) -> Option<usize> {
        match &self.kind {
            NodeKind::FunctionDeclaration { params, .. }
            | NodeKind::FunctionExpression { params, .. } => match &params.kind {
                NodeKind::FormalParameterList { parameters } => Some(parameters.len()),
                _ => None,
            },
            _ => None,
        }
    }

    /// Number of arguments passed by a call or `new` node.
    pub fn argument_count(&self) -> Option<usize> {
        let arguments = match &self.kind {
            NodeKind::CallExpression { arguments, .. } => arguments,
            NodeKind::NewExpression {
                arguments: Some(arguments),
                ..
            } => arguments,
            NodeKind::NewExpression {
                arguments: None, ..
            } => return Some(0),
            _ => return None,
        };
        match &arguments.kind {
            NodeKind::FunctionArgumentList { args } => Some(args.len()),
            _ => None,
        }
    }
}
