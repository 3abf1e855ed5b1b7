use crate::{
    ast::{
        AssignOperator, BinaryOperator, DeclarationKind, Keyword, LiteralValue, Location, Node,
        NodeKind, Position, Punctuator, Token, TokenKind, TokenValue, UnaryOperator,
        UpdateOperator,
    },
    lexer::Lexer,
};
use thiserror::Error;
use tracing::debug;

/// Grammar violation. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unexpected token {found} at ({position}), expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: String,
        position: Position,
    },

    #[error("Unexpected end of program, expected {expected}")]
    UnexpectedEnd { expected: String },

    #[error("Invalid assignment target at ({position})")]
    InvalidAssignmentTarget { position: Position },

    #[error("Missing catch or finally after try at ({position})")]
    MissingCatchOrFinally { position: Position },

    #[error("Nesting too deep at ({position})")]
    NestingTooDeep { position: Position },
}

/// Statements and expressions may nest this many levels.
const MAX_NESTING: usize = 64;

/// Operator and call chains grow the tree without nesting in the parser, so
/// tree height is bounded on its own.
const MAX_TREE_HEIGHT: usize = 1024;

const fn punct(p: Punctuator) -> TokenKind {
    TokenKind::Punctuator(p)
}

const fn kw(k: Keyword) -> TokenKind {
    TokenKind::Keyword(k)
}

pub struct Parser {
    tokens: Vec<Token>,
    idx: usize,
    last_end: Position,
    depth: usize,
}

impl Parser {
    /// Whitespace, line breaks and comments are dropped up front; token
    /// positions are enough to tell where lines end.
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens: tokens.into_iter().filter(|t| !t.kind.is_trivia()).collect(),
            idx: 0,
            last_end: Position::new(1, 0),
            depth: 0,
        }
    }

    /// Tokenizes and wraps `source`.
    pub fn from_source(source: &str) -> Self {
        Parser::new(Lexer::new(source).tokenize())
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.idx)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn tokens_left(&self) -> bool {
        self.idx < self.tokens.len()
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.idx)?;
        self.idx += 1;
        self.last_end = token.end;
        Some(token)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Consumes the current token if it is of `kind`.
    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is any of `kinds`, returning its kind.
    fn match_any(&mut self, kinds: &[TokenKind]) -> Option<TokenKind> {
        let kind = self.peek_kind().filter(|k| kinds.contains(k))?;
        self.advance();
        Some(kind)
    }

    /// Consumes `kinds` only if the upcoming tokens are exactly that sequence.
    fn match_sequence(&mut self, kinds: &[TokenKind]) -> bool {
        let matches = kinds
            .iter()
            .enumerate()
            .all(|(offset, kind)| self.tokens.get(self.idx + offset).map(|t| t.kind) == Some(*kind));
        if matches {
            for _ in kinds {
                self.advance();
            }
        }
        matches
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<(), ParseError> {
        if self.match_token(kind) {
            Ok(())
        } else {
            Err(self.error_here(expected))
        }
    }

    fn expect_identifier(&mut self, expected: &str) -> Result<String, ParseError> {
        match self.peek().and_then(Token::identifier).map(str::to_string) {
            Some(name) => {
                self.advance();
                Ok(name)
            }
            None => Err(self.error_here(expected)),
        }
    }

    /// Names after `.` and object keys may be reserved words.
    fn expect_property_name(&mut self) -> Result<String, ParseError> {
        let name = match self.peek().map(|t| &t.value) {
            Some(TokenValue::Identifier(s) | TokenValue::Keyword(s)) => s.clone(),
            Some(TokenValue::Boolean(b)) => b.to_string(),
            Some(TokenValue::Null) => "null".to_string(),
            Some(TokenValue::Undefined) => "undefined".to_string(),
            _ => return Err(self.error_here("property name")),
        };
        self.advance();
        Ok(name)
    }

    fn error_here(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::UnexpectedToken {
                found: token.to_string(),
                expected: expected.to_string(),
                position: token.start,
            },
            None => ParseError::UnexpectedEnd {
                expected: expected.to_string(),
            },
        }
    }

    fn start_pos(&self) -> Position {
        self.peek().map_or(self.last_end, |t| t.start)
    }

    fn finish(&self, start: Position) -> Location {
        Location::new(start, self.last_end)
    }

    fn node(&self, kind: NodeKind, start: Position) -> Node {
        Node::new(kind, self.finish(start))
    }

    /// Runs `parse` one nesting level down, failing past [`MAX_NESTING`].
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep {
                position: self.start_pos(),
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn check_height(&self, node: &Node) -> Result<(), ParseError> {
        if node.height() > MAX_TREE_HEIGHT {
            Err(ParseError::NestingTooDeep {
                position: node.loc.start(),
            })
        } else {
            Ok(())
        }
    }

    fn empty_expression(&self) -> Node {
        let here = self.start_pos();
        Node::new(NodeKind::EmptyExpression, Location::new(here, here))
    }

    /// True when a line break separates the previous token from the current one.
    fn newline_before(&self) -> bool {
        match (self.idx.checked_sub(1).and_then(|i| self.tokens.get(i)), self.peek()) {
            (Some(previous), Some(current)) => current.start.line > previous.end.line,
            _ => false,
        }
    }

    /// `;`, or an implied one before `}`, end of input, or a line break.
    fn consume_semicolon(&mut self) -> Result<(), ParseError> {
        if self.match_token(punct(Punctuator::Semicolon))
            || self.check(punct(Punctuator::RightCurly))
            || !self.tokens_left()
            || self.newline_before()
        {
            Ok(())
        } else {
            Err(self.error_here("';'"))
        }
    }

    /// Parse a whole program.
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        let start = self.peek().map_or(Position::new(1, 0), |t| t.start);
        let mut body = vec![];
        self.depth = 0;

        while self.tokens_left() {
            body.push(self.parse_source_element()?);
        }

        debug!(elements = body.len(), tokens = self.tokens.len(), "parsed program");
        Ok(self.node(NodeKind::Program { body }, start))
    }

    fn parse_source_element(&mut self) -> Result<Node, ParseError> {
        if self.check(kw(Keyword::Function)) {
            self.parse_function_declaration()
        } else {
            self.parse_statement()
        }
    }

    fn parse_statement(&mut self) -> Result<Node, ParseError> {
        self.nested(Self::parse_statement_kind)
    }

    fn parse_statement_kind(&mut self) -> Result<Node, ParseError> {
        let Some(kind) = self.peek_kind() else {
            return Err(self.error_here("statement"));
        };

        match kind {
            TokenKind::Punctuator(Punctuator::LeftCurly) => self.parse_block(),
            TokenKind::Punctuator(Punctuator::Semicolon) => {
                let start = self.start_pos();
                self.advance();
                Ok(self.node(NodeKind::EmptyStatement, start))
            }
            TokenKind::Keyword(keyword) => match keyword {
                Keyword::Var | Keyword::Let | Keyword::Const => self.parse_variable_statement(),
                Keyword::If => self.parse_if(),
                Keyword::While => self.parse_while(),
                Keyword::Do => self.parse_do_while(),
                Keyword::For => self.parse_for(),
                Keyword::Continue | Keyword::Break => self.parse_jump(keyword),
                Keyword::Return => self.parse_return(),
                Keyword::With => self.parse_with(),
                Keyword::Switch => self.parse_switch(),
                Keyword::Throw => self.parse_throw(),
                Keyword::Try => self.parse_try(),
                Keyword::Debugger => {
                    let start = self.start_pos();
                    self.advance();
                    self.consume_semicolon()?;
                    Ok(self.node(NodeKind::DebuggerStatement, start))
                }
                Keyword::Function => self.parse_function_declaration(),
                _ => self.parse_expression_statement(),
            },
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_expression_statement(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        let expression = self.parse_expression(true)?;
        self.consume_semicolon()?;
        Ok(self.node(
            NodeKind::ExpressionStatement {
                expression: Box::new(expression),
            },
            start,
        ))
    }

    fn parse_block(&mut self) -> Result<Node, ParseError> {
        self.nested(Self::parse_block_body)
    }

    fn parse_block_body(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        self.expect(punct(Punctuator::LeftCurly), "'{'")?;

        let mut body = vec![];
        while !self.check(punct(Punctuator::RightCurly)) {
            if !self.tokens_left() {
                return Err(self.error_here("'}'"));
            }
            body.push(self.parse_source_element()?);
        }

        self.expect(punct(Punctuator::RightCurly), "'}'")?;
        Ok(self.node(NodeKind::CompoundStatement { body }, start))
    }

    /// `var`/`let`/`const` followed by one or more definitions.
    fn parse_variable_declarations(&mut self, allow_in: bool) -> Result<Node, ParseError> {
        let start = self.start_pos();
        let declaration = match self.match_any(&[
            kw(Keyword::Var),
            kw(Keyword::Let),
            kw(Keyword::Const),
        ]) {
            Some(TokenKind::Keyword(Keyword::Let)) => DeclarationKind::Let,
            Some(TokenKind::Keyword(Keyword::Const)) => DeclarationKind::Const,
            Some(_) => DeclarationKind::Var,
            None => return Err(self.error_here("'var', 'let' or 'const'")),
        };

        let mut definitions = vec![];
        loop {
            let def_start = self.start_pos();
            let name = self.expect_identifier("variable name")?;
            let init = if self.match_token(punct(Punctuator::Assign)) {
                Some(Box::new(self.parse_assignment(allow_in)?))
            } else {
                None
            };
            definitions.push(self.node(NodeKind::VariableDefinition { name, init }, def_start));

            if !self.match_token(punct(Punctuator::Comma)) {
                break;
            }
        }

        Ok(self.node(
            NodeKind::VariableDefinitionList {
                declaration,
                definitions,
            },
            start,
        ))
    }

    fn parse_variable_statement(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        let mut list = self.parse_variable_declarations(true)?;
        self.consume_semicolon()?;
        list.loc = self.finish(start);
        Ok(list)
    }

    fn parse_paren_expression(&mut self) -> Result<Node, ParseError> {
        self.expect(punct(Punctuator::LeftParen), "'('")?;
        let expr = self.parse_expression(true)?;
        self.expect(punct(Punctuator::RightParen), "')'")?;
        Ok(expr)
    }

    fn parse_if(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        self.advance(); // consume 'if'
        let test = self.parse_paren_expression()?;
        let consequent = self.parse_statement()?;
        let alternate = if self.match_token(kw(Keyword::Else)) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(self.node(
            NodeKind::IfStatement {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate,
            },
            start,
        ))
    }

    fn parse_while(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        self.advance(); // consume 'while'
        let test = self.parse_paren_expression()?;
        let body = self.parse_statement()?;
        Ok(self.node(
            NodeKind::WhileStatement {
                test: Box::new(test),
                body: Box::new(body),
            },
            start,
        ))
    }

    fn parse_do_while(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        self.advance(); // consume 'do'
        let body = self.parse_statement()?;
        self.expect(kw(Keyword::While), "'while'")?;
        let test = self.parse_paren_expression()?;
        // The terminator after do-while is always optional
        self.match_token(punct(Punctuator::Semicolon));
        Ok(self.node(
            NodeKind::DoWhileStatement {
                body: Box::new(body),
                test: Box::new(test),
            },
            start,
        ))
    }

    fn parse_for(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        self.advance(); // consume 'for'
        self.expect(punct(Punctuator::LeftParen), "'('")?;

        let init = if self.check(punct(Punctuator::Semicolon)) {
            self.empty_expression()
        } else if matches!(
            self.peek_kind(),
            Some(TokenKind::Keyword(Keyword::Var | Keyword::Let | Keyword::Const))
        ) {
            let declarations = self.parse_variable_declarations(false)?;
            if self.match_token(kw(Keyword::In)) {
                return self.parse_for_in_rest(start, declarations);
            }
            declarations
        } else {
            let expr = self.parse_expression(false)?;
            if self.check(kw(Keyword::In)) {
                if !is_assignable(&expr) {
                    return Err(ParseError::InvalidAssignmentTarget {
                        position: expr.loc.start(),
                    });
                }
                self.advance();
                return self.parse_for_in_rest(start, expr);
            }
            expr
        };
        self.expect(punct(Punctuator::Semicolon), "';'")?;

        let test = if self.check(punct(Punctuator::Semicolon)) {
            self.empty_expression()
        } else {
            self.parse_expression(true)?
        };
        self.expect(punct(Punctuator::Semicolon), "';'")?;

        let update = if self.check(punct(Punctuator::RightParen)) {
            self.empty_expression()
        } else {
            self.parse_expression(true)?
        };
        self.expect(punct(Punctuator::RightParen), "')'")?;

        let body = self.parse_statement()?;
        Ok(self.node(
            NodeKind::ForStatement {
                init: Box::new(init),
                test: Box::new(test),
                update: Box::new(update),
                body: Box::new(body),
            },
            start,
        ))
    }

    /// Everything after `for (left in`.
    fn parse_for_in_rest(&mut self, start: Position, left: Node) -> Result<Node, ParseError> {
        let right = self.parse_expression(true)?;
        self.expect(punct(Punctuator::RightParen), "')'")?;
        let body = self.parse_statement()?;
        Ok(self.node(
            NodeKind::ForInStatement {
                left: Box::new(left),
                right: Box::new(right),
                body: Box::new(body),
            },
            start,
        ))
    }

    fn parse_jump(&mut self, keyword: Keyword) -> Result<Node, ParseError> {
        let start = self.start_pos();
        self.advance(); // consume 'break' / 'continue'

        let label = if self.newline_before() {
            None
        } else {
            match self.peek().and_then(Token::identifier).map(str::to_string) {
                Some(label) => {
                    self.advance();
                    Some(label)
                }
                None => None,
            }
        };
        self.consume_semicolon()?;

        let kind = if keyword == Keyword::Break {
            NodeKind::BreakStatement { label }
        } else {
            NodeKind::ContinueStatement { label }
        };
        Ok(self.node(kind, start))
    }

    fn parse_return(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        self.advance(); // consume 'return'

        let argument = if self.check(punct(Punctuator::Semicolon))
            || self.check(punct(Punctuator::RightCurly))
            || !self.tokens_left()
            || self.newline_before()
        {
            None
        } else {
            Some(Box::new(self.parse_expression(true)?))
        };
        self.consume_semicolon()?;

        Ok(self.node(NodeKind::ReturnStatement { argument }, start))
    }

    fn parse_with(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        self.advance(); // consume 'with'
        let object = self.parse_paren_expression()?;
        let body = self.parse_statement()?;
        Ok(self.node(
            NodeKind::WithStatement {
                object: Box::new(object),
                body: Box::new(body),
            },
            start,
        ))
    }

    fn parse_switch(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        self.advance(); // consume 'switch'
        let discriminant = self.parse_paren_expression()?;
        self.expect(punct(Punctuator::LeftCurly), "'{'")?;

        let mut cases = vec![];
        while !self.match_token(punct(Punctuator::RightCurly)) {
            let case_start = self.start_pos();
            let test = if self.match_token(kw(Keyword::Case)) {
                let test = self.parse_expression(true)?;
                self.expect(punct(Punctuator::Colon), "':'")?;
                Some(Box::new(test))
            } else if self.match_sequence(&[kw(Keyword::Default), punct(Punctuator::Colon)]) {
                None
            } else {
                return Err(self.error_here("'case', 'default' or '}'"));
            };

            let mut consequent = vec![];
            while self.tokens_left()
                && !matches!(
                    self.peek_kind(),
                    Some(
                        TokenKind::Keyword(Keyword::Case | Keyword::Default)
                            | TokenKind::Punctuator(Punctuator::RightCurly)
                    )
                )
            {
                consequent.push(self.parse_source_element()?);
            }

            cases.push(self.node(NodeKind::SwitchCase { test, consequent }, case_start));
        }

        Ok(self.node(
            NodeKind::SwitchStatement {
                discriminant: Box::new(discriminant),
                cases,
            },
            start,
        ))
    }

    fn parse_throw(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        self.advance(); // consume 'throw'
        let argument = self.parse_expression(true)?;
        self.consume_semicolon()?;
        Ok(self.node(
            NodeKind::ThrowStatement {
                argument: Box::new(argument),
            },
            start,
        ))
    }

    fn parse_try(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        self.advance(); // consume 'try'
        let block = self.parse_block()?;

        let handler = if self.check(kw(Keyword::Catch)) {
            let catch_start = self.start_pos();
            self.advance();
            self.expect(punct(Punctuator::LeftParen), "'('")?;
            let param = self.expect_identifier("catch parameter")?;
            self.expect(punct(Punctuator::RightParen), "')'")?;
            let body = self.parse_block()?;
            Some(Box::new(self.node(
                NodeKind::CatchClause {
                    param,
                    body: Box::new(body),
                },
                catch_start,
            )))
        } else {
            None
        };

        let finalizer = if self.match_token(kw(Keyword::Finally)) {
            Some(Box::new(self.parse_block()?))
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(ParseError::MissingCatchOrFinally { position: start });
        }

        Ok(self.node(
            NodeKind::TryStatement {
                block: Box::new(block),
                handler,
                finalizer,
            },
            start,
        ))
    }

    fn parse_function_declaration(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        self.expect(kw(Keyword::Function), "'function'")?;
        let name = self.expect_identifier("function name")?;
        let params = self.parse_formal_parameters()?;
        let body = self.parse_block()?;
        Ok(self.node(
            NodeKind::FunctionDeclaration {
                name,
                params: Box::new(params),
                body: Box::new(body),
            },
            start,
        ))
    }

    fn parse_function_expression(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        self.expect(kw(Keyword::Function), "'function'")?;
        let name = match self.peek().and_then(Token::identifier).map(str::to_string) {
            Some(name) => {
                self.advance();
                Some(name)
            }
            None => None,
        };
        let params = self.parse_formal_parameters()?;
        let body = self.parse_block()?;
        Ok(self.node(
            NodeKind::FunctionExpression {
                name,
                params: Box::new(params),
                body: Box::new(body),
            },
            start,
        ))
    }

    fn parse_formal_parameters(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        self.expect(punct(Punctuator::LeftParen), "'('")?;

        let mut parameters = vec![];
        if !self.check(punct(Punctuator::RightParen)) {
            loop {
                let param_start = self.start_pos();
                let name = self.expect_identifier("parameter name")?;
                parameters.push(self.node(NodeKind::FormalParameter { name }, param_start));
                if !self.match_token(punct(Punctuator::Comma)) {
                    break;
                }
            }
        }

        self.expect(punct(Punctuator::RightParen), "')'")?;
        Ok(self.node(NodeKind::FormalParameterList { parameters }, start))
    }

    fn parse_arguments(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        self.expect(punct(Punctuator::LeftParen), "'('")?;

        let mut args = vec![];
        if !self.check(punct(Punctuator::RightParen)) {
            loop {
                args.push(self.parse_assignment(true)?);
                if !self.match_token(punct(Punctuator::Comma)) {
                    break;
                }
            }
        }

        self.expect(punct(Punctuator::RightParen), "')'")?;
        Ok(self.node(NodeKind::FunctionArgumentList { args }, start))
    }

    /// Comma-separated expressions. `allow_in` is false inside a `for` head,
    /// where `in` ends the initializer instead of being an operator.
    pub fn parse_expression(&mut self, allow_in: bool) -> Result<Node, ParseError> {
        let start = self.start_pos();
        let first = self.parse_assignment(allow_in)?;
        if !self.check(punct(Punctuator::Comma)) {
            return Ok(first);
        }

        let mut expressions = vec![first];
        while self.match_token(punct(Punctuator::Comma)) {
            expressions.push(self.parse_assignment(allow_in)?);
        }
        Ok(self.node(NodeKind::SequenceExpression { expressions }, start))
    }

    fn parse_assignment(&mut self, allow_in: bool) -> Result<Node, ParseError> {
        self.nested(|parser| parser.parse_assignment_expression(allow_in))
    }

    fn parse_assignment_expression(&mut self, allow_in: bool) -> Result<Node, ParseError> {
        let start = self.start_pos();
        let left = self.parse_conditional(allow_in)?;

        let Some(operator) = self.peek_kind().and_then(AssignOperator::from_token) else {
            return Ok(left);
        };
        if !is_assignable(&left) {
            return Err(ParseError::InvalidAssignmentTarget {
                position: left.loc.start(),
            });
        }
        self.advance();

        // Right-associative
        let right = self.parse_assignment(allow_in)?;
        Ok(self.node(
            NodeKind::AssignmentExpression {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            },
            start,
        ))
    }

    fn parse_conditional(&mut self, allow_in: bool) -> Result<Node, ParseError> {
        let start = self.start_pos();
        let test = self.parse_binary(0, allow_in)?;

        if !self.match_token(punct(Punctuator::Hook)) {
            return Ok(test);
        }
        let consequent = self.parse_assignment(true)?;
        self.expect(punct(Punctuator::Colon), "':'")?;
        let alternate = self.parse_assignment(allow_in)?;

        Ok(self.node(
            NodeKind::ConditionalExpression {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
            },
            start,
        ))
    }

    /// Precedence climbing over every left-associative binary operator,
    /// from `||` (loosest) to `* / %` (tightest).
    fn parse_binary(&mut self, min_precedence: u8, allow_in: bool) -> Result<Node, ParseError> {
        let start = self.start_pos();
        let mut left = self.parse_unary()?;

        loop {
            let Some(operator) = self.peek_kind().and_then(BinaryOperator::from_token) else {
                break;
            };
            if operator == BinaryOperator::In && !allow_in {
                break;
            }
            let precedence = operator.precedence();
            if precedence <= min_precedence {
                break;
            }

            self.advance();
            let right = self.parse_binary(precedence, allow_in)?;

            left = self.node(
                NodeKind::BinaryExpression {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                start,
            );
            self.check_height(&left)?;
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        let Some(kind) = self.peek_kind() else {
            return Err(self.error_here("expression"));
        };

        if let Some(operator) = UpdateOperator::from_token(kind) {
            self.advance();
            let argument = self.nested(Self::parse_unary)?;
            if !is_assignable(&argument) {
                return Err(ParseError::InvalidAssignmentTarget {
                    position: argument.loc.start(),
                });
            }
            return Ok(self.node(
                NodeKind::UpdateExpression {
                    operator,
                    prefix: true,
                    argument: Box::new(argument),
                },
                start,
            ));
        }

        if let Some(operator) = UnaryOperator::from_token(kind) {
            self.advance();
            let argument = self.nested(Self::parse_unary)?;
            return Ok(self.node(
                NodeKind::UnaryExpression {
                    operator,
                    argument: Box::new(argument),
                },
                start,
            ));
        }

        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        let expr = self.parse_left_hand_side()?;

        // No line break allowed between operand and postfix operator
        if self.newline_before() {
            return Ok(expr);
        }
        let Some(operator) = self.peek_kind().and_then(UpdateOperator::from_token) else {
            return Ok(expr);
        };
        if !is_assignable(&expr) {
            return Err(ParseError::InvalidAssignmentTarget {
                position: expr.loc.start(),
            });
        }
        self.advance();

        Ok(self.node(
            NodeKind::UpdateExpression {
                operator,
                prefix: false,
                argument: Box::new(expr),
            },
            start,
        ))
    }

    /// Call and member chains: `a.b[c](d).e`
    fn parse_left_hand_side(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        let mut expr = if self.check(kw(Keyword::New)) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };

        loop {
            if self.check(punct(Punctuator::LeftParen)) {
                let arguments = self.parse_arguments()?;
                expr = self.node(
                    NodeKind::CallExpression {
                        callee: Box::new(expr),
                        arguments: Box::new(arguments),
                    },
                    start,
                );
            } else if self.starts_member_access() {
                expr = self.parse_member_access(start, expr)?;
            } else {
                break;
            }
            self.check_height(&expr)?;
        }
        Ok(expr)
    }

    fn starts_member_access(&self) -> bool {
        self.check(punct(Punctuator::Dot)) || self.check(punct(Punctuator::LeftBracket))
    }

    /// One `.name` or `[expr]` step applied to `object`.
    fn parse_member_access(&mut self, start: Position, object: Node) -> Result<Node, ParseError> {
        if self.match_token(punct(Punctuator::Dot)) {
            let name_start = self.start_pos();
            let name = self.expect_property_name()?;
            let property = self.node(
                NodeKind::Literal {
                    value: LiteralValue::String(name),
                },
                name_start,
            );
            Ok(self.node(
                NodeKind::MemberExpression {
                    object: Box::new(object),
                    property: Box::new(property),
                    computed: false,
                },
                start,
            ))
        } else {
            self.expect(punct(Punctuator::LeftBracket), "'['")?;
            let property = self.parse_expression(true)?;
            self.expect(punct(Punctuator::RightBracket), "']'")?;
            Ok(self.node(
                NodeKind::MemberExpression {
                    object: Box::new(object),
                    property: Box::new(property),
                    computed: true,
                },
                start,
            ))
        }
    }

    /// `new callee` with an optional argument list. The callee may carry
    /// member accesses but not calls: `new a.b(c)` constructs `a.b`.
    fn parse_new(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        self.advance(); // consume 'new'

        let callee_start = self.start_pos();
        let mut callee = if self.check(kw(Keyword::New)) {
            self.nested(Self::parse_new)?
        } else {
            self.parse_primary()?
        };
        while self.starts_member_access() {
            callee = self.parse_member_access(callee_start, callee)?;
            self.check_height(&callee)?;
        }

        let arguments = if self.check(punct(Punctuator::LeftParen)) {
            Some(Box::new(self.parse_arguments()?))
        } else {
            None
        };

        Ok(self.node(
            NodeKind::NewExpression {
                callee: Box::new(callee),
                arguments,
            },
            start,
        ))
    }

    /// Parse primary expressions (atoms)
    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        let Some(token) = self.peek() else {
            return Err(self.error_here("expression"));
        };

        let kind = token.kind;
        let literal = match (&token.kind, &token.value) {
            (TokenKind::Numeric, TokenValue::Number(n)) => Some(LiteralValue::Number(*n)),
            (TokenKind::String, TokenValue::String(s)) => Some(LiteralValue::String(s.clone())),
            (TokenKind::Boolean, TokenValue::Boolean(b)) => Some(LiteralValue::Boolean(*b)),
            (TokenKind::Null, _) => Some(LiteralValue::Null),
            (TokenKind::Undefined, _) => Some(LiteralValue::Undefined),
            _ => None,
        };
        if let Some(value) = literal {
            self.advance();
            return Ok(self.node(NodeKind::Literal { value }, start));
        }

        match kind {
            TokenKind::Identifier => {
                let name = self.expect_identifier("identifier")?;
                Ok(self.node(NodeKind::Identifier { name }, start))
            }
            TokenKind::Keyword(Keyword::This) => {
                self.advance();
                Ok(self.node(NodeKind::ThisExpression, start))
            }
            TokenKind::Keyword(Keyword::Function) => self.parse_function_expression(),
            TokenKind::Punctuator(Punctuator::LeftParen) => self.parse_paren_expression(),
            TokenKind::Punctuator(Punctuator::LeftBracket) => self.parse_array_literal(),
            TokenKind::Punctuator(Punctuator::LeftCurly) => self.parse_object_literal(),
            _ => Err(self.error_here("expression")),
        }
    }

    fn parse_array_literal(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        self.advance(); // consume '['

        let mut elements = vec![];
        while !self.check(punct(Punctuator::RightBracket)) {
            if self.check(punct(Punctuator::Comma)) {
                // Hole: [a, , b]
                elements.push(self.empty_expression());
                self.advance();
                continue;
            }

            elements.push(self.parse_assignment(true)?);

            if !self.check(punct(Punctuator::RightBracket)) {
                self.expect(punct(Punctuator::Comma), "',' or ']'")?;
            }
        }

        self.expect(punct(Punctuator::RightBracket), "']'")?;
        Ok(self.node(NodeKind::ArrayExpression { elements }, start))
    }

    fn parse_object_literal(&mut self) -> Result<Node, ParseError> {
        let start = self.start_pos();
        self.advance(); // consume '{'

        let mut properties = vec![];
        while !self.check(punct(Punctuator::RightCurly)) {
            let property_start = self.start_pos();
            let key = match self.peek().map(|t| &t.value) {
                Some(TokenValue::String(s)) => {
                    let key = s.clone();
                    self.advance();
                    key
                }
                Some(TokenValue::Number(n)) => {
                    let key = n.to_string();
                    self.advance();
                    key
                }
                _ => self.expect_property_name()?,
            };
            self.expect(punct(Punctuator::Colon), "':'")?;
            let value = self.parse_assignment(true)?;
            properties.push(self.node(
                NodeKind::Property {
                    key,
                    value: Box::new(value),
                },
                property_start,
            ));

            if !self.check(punct(Punctuator::RightCurly)) {
                self.expect(punct(Punctuator::Comma), "',' or '}'")?;
            }
        }

        self.expect(punct(Punctuator::RightCurly), "'}'")?;
        Ok(self.node(NodeKind::ObjectExpression { properties }, start))
    }
}

fn is_assignable(node: &Node) -> bool {
    matches!(
        node.kind,
        NodeKind::Identifier { .. } | NodeKind::MemberExpression { .. }
    )
}

/// Tokenizes and parses `source` in one go.
pub fn parse_source(source: &str) -> Result<Node, ParseError> {
    Parser::from_source(source).parse()
}

#[test]
fn test_empty_program() {
    let program = parse_source("").unwrap();
    assert!(matches!(program.kind, NodeKind::Program { ref body } if body.is_empty()));
}

#[test]
fn test_semicolon_insertion_on_newline() {
    let program = parse_source("a = 1\nb = 2").unwrap();
    let NodeKind::Program { body } = program.kind else {
        panic!("Expected program");
    };
    assert_eq!(body.len(), 2);
}

#[test]
fn test_missing_semicolon_on_same_line() {
    let err = parse_source("a = 1 b = 2").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
}
