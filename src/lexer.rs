use crate::ast::tables::{longest_punctuator, lookup_keyword};
use crate::ast::{Position, Token, TokenKind, TokenValue};
use std::collections::HashSet;
use tracing::warn;

/// Input the lexer could not classify and skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalGap {
    pub lexeme: String,
    pub position: Position,
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    excluded: HashSet<TokenKind>,
    gaps: Vec<LexicalGap>,
}

impl Lexer {
    /// A lexer that drops [`TokenKind::Space`] tokens and keeps everything else.
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 0,
            excluded: HashSet::from([TokenKind::Space]),
            gaps: Vec::new(),
        }
    }

    /// Replaces the set of token kinds left out of [`Lexer::tokenize`].
    pub fn with_excluded(mut self, excluded: impl IntoIterator<Item = TokenKind>) -> Self {
        self.excluded = excluded.into_iter().collect();
        self
    }

    /// Everything skipped so far.
    pub fn gaps(&self) -> &[LexicalGap] {
        &self.gaps
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        let Some(ch) = self.current_char() else {
            return;
        };
        self.position += 1;
        // \r\n counts as one break, charged to the \n
        if ch == '\n' || (ch == '\r' && self.current_char() != Some('\n')) {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            self.advance();
        }
    }

    fn pos(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn text_since(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    fn token(&self, kind: TokenKind, value: TokenValue, start: Position) -> Token {
        Token::new(kind, value, start, self.pos())
    }

    fn read_space(&mut self, start: Position) -> Token {
        let from = self.position;
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() && ch != '\n' && ch != '\r' {
                self.advance();
            } else {
                break;
            }
        }
        self.token(
            TokenKind::Space,
            TokenValue::String(self.text_since(from)),
            start,
        )
    }

    fn read_line_break(&mut self, start: Position) -> Token {
        let from = self.position;
        if self.current_char() == Some('\r') && self.peek_char(1) == Some('\n') {
            self.advance();
        }
        self.advance();
        self.token(
            TokenKind::LineBreak,
            TokenValue::String(self.text_since(from)),
            start,
        )
    }

    fn read_line_comment(&mut self, start: Position) -> Token {
        let from = self.position;
        while let Some(ch) = self.current_char() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            self.advance();
        }
        self.token(
            TokenKind::Comment,
            TokenValue::String(self.text_since(from)),
            start,
        )
    }

    /// `None` when the comment never closes; the rest of the input becomes a gap.
    fn read_block_comment(&mut self, start: Position) -> Option<Token> {
        let from = self.position;
        self.advance_by(2); // Consume "/*"
        while let Some(ch) = self.current_char() {
            if ch == '*' && self.peek_char(1) == Some('/') {
                self.advance_by(2);
                return Some(self.token(
                    TokenKind::Comment,
                    TokenValue::String(self.text_since(from)),
                    start,
                ));
            }
            self.advance();
        }
        self.record_gap(from, start);
        None
    }

    /// Contents are kept verbatim: quotes stripped, escapes untouched.
    fn read_string(&mut self, quote: char, start: Position) -> Option<Token> {
        let from = self.position;
        self.advance(); // Consume opening quote

        let mut contents = String::new();
        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Some(self.token(
                        TokenKind::String,
                        TokenValue::String(contents),
                        start,
                    ));
                }
                '\n' | '\r' => break,
                '\\' => {
                    contents.push(ch);
                    self.advance();
                    match self.current_char() {
                        Some(escaped) if escaped != '\n' && escaped != '\r' => {
                            contents.push(escaped);
                            self.advance();
                        }
                        _ => break,
                    }
                }
                _ => {
                    contents.push(ch);
                    self.advance();
                }
            }
        }

        self.record_gap(from, start);
        None
    }

    fn read_word(&mut self, start: Position) -> Token {
        let from = self.position;
        while let Some(ch) = self.current_char() {
            if is_identifier_part(ch) {
                self.advance();
            } else {
                break;
            }
        }
        let word = self.text_since(from);

        match word.as_str() {
            "null" => self.token(TokenKind::Null, TokenValue::Null, start),
            "undefined" => self.token(TokenKind::Undefined, TokenValue::Undefined, start),
            "true" => self.token(TokenKind::Boolean, TokenValue::Boolean(true), start),
            "false" => self.token(TokenKind::Boolean, TokenValue::Boolean(false), start),
            _ => match lookup_keyword(&word) {
                Some(keyword) => {
                    self.token(TokenKind::Keyword(keyword), TokenValue::Keyword(word), start)
                }
                None => self.token(TokenKind::Identifier, TokenValue::Identifier(word), start),
            },
        }
    }

    fn read_digits(&mut self, radix: u32) -> String {
        let mut digits = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_digit(radix) {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        digits
    }

    fn read_number(&mut self, start: Position) -> Token {
        if self.current_char() == Some('0') {
            let radix = match self.peek_char(1) {
                Some('x' | 'X') => Some(16),
                Some('o' | 'O') => Some(8),
                Some('b' | 'B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix
                && self.peek_char(2).is_some_and(|c| c.is_digit(radix))
            {
                self.advance_by(2);
                let digits = self.read_digits(radix);
                let value = u64::from_str_radix(&digits, radix)
                    .map(|n| n as f64)
                    .unwrap_or(f64::INFINITY);
                return self.token(TokenKind::Numeric, TokenValue::Number(value), start);
            }
        }

        let mut number = self.read_digits(10);
        // `5.` is a complete literal; a lone `.` needs a digit after it
        if self.current_char() == Some('.')
            && (!number.is_empty() || self.peek_char(1).is_some_and(|c| c.is_ascii_digit()))
        {
            number.push('.');
            self.advance();
            number.push_str(&self.read_digits(10));
        }
        if matches!(self.current_char(), Some('e' | 'E')) {
            let signed = matches!(self.peek_char(1), Some('+' | '-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_char(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                number.push('e');
                self.advance();
                if signed {
                    number.extend(self.current_char());
                    self.advance();
                }
                number.push_str(&self.read_digits(10));
            }
        }

        let value = number.parse::<f64>().unwrap_or(f64::NAN);
        self.token(TokenKind::Numeric, TokenValue::Number(value), start)
    }

    fn skip_unrecognized(&mut self, start: Position) {
        let from = self.position;
        self.advance();
        while let Some(ch) = self.current_char() {
            if can_start_token(ch) {
                break;
            }
            self.advance();
        }
        self.record_gap(from, start);
    }

    fn record_gap(&mut self, from: usize, position: Position) {
        let lexeme = self.text_since(from);
        warn!(%position, lexeme = %lexeme, "skipping unrecognized input");
        self.gaps.push(LexicalGap { lexeme, position });
    }

    /// Next token of any kind, including excluded ones. `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            let ch = self.current_char()?;
            let start = self.pos();

            let token = match ch {
                '\n' | '\r' => self.read_line_break(start),
                c if c.is_whitespace() => self.read_space(start),
                '/' if self.peek_char(1) == Some('/') => self.read_line_comment(start),
                '/' if self.peek_char(1) == Some('*') => match self.read_block_comment(start) {
                    Some(token) => token,
                    None => continue,
                },
                '"' | '\'' => match self.read_string(ch, start) {
                    Some(token) => token,
                    None => continue,
                },
                c if is_identifier_start(c) => self.read_word(start),
                c if c.is_ascii_digit() => self.read_number(start),
                '.' if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                    self.read_number(start)
                }
                _ => match longest_punctuator(&self.input[self.position..]) {
                    Some((punctuator, len)) => {
                        self.advance_by(len);
                        self.token(TokenKind::Punctuator(punctuator), TokenValue::None, start)
                    }
                    None => {
                        self.skip_unrecognized(start);
                        continue;
                    }
                },
            };
            return Some(token);
        }
    }

    /// All remaining tokens whose kind is not excluded, in source order.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            if !self.excluded.contains(&token.kind) {
                tokens.push(token);
            }
        }
        tokens
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

fn is_identifier_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

fn can_start_token(ch: char) -> bool {
    ch.is_whitespace()
        || is_identifier_part(ch)
        || ch == '"'
        || ch == '\''
        || longest_punctuator(&[ch]).is_some()
}

/// Tokenizes `source`, leaving out whitespace.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

/// Tokenizes `source`, leaving out the given kinds.
pub fn tokenize_excluding(source: &str, excluded: &[TokenKind]) -> Vec<Token> {
    Lexer::new(source)
        .with_excluded(excluded.iter().copied())
        .tokenize()
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("var x null undefined true false");
    let kinds: Vec<TokenKind> = lexer.tokenize().into_iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Keyword(crate::ast::Keyword::Var),
            TokenKind::Identifier,
            TokenKind::Null,
            TokenKind::Undefined,
            TokenKind::Boolean,
            TokenKind::Boolean,
        ]
    );
}

#[test]
fn test_positions() {
    let tokens = tokenize("a\n  bb");
    assert_eq!(tokens[0].start, Position::new(1, 0));
    assert_eq!(tokens[1].kind, TokenKind::LineBreak);
    assert_eq!(tokens[2].start, Position::new(2, 2));
    assert_eq!(tokens[2].end, Position::new(2, 4));
}

#[test]
fn test_crlf_is_one_break() {
    let tokens = tokenize("a\r\nb");
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[2].start, Position::new(2, 0));
}
