use serde::Serialize;
use std::fmt;

/// A point in the source text.
///
/// Lines are 1-based, columns are 0-based character offsets within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Reserved words recognised by the tokenizer.
///
/// `null`, `undefined`, `true` and `false` are deliberately absent: they get
/// their own token kinds with a literal value attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Keyword {
    Do,
    If,
    In,
    For,
    Let,
    New,
    Try,
    Var,
    Case,
    Else,
    Enum,
    This,
    Void,
    With,
    Await,
    Break,
    Catch,
    Class,
    Const,
    Super,
    Throw,
    While,
    Yield,
    Delete,
    Export,
    Import,
    Public,
    Return,
    Static,
    Switch,
    Typeof,
    Default,
    Extends,
    Finally,
    Package,
    Private,
    Continue,
    Debugger,
    Function,
    Interface,
    Protected,
    Implements,
    Instanceof,
}

/// Operators and delimiters.
///
/// The tokenizer always prefers the longest punctuator, so `>>>=` is a single
/// [`Punctuator::AssignUnsignedShiftRight`] and never `>`, `>`, `>=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Punctuator {
    // Compound assignment
    /// `>>>=`
    AssignUnsignedShiftRight,
    /// `>>=`
    AssignShiftRight,
    /// `<<=`
    AssignShiftLeft,
    /// `|=`
    AssignBitwiseOr,
    /// `^=`
    AssignBitwiseXor,
    /// `&=`
    AssignBitwiseAnd,
    /// `+=`
    AssignPlus,
    /// `-=`
    AssignMinus,
    /// `*=`
    AssignMul,
    /// `/=`
    AssignDiv,
    /// `%=`
    AssignMod,
    /// `=`
    Assign,

    // Separators
    Semicolon,
    Comma,
    /// `?` of the conditional operator
    Hook,
    Colon,
    Dot,

    // Logical and bitwise
    /// `||`
    Or,
    /// `&&`
    And,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    /// `!`
    Not,
    /// `~`
    BitwiseNot,

    // Comparison
    /// `===`
    StrictEq,
    /// `==`
    Eq,
    /// `!==`
    StrictNe,
    /// `!=`
    Ne,
    Le,
    Lt,
    Ge,
    Gt,

    // Shift
    /// `<<`
    ShiftLeft,
    /// `>>>`
    UnsignedShiftRight,
    /// `>>`
    ShiftRight,

    // Arithmetic
    /// `++`
    Increment,
    /// `--`
    Decrement,
    Plus,
    Minus,
    Mul,
    Div,
    Mod,

    // Delimiters
    LeftBracket,
    RightBracket,
    LeftCurly,
    RightCurly,
    LeftParen,
    RightParen,
}

/// Token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Run of spaces or tabs. Excluded from the stream by default.
    Space,
    /// `\n`, `\r\n` or a lone `\r`
    LineBreak,
    /// `// ...` or `/* ... */`
    Comment,
    Identifier,
    Numeric,
    String,
    /// `true` or `false`
    Boolean,
    Null,
    Undefined,
    Keyword(Keyword),
    Punctuator(Punctuator),
}

impl TokenKind {
    /// Tokens the parser never looks at.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Space | TokenKind::LineBreak | TokenKind::Comment
        )
    }
}

/// Literal payload carried by a token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    None,
    Boolean(bool),
    Number(f64),
    /// String literal contents, comment text, or raw whitespace
    String(String),
    Identifier(String),
    Keyword(String),
    Null,
    Undefined,
}

impl TokenValue {
    /// Source-like text for error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenValue::None => String::new(),
            TokenValue::Boolean(b) => b.to_string(),
            TokenValue::Number(n) => n.to_string(),
            TokenValue::String(s) => format!("\"{}\"", s),
            TokenValue::Identifier(s) | TokenValue::Keyword(s) => s.clone(),
            TokenValue::Null => "null".to_string(),
            TokenValue::Undefined => "undefined".to_string(),
        }
    }
}

/// A classified lexeme with its source span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub start: Position,
    pub end: Position,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, start: Position, end: Position) -> Self {
        Token {
            kind,
            value,
            start,
            end,
        }
    }

    /// Identifier text, if this is an identifier token.
    pub fn identifier(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Identifier(name) if self.kind == TokenKind::Identifier => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Punctuator(p) => write!(f, "'{}'", crate::ast::tables::punctuator_text(p)),
            TokenKind::LineBreak => write!(f, "line break"),
            TokenKind::Space => write!(f, "whitespace"),
            TokenKind::Comment => write!(f, "comment"),
            _ => write!(f, "'{}'", self.value.describe()),
        }
    }
}
