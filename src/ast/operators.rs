use crate::ast::tokens::{Keyword, Punctuator, TokenKind};
use std::fmt;

/// Binary operators, including the short-circuit `||` and `&&`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Logical
    /// `||`
    Or,
    /// `&&`
    And,

    // Bitwise
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,

    // Equality
    Equal,
    NotEqual,
    StrictEqual,
    StrictNotEqual,

    // Relational
    LessThan,
    GreaterThan,
    LessEqual,
    GreaterEqual,
    Instanceof,
    In,

    // Shift
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,

    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOperator {
    /// Binding power of the operator; higher binds tighter.
    pub fn precedence(self) -> u8 {
        use BinaryOperator::*;
        match self {
            Or => 1,
            And => 2,
            BitwiseOr => 3,
            BitwiseXor => 4,
            BitwiseAnd => 5,
            Equal | NotEqual | StrictEqual | StrictNotEqual => 6,
            LessThan | GreaterThan | LessEqual | GreaterEqual | Instanceof | In => 7,
            ShiftLeft | ShiftRight | UnsignedShiftRight => 8,
            Add | Subtract => 9,
            Multiply | Divide | Modulo => 10,
        }
    }

    pub fn from_token(kind: TokenKind) -> Option<Self> {
        use BinaryOperator::*;
        let op = match kind {
            TokenKind::Punctuator(p) => match p {
                Punctuator::Or => Or,
                Punctuator::And => And,
                Punctuator::BitwiseOr => BitwiseOr,
                Punctuator::BitwiseXor => BitwiseXor,
                Punctuator::BitwiseAnd => BitwiseAnd,
                Punctuator::Eq => Equal,
                Punctuator::Ne => NotEqual,
                Punctuator::StrictEq => StrictEqual,
                Punctuator::StrictNe => StrictNotEqual,
                Punctuator::Lt => LessThan,
                Punctuator::Gt => GreaterThan,
                Punctuator::Le => LessEqual,
                Punctuator::Ge => GreaterEqual,
                Punctuator::ShiftLeft => ShiftLeft,
                Punctuator::ShiftRight => ShiftRight,
                Punctuator::UnsignedShiftRight => UnsignedShiftRight,
                Punctuator::Plus => Add,
                Punctuator::Minus => Subtract,
                Punctuator::Mul => Multiply,
                Punctuator::Div => Divide,
                Punctuator::Mod => Modulo,
                _ => return None,
            },
            TokenKind::Keyword(Keyword::Instanceof) => Instanceof,
            TokenKind::Keyword(Keyword::In) => In,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(self) -> &'static str {
        use BinaryOperator::*;
        match self {
            Or => "||",
            And => "&&",
            BitwiseOr => "|",
            BitwiseXor => "^",
            BitwiseAnd => "&",
            Equal => "==",
            NotEqual => "!=",
            StrictEqual => "===",
            StrictNotEqual => "!==",
            LessThan => "<",
            GreaterThan => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Instanceof => "instanceof",
            In => "in",
            ShiftLeft => "<<",
            ShiftRight => ">>",
            UnsignedShiftRight => ">>>",
            Add => "+",
            Subtract => "-",
            Multiply => "*",
            Divide => "/",
            Modulo => "%",
        }
    }
}

/// Plain and compound assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOperator {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    ModuloAssign,
    ShiftLeftAssign,
    ShiftRightAssign,
    UnsignedShiftRightAssign,
    BitwiseOrAssign,
    BitwiseXorAssign,
    BitwiseAndAssign,
}

impl AssignOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        use AssignOperator::*;
        let TokenKind::Punctuator(p) = kind else {
            return None;
        };
        let op = match p {
            Punctuator::Assign => Assign,
            Punctuator::AssignPlus => AddAssign,
            Punctuator::AssignMinus => SubtractAssign,
            Punctuator::AssignMul => MultiplyAssign,
            Punctuator::AssignDiv => DivideAssign,
            Punctuator::AssignMod => ModuloAssign,
            Punctuator::AssignShiftLeft => ShiftLeftAssign,
            Punctuator::AssignShiftRight => ShiftRightAssign,
            Punctuator::AssignUnsignedShiftRight => UnsignedShiftRightAssign,
            Punctuator::AssignBitwiseOr => BitwiseOrAssign,
            Punctuator::AssignBitwiseXor => BitwiseXorAssign,
            Punctuator::AssignBitwiseAnd => BitwiseAndAssign,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(self) -> &'static str {
        use AssignOperator::*;
        match self {
            Assign => "=",
            AddAssign => "+=",
            SubtractAssign => "-=",
            MultiplyAssign => "*=",
            DivideAssign => "/=",
            ModuloAssign => "%=",
            ShiftLeftAssign => "<<=",
            ShiftRightAssign => ">>=",
            UnsignedShiftRightAssign => ">>>=",
            BitwiseOrAssign => "|=",
            BitwiseXorAssign => "^=",
            BitwiseAndAssign => "&=",
        }
    }
}

/// Prefix unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
    Not,
    BitwiseNot,
    Typeof,
    Void,
    Delete,
}

impl UnaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Punctuator(Punctuator::Plus) => UnaryOperator::Plus,
            TokenKind::Punctuator(Punctuator::Minus) => UnaryOperator::Minus,
            TokenKind::Punctuator(Punctuator::Not) => UnaryOperator::Not,
            TokenKind::Punctuator(Punctuator::BitwiseNot) => UnaryOperator::BitwiseNot,
            TokenKind::Keyword(Keyword::Typeof) => UnaryOperator::Typeof,
            TokenKind::Keyword(Keyword::Void) => UnaryOperator::Void,
            TokenKind::Keyword(Keyword::Delete) => UnaryOperator::Delete,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::Not => "!",
            UnaryOperator::BitwiseNot => "~",
            UnaryOperator::Typeof => "typeof",
            UnaryOperator::Void => "void",
            UnaryOperator::Delete => "delete",
        }
    }
}

/// `++` and `--`, prefix or postfix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOperator {
    Increment,
    Decrement,
}

impl UpdateOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Punctuator(Punctuator::Increment) => Some(UpdateOperator::Increment),
            TokenKind::Punctuator(Punctuator::Decrement) => Some(UpdateOperator::Decrement),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UpdateOperator::Increment => "++",
            UpdateOperator::Decrement => "--",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(BinaryOperator, AssignOperator, UnaryOperator, UpdateOperator);
