//! Keyword and punctuator lookup tables used by the lexer.

use crate::ast::tokens::{Keyword, Punctuator};

/// Every reserved word and the keyword it maps to.
pub const KEYWORDS: &[(&str, Keyword)] = &[
    ("do", Keyword::Do),
    ("if", Keyword::If),
    ("in", Keyword::In),
    ("for", Keyword::For),
    ("let", Keyword::Let),
    ("new", Keyword::New),
    ("try", Keyword::Try),
    ("var", Keyword::Var),
    ("case", Keyword::Case),
    ("else", Keyword::Else),
    ("enum", Keyword::Enum),
    ("this", Keyword::This),
    ("void", Keyword::Void),
    ("with", Keyword::With),
    ("await", Keyword::Await),
    ("break", Keyword::Break),
    ("catch", Keyword::Catch),
    ("class", Keyword::Class),
    ("const", Keyword::Const),
    ("super", Keyword::Super),
    ("throw", Keyword::Throw),
    ("while", Keyword::While),
    ("yield", Keyword::Yield),
    ("delete", Keyword::Delete),
    ("export", Keyword::Export),
    ("import", Keyword::Import),
    ("public", Keyword::Public),
    ("return", Keyword::Return),
    ("static", Keyword::Static),
    ("switch", Keyword::Switch),
    ("typeof", Keyword::Typeof),
    ("default", Keyword::Default),
    ("extends", Keyword::Extends),
    ("finally", Keyword::Finally),
    ("package", Keyword::Package),
    ("private", Keyword::Private),
    ("continue", Keyword::Continue),
    ("debugger", Keyword::Debugger),
    ("function", Keyword::Function),
    ("interface", Keyword::Interface),
    ("protected", Keyword::Protected),
    ("implements", Keyword::Implements),
    ("instanceof", Keyword::Instanceof),
];

/// Every punctuator spelling. Longest entries are four characters.
pub const PUNCTUATORS: &[(&str, Punctuator)] = &[
    (">>>=", Punctuator::AssignUnsignedShiftRight),
    (">>=", Punctuator::AssignShiftRight),
    ("<<=", Punctuator::AssignShiftLeft),
    ("|=", Punctuator::AssignBitwiseOr),
    ("^=", Punctuator::AssignBitwiseXor),
    ("&=", Punctuator::AssignBitwiseAnd),
    ("+=", Punctuator::AssignPlus),
    ("-=", Punctuator::AssignMinus),
    ("*=", Punctuator::AssignMul),
    ("/=", Punctuator::AssignDiv),
    ("%=", Punctuator::AssignMod),
    (";", Punctuator::Semicolon),
    (",", Punctuator::Comma),
    ("?", Punctuator::Hook),
    (":", Punctuator::Colon),
    ("||", Punctuator::Or),
    ("&&", Punctuator::And),
    ("|", Punctuator::BitwiseOr),
    ("^", Punctuator::BitwiseXor),
    ("&", Punctuator::BitwiseAnd),
    ("===", Punctuator::StrictEq),
    ("==", Punctuator::Eq),
    ("=", Punctuator::Assign),
    ("!==", Punctuator::StrictNe),
    ("!=", Punctuator::Ne),
    ("<<", Punctuator::ShiftLeft),
    ("<=", Punctuator::Le),
    ("<", Punctuator::Lt),
    (">>>", Punctuator::UnsignedShiftRight),
    (">>", Punctuator::ShiftRight),
    (">=", Punctuator::Ge),
    (">", Punctuator::Gt),
    ("++", Punctuator::Increment),
    ("--", Punctuator::Decrement),
    ("+", Punctuator::Plus),
    ("-", Punctuator::Minus),
    ("*", Punctuator::Mul),
    ("/", Punctuator::Div),
    ("%", Punctuator::Mod),
    ("!", Punctuator::Not),
    ("~", Punctuator::BitwiseNot),
    (".", Punctuator::Dot),
    ("[", Punctuator::LeftBracket),
    ("]", Punctuator::RightBracket),
    ("{", Punctuator::LeftCurly),
    ("}", Punctuator::RightCurly),
    ("(", Punctuator::LeftParen),
    (")", Punctuator::RightParen),
];

const MAX_PUNCTUATOR_LEN: usize = 4;

pub fn lookup_keyword(word: &str) -> Option<Keyword> {
    KEYWORDS
        .iter()
        .find(|(text, _)| *text == word)
        .map(|(_, keyword)| *keyword)
}

pub fn lookup_punctuator(text: &str) -> Option<Punctuator> {
    PUNCTUATORS
        .iter()
        .find(|(spelling, _)| *spelling == text)
        .map(|(_, punctuator)| *punctuator)
}

/// Longest punctuator at the start of `input`, with its length in chars.
pub fn longest_punctuator(input: &[char]) -> Option<(Punctuator, usize)> {
    let max = input.len().min(MAX_PUNCTUATOR_LEN);
    (1..=max).rev().find_map(|len| {
        let candidate: String = input[..len].iter().collect();
        lookup_punctuator(&candidate).map(|p| (p, len))
    })
}

pub fn keyword_text(keyword: Keyword) -> &'static str {
    KEYWORDS
        .iter()
        .find(|(_, k)| *k == keyword)
        .map(|(text, _)| *text)
        .unwrap_or("?")
}

pub fn punctuator_text(punctuator: Punctuator) -> &'static str {
    PUNCTUATORS
        .iter()
        .find(|(_, p)| *p == punctuator)
        .map(|(text, _)| *text)
        .unwrap_or("?")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_match_wins() {
        let input: Vec<char> = ">>>=x".chars().collect();
        assert_eq!(
            longest_punctuator(&input),
            Some((Punctuator::AssignUnsignedShiftRight, 4))
        );

        let input: Vec<char> = "<<1".chars().collect();
        assert_eq!(longest_punctuator(&input), Some((Punctuator::ShiftLeft, 2)));

        let input: Vec<char> = "!=".chars().collect();
        assert_eq!(longest_punctuator(&input), Some((Punctuator::Ne, 2)));
    }

    #[test]
    fn test_no_punctuator() {
        let input: Vec<char> = "#".chars().collect();
        assert_eq!(longest_punctuator(&input), None);
    }

    #[test]
    fn test_tables_round_trip_spelling() {
        for (text, keyword) in KEYWORDS {
            assert_eq!(keyword_text(*keyword), *text);
        }
        for (text, punctuator) in PUNCTUATORS {
            assert_eq!(punctuator_text(*punctuator), *text);
        }
    }
}
