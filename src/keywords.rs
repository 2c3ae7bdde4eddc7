use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::UnitClass;
use crate::token::TokenKind;

#[rustfmt::skip]
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("assert",   TokenKind::Assert),
    ("fn",       TokenKind::Fn),
    ("for",      TokenKind::For),
    ("while",    TokenKind::While),
    ("loop",     TokenKind::AlwaysLoop),
    ("continue", TokenKind::Continue),
    ("break",    TokenKind::Break),
    ("true",     TokenKind::True),
    ("false",    TokenKind::False),
    ("and",      TokenKind::And),
    ("or",       TokenKind::Or),
    ("xor",      TokenKind::Xor),
    ("not",      TokenKind::Not),
    ("return",   TokenKind::Return),
    ("ret",      TokenKind::Return),
    ("if",       TokenKind::If),
    ("do",       TokenKind::Do),
    ("in",       TokenKind::In),
    ("import",   TokenKind::Import),
    ("else",     TokenKind::Else),
    ("elif",     TokenKind::Elif),
    ("try",      TokenKind::Try),
    ("catch",    TokenKind::Catch),
    ("as",       TokenKind::As),
    ("var",      TokenKind::Var),
    ("const",    TokenKind::Const),
    ("class",    TokenKind::Class),
    ("with",     TokenKind::With),
    ("by",       TokenKind::By),
    ("say",      TokenKind::Say),
];

/// Literal suffixes such as `5kb` or `3ms`. Recognized, not yet supported.
#[rustfmt::skip]
pub const UNITS: &[(&str, UnitClass)] = &[
    ("b",   UnitClass::Size),
    ("kb",  UnitClass::Size),
    ("mb",  UnitClass::Size),
    ("gb",  UnitClass::Size),
    ("tb",  UnitClass::Size),
    ("pb",  UnitClass::Size),
    ("kib", UnitClass::Size),
    ("mib", UnitClass::Size),
    ("gib", UnitClass::Size),
    ("tib", UnitClass::Size),
    ("pib", UnitClass::Size),
    ("ns",  UnitClass::Time),
    ("us",  UnitClass::Time),
    ("ms",  UnitClass::Time),
    ("sec", UnitClass::Time),
    ("min", UnitClass::Time),
    ("hr",  UnitClass::Time),
    ("day", UnitClass::Time),
    ("wk",  UnitClass::Time),
];

static KEYWORD_TABLE: LazyLock<HashMap<&'static [u8], TokenKind>> = LazyLock::new(|| {
    KEYWORDS
        .iter()
        .map(|&(word, kind)| (word.as_bytes(), kind))
        .collect()
});

/// Exact, case-sensitive keyword lookup.
#[inline]
pub fn keyword(word: &[u8]) -> Option<TokenKind> {
    // longest keyword is "continue"
    if word.is_empty() || word.len() > 8 {
        return None;
    }
    KEYWORD_TABLE.get(word).copied()
}

/// Unit class for a suffix, ignoring ASCII case.
pub fn unit_class(suffix: &[u8]) -> Option<UnitClass> {
    UNITS
        .iter()
        .find(|(unit, _)| unit.as_bytes().eq_ignore_ascii_case(suffix))
        .map(|&(_, class)| class)
}
