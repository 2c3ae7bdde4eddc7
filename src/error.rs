use thiserror::Error;

use crate::token::FileId;

/// Compact byte-span used by diagnostics.
///
/// Token locations stay `usize`; spans are `u32` for compactness and clamp
/// instead of panicking on inputs larger than 4GiB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32, // exclusive
}

#[inline]
const fn clamp_u32(x: usize) -> u32 {
    if x > u32::MAX as usize {
        u32::MAX
    } else {
        x as u32
    }
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self {
            start: clamp_u32(start),
            end: clamp_u32(end),
        }
    }

    #[inline]
    pub const fn empty_at(pos: usize) -> Self {
        let p = clamp_u32(pos);
        Self { start: p, end: p }
    }

    /// One-byte span at `pos`, used for errors raised on a single byte.
    #[inline]
    pub const fn single_at(pos: usize) -> Self {
        let p = clamp_u32(pos);
        Self {
            start: p,
            end: p.saturating_add(1),
        }
    }

    pub const fn from_range(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }

    #[inline]
    pub const fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagKind {
    Lex,
    Source,
}

/// Structured diagnostic handed to error-reporting collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diag {
    pub kind: DiagKind,
    pub span: Span,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitClass {
    Size,
    Time,
}

impl std::fmt::Display for UnitClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            UnitClass::Size => "size",
            UnitClass::Time => "time",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("empty identifier")]
    EmptyIdentifier,
    #[error("duplicate decimal point in number")]
    DuplicateDecimalPoint,
    #[error("reserved sigil '@' inside a literal")]
    ReservedSigil,
    #[error("{class} unit suffix {unit:?} is not supported yet")]
    UnsupportedUnit { unit: String, class: UnitClass },
    #[error("unknown unit suffix {0:?}")]
    UnknownUnit(String),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unterminated command block")]
    UnterminatedCommandBlock,
}

/// First lexical error of a run. `node` names the state the machine was in.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} at {}..{} (in {node})", span.start, span.end)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    pub node: &'static str,
}

impl LexError {
    #[inline]
    pub fn offset(&self) -> usize {
        self.span.start as usize
    }

    #[inline]
    pub fn diag(&self) -> Diag {
        Diag {
            kind: DiagKind::Lex,
            span: self.span,
            message: self.kind.to_string(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("offset {offset} is outside of source of length {len}")]
    OffsetOutOfRange { offset: usize, len: usize },
    #[error("range {offset}+{length} exceeds source of length {len}")]
    RangeOutOfBounds {
        offset: usize,
        length: usize,
        len: usize,
    },
    #[error("no source registered for {0}")]
    UnknownFile(FileId),
}

impl SourceError {
    pub fn diag(&self) -> Diag {
        let span = match *self {
            SourceError::OffsetOutOfRange { offset, .. } => Span::empty_at(offset),
            SourceError::RangeOutOfBounds { offset, length, .. } => {
                Span::new(offset, offset.saturating_add(length))
            }
            SourceError::UnknownFile(_) => Span::default(),
        };
        Diag {
            kind: DiagKind::Source,
            span,
            message: self.to_string(),
        }
    }
}
