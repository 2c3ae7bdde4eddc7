//! State nodes of the lexer's DFA.
//!
//! Each node consumes exactly one byte per call. A node may emit tokens,
//! switch to another node, or rewind so the next node sees the same byte
//! again.

use crate::error::LexErrorKind;
use crate::keywords::{keyword, unit_class};
use crate::lexer::Lexer;
use crate::operators::{is_operator_byte, OperatorSet};
use crate::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DfaNode {
    /// Between tokens.
    Start,
    /// From `#` to the end of the line.
    Comment,
    Number {
        has_decimal: bool,
        first_char: bool,
    },
    /// Bare word at bracket depth 0.
    UnquotedLiteral,
    /// `@name` or a bare word inside brackets.
    Identifier,
    QuotedLiteral {
        quote: u8,
        escaped: bool,
    },
    /// Backtick command block. `quote` is set while inside a nested quote.
    QuotedArgList {
        quote: Option<u8>,
        escaped: bool,
    },
}

impl DfaNode {
    pub const fn name(&self) -> &'static str {
        match self {
            DfaNode::Start => "start",
            DfaNode::Comment => "comment",
            DfaNode::Number { .. } => "number",
            DfaNode::UnquotedLiteral => "unquoted literal",
            DfaNode::Identifier => "identifier",
            DfaNode::QuotedLiteral { .. } => "quoted literal",
            DfaNode::QuotedArgList { .. } => "quoted argument list",
        }
    }
}

// =============================================================================
// Byte classes
// =============================================================================

#[inline]
const fn is_word_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c >= 0x80 || matches!(c, b'.' | b'*' | b'/' | b'+' | b'-' | b'%' | b'_')
}

/// Whitespace that does not end a statement.
#[inline]
const fn is_blank(c: u8) -> bool {
    c != b'\n' && c.is_ascii_whitespace()
}

#[inline]
const fn ends_bare_word(c: u8) -> bool {
    matches!(c, b'<' | b'>' | b'{' | b'}' | b'[' | b']' | b')' | b'|' | b';' | b',' | b'\n')
}

#[inline]
fn segment_kind(segment: &[u8]) -> TokenKind {
    if segment == b"_" {
        TokenKind::ImplicitLambdaParam
    } else {
        TokenKind::Name
    }
}

// =============================================================================
// Nodes
// =============================================================================

impl Lexer<'_> {
    pub(crate) fn consume(&mut self, c: u8, pos: usize) -> Result<(), LexErrorKind> {
        match self.state.node {
            DfaNode::Start => self.start(c, pos),
            DfaNode::Comment => {
                self.comment(c, pos);
                Ok(())
            }
            DfaNode::Number {
                has_decimal,
                first_char,
            } => self.number(c, pos, has_decimal, first_char),
            DfaNode::UnquotedLiteral => self.unquoted_literal(c, pos),
            DfaNode::Identifier => self.identifier(c, pos),
            DfaNode::QuotedLiteral { quote, escaped } => {
                self.quoted_literal(c, pos, quote, escaped);
                Ok(())
            }
            DfaNode::QuotedArgList { quote, escaped } => {
                self.quoted_arg_list(c, pos, quote, escaped);
                Ok(())
            }
        }
    }

    fn newline(&mut self, offset: usize, length: usize) {
        if self.state.paren_depth == 0 {
            self.emit(TokenKind::Semicolon, offset, length);
        }
        self.state.prev = None;
    }

    // -------------------------------------------------------------------------
    // Start
    // -------------------------------------------------------------------------

    fn start(&mut self, c: u8, pos: usize) -> Result<(), LexErrorKind> {
        match c {
            b'\n' => self.newline(pos, 0),
            c if c.is_ascii_whitespace() => {}
            b'#' => self.reconsume(DfaNode::Comment, pos),
            b'@' => self.enter(DfaNode::Identifier, pos),
            b'"' | b'\'' => self.enter(
                DfaNode::QuotedLiteral {
                    quote: c,
                    escaped: false,
                },
                pos,
            ),
            b'`' => self.enter(
                DfaNode::QuotedArgList {
                    quote: None,
                    escaped: false,
                },
                pos,
            ),
            _ => {
                let ops = OperatorSet::for_context(self.state.in_block(), self.state.prev).trie();
                if let Some(m) = ops.longest_match(self.bytes, pos) {
                    self.emit(m.kind, pos, m.len);
                    self.state.track_depth(m.kind);
                    self.state.head = pos + m.len;
                } else if c.is_ascii_digit() || (c == b'-' && self.peek(pos + 1).is_ascii_digit()) {
                    let node = DfaNode::Number {
                        has_decimal: false,
                        first_char: true,
                    };
                    self.reconsume(node, pos);
                } else if is_word_start(c) {
                    let node = if self.state.in_block() {
                        DfaNode::Identifier
                    } else {
                        DfaNode::UnquotedLiteral
                    };
                    self.reconsume(node, pos);
                } else {
                    let ch = self.source.char_at(pos).unwrap_or(char::from(c));
                    return Err(LexErrorKind::UnexpectedChar(ch));
                }
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Comment
    // -------------------------------------------------------------------------

    fn comment(&mut self, c: u8, pos: usize) {
        if c == b'\n' {
            let start = self.state.token_start;
            self.newline(start, pos - start);
            self.goto(DfaNode::Start, pos);
        }
    }

    // -------------------------------------------------------------------------
    // Number
    // -------------------------------------------------------------------------

    fn number(
        &mut self,
        c: u8,
        pos: usize,
        has_decimal: bool,
        first_char: bool,
    ) -> Result<(), LexErrorKind> {
        let mut has_decimal = has_decimal;
        if c == b'.' {
            if self.peek(pos + 1) == b'.' {
                // `1..10`: leave both dots to the range operator
                self.emit_number(pos, has_decimal);
                self.rewind_to_start(pos);
                return Ok(());
            }
            if has_decimal {
                return Err(LexErrorKind::DuplicateDecimalPoint);
            }
            has_decimal = true;
        } else if !(c.is_ascii_digit() || (first_char && c == b'-')) {
            if self.state.prev != Some(TokenKind::ExecArg) && c.is_ascii_alphabetic() {
                return Err(self.unit_error(pos));
            }
            self.emit_number(pos, has_decimal);
            self.rewind_to_start(pos);
            return Ok(());
        }

        self.state.node = DfaNode::Number {
            has_decimal,
            first_char: false,
        };
        Ok(())
    }

    fn emit_number(&mut self, end: usize, has_decimal: bool) {
        let kind = if self.state.prev == Some(TokenKind::ExecArg) {
            TokenKind::ExecArg
        } else if has_decimal {
            TokenKind::Float
        } else {
            TokenKind::Int
        };
        let start = self.state.token_start;
        self.emit(kind, start, end - start);
    }

    fn unit_error(&self, pos: usize) -> LexErrorKind {
        let suffix_len = self.bytes[pos..]
            .iter()
            .take_while(|b| b.is_ascii_alphabetic())
            .count();
        let suffix = &self.bytes[pos..pos + suffix_len];
        let unit = String::from_utf8_lossy(suffix).into_owned();
        match unit_class(suffix) {
            Some(class) => LexErrorKind::UnsupportedUnit { unit, class },
            None => LexErrorKind::UnknownUnit(unit),
        }
    }

    // -------------------------------------------------------------------------
    // UnquotedLiteral
    // -------------------------------------------------------------------------

    /// How a finished bare word reads in the current context.
    fn classify_word(&self, word: &[u8]) -> TokenKind {
        if let Some(kind) = keyword(word) {
            kind
        } else if word == b"_" || word.starts_with(b"_.") {
            TokenKind::ImplicitLambdaParam
        } else if self.state.in_block() || self.state.prev.is_some_and(TokenKind::precedes_name) {
            TokenKind::Name
        } else {
            TokenKind::ExecArg
        }
    }

    /// First non-blank byte at or after `index` on the current line.
    fn next_non_blank(&self, index: usize) -> u8 {
        self.bytes
            .get(index..)
            .and_then(|rest| rest.iter().copied().find(|&b| !is_blank(b)))
            .unwrap_or(0)
    }

    fn unquoted_literal(&mut self, c: u8, pos: usize) -> Result<(), LexErrorKind> {
        // After a blank the word is done; what follows decides how it reads.
        let blank = is_blank(c);
        let c = if blank { self.next_non_blank(pos + 1) } else { c };

        let start = self.state.token_start;
        let kind = self.classify_word(&self.bytes[start..pos]);
        let double_dot = c == b'.' && self.peek(pos + 1) == b'.';

        if !blank
            && c == b'.'
            && !double_dot
            && matches!(kind, TokenKind::Name | TokenKind::ImplicitLambdaParam)
        {
            if pos > start {
                self.emit(kind, start, pos - start);
            }
            self.emit(TokenKind::Dot, pos, 1);
            self.goto(DfaNode::Start, pos);
        } else if matches!(c, b'(' | b':' | b'=') {
            self.emit_dotted_path(start, pos);
            self.rewind_to_start(pos);
        } else if blank || ends_bare_word(c) || double_dot {
            self.emit(kind, start, pos - start);
            self.rewind_to_start(pos);
        } else if c == b'@' {
            return Err(LexErrorKind::ReservedSigil);
        }
        Ok(())
    }

    /// Emits `start..end` as a keyword, or as dot-separated names.
    fn emit_dotted_path(&mut self, start: usize, end: usize) {
        if let Some(kind) = keyword(&self.bytes[start..end]) {
            self.emit(kind, start, end - start);
            return;
        }

        let mut offset = start;
        let bytes = self.bytes;
        let mut segments = bytes[start..end].split(|&b| b == b'.').peekable();
        while let Some(segment) = segments.next() {
            if !segment.is_empty() {
                self.emit(segment_kind(segment), offset, segment.len());
            }
            offset += segment.len();
            if segments.peek().is_some() {
                self.emit(TokenKind::Dot, offset, 1);
                offset += 1;
            }
        }
    }

    // -------------------------------------------------------------------------
    // Identifier
    // -------------------------------------------------------------------------

    fn identifier(&mut self, c: u8, pos: usize) -> Result<(), LexErrorKind> {
        if c == b'@' {
            return Err(LexErrorKind::ReservedSigil);
        }

        let start = self.state.token_start;
        let single_dot = c == b'.' && self.peek(pos + 1) != b'.';
        if !single_dot && !c.is_ascii_whitespace() && !is_operator_byte(c) {
            return Ok(());
        }
        if pos == start {
            return Err(LexErrorKind::EmptyIdentifier);
        }

        let bytes = self.bytes;
        let segment = &bytes[start..pos];
        if single_dot {
            self.emit(segment_kind(segment), start, pos - start);
            self.emit(TokenKind::Dot, pos, 1);
            self.state.token_start = pos + 1;
        } else {
            let kind = keyword(segment).unwrap_or_else(|| segment_kind(segment));
            self.emit(kind, start, pos - start);
            self.rewind_to_start(pos);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // QuotedLiteral
    // -------------------------------------------------------------------------

    fn quoted_literal(&mut self, c: u8, pos: usize, quote: u8, escaped: bool) {
        if escaped || c == b'\\' {
            self.state.node = DfaNode::QuotedLiteral {
                quote,
                escaped: !escaped,
            };
        } else if c == quote {
            let kind = if self.state.prev == Some(TokenKind::ExecArg) {
                TokenKind::ExecArg
            } else {
                TokenKind::QuotedString
            };
            let start = self.state.token_start;
            self.emit(kind, start, pos - start);
            self.goto(DfaNode::Start, pos);
        }
    }

    // -------------------------------------------------------------------------
    // QuotedArgList
    // -------------------------------------------------------------------------

    fn flush_arg(&mut self, end: usize) {
        let start = self.state.token_start;
        if end > start {
            self.emit(TokenKind::ExecArg, start, end - start);
        }
    }

    fn quoted_arg_list(&mut self, c: u8, pos: usize, quote: Option<u8>, escaped: bool) {
        let mut next = DfaNode::QuotedArgList {
            quote,
            escaped: false,
        };

        if escaped || c == b'\\' {
            next = DfaNode::QuotedArgList {
                quote,
                escaped: !escaped,
            };
        } else if c == b'"' || c == b'\'' {
            match quote {
                None => {
                    self.flush_arg(pos);
                    self.state.token_start = pos + 1;
                    next = DfaNode::QuotedArgList {
                        quote: Some(c),
                        escaped: false,
                    };
                }
                Some(open) if open == c => {
                    // an explicit "" is still an argument
                    let start = self.state.token_start;
                    self.emit(TokenKind::ExecArg, start, pos - start);
                    self.state.token_start = pos + 1;
                    next = DfaNode::QuotedArgList {
                        quote: None,
                        escaped: false,
                    };
                }
                Some(_) => {}
            }
        } else if quote.is_none() {
            match c {
                b'|' => {
                    self.flush_arg(pos);
                    self.emit(TokenKind::Pipe, pos, 1);
                    self.state.token_start = pos + 1;
                }
                b'`' => {
                    self.flush_arg(pos);
                    self.goto(DfaNode::Start, pos);
                    return;
                }
                c if c.is_ascii_whitespace() => {
                    self.flush_arg(pos);
                    self.state.token_start = pos + 1;
                }
                _ => {}
            }
        }

        self.state.node = next;
    }
}
