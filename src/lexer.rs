use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::dfa::DfaNode;
use crate::error::{LexError, LexErrorKind, Span};
use crate::source::Source;
use crate::token::{SourceLocation, Token, TokenKind};

// =============================================================================
// Cursor
// =============================================================================

/// Mutable cursor of one lexing run.
///
/// `head` is the index of the next byte to feed. Nodes receive the offset of
/// the byte being consumed and rewind by moving `head` back onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerState {
    pub head: usize,
    pub token_start: usize,
    pub paren_depth: u32,
    pub curly_depth: u32,
    pub square_depth: u32,
    /// Kind of the last emitted token; `None` at the start of a statement.
    pub prev: Option<TokenKind>,
    pub node: DfaNode,
}

impl LexerState {
    fn new() -> Self {
        Self {
            head: 0,
            token_start: 0,
            paren_depth: 0,
            curly_depth: 0,
            square_depth: 0,
            prev: None,
            node: DfaNode::Start,
        }
    }

    /// Inside any kind of bracket.
    #[inline]
    pub fn in_block(&self) -> bool {
        self.paren_depth > 0 || self.curly_depth > 0 || self.square_depth > 0
    }

    /// Bracket tokens move their counter; the rest are ignored. Stray
    /// closers leave a counter at zero.
    pub(crate) fn track_depth(&mut self, kind: TokenKind) {
        match kind {
            TokenKind::ParenOpen => self.paren_depth += 1,
            TokenKind::ParenClose => self.paren_depth = self.paren_depth.saturating_sub(1),
            TokenKind::CurlyOpen => self.curly_depth += 1,
            TokenKind::CurlyClose => self.curly_depth = self.curly_depth.saturating_sub(1),
            TokenKind::SquareOpen => self.square_depth += 1,
            TokenKind::SquareClose => self.square_depth = self.square_depth.saturating_sub(1),
            _ => {}
        }
    }
}

// =============================================================================
// Driver
// =============================================================================

/// Pull-based lexer over one [`Source`].
///
/// Yields tokens in source order. The first error ends the stream; after it
/// (or after the last token) the iterator keeps returning `None`.
pub struct Lexer<'src> {
    pub(crate) source: &'src Source,
    pub(crate) bytes: &'src [u8],
    pub(crate) state: LexerState,
    pub(crate) pending: VecDeque<Token>,
    failed: Option<LexError>,
    finished: bool,
    emitted: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src Source) -> Self {
        Self {
            source,
            bytes: source.padded_bytes(),
            state: LexerState::new(),
            pending: VecDeque::with_capacity(4),
            failed: None,
            finished: false,
            emitted: 0,
        }
    }

    #[inline]
    pub fn source(&self) -> &'src Source {
        self.source
    }

    #[inline]
    pub fn state(&self) -> &LexerState {
        &self.state
    }

    /// Feeds one byte, or checks the final node once input is exhausted.
    fn advance(&mut self) -> Result<(), LexError> {
        let pos = self.state.head;
        let Some(&c) = self.bytes.get(pos) else {
            return self.finish();
        };
        self.state.head = pos + 1;
        self.consume(c, pos).map_err(|kind| self.fail(kind, Span::single_at(pos)))
    }

    fn finish(&mut self) -> Result<(), LexError> {
        self.finished = true;
        let kind = match self.state.node {
            DfaNode::Comment | DfaNode::Start => {
                tracing::debug!(
                    file = %self.source.file(),
                    tokens = self.emitted,
                    bytes = self.source.len(),
                    "lexing finished"
                );
                return Ok(());
            }
            DfaNode::QuotedArgList { .. } => LexErrorKind::UnterminatedCommandBlock,
            _ => LexErrorKind::UnterminatedString,
        };
        Err(self.fail(kind, Span::empty_at(self.source.len())))
    }

    fn fail(&self, kind: LexErrorKind, span: Span) -> LexError {
        let err = LexError {
            kind,
            span,
            node: self.state.node.name(),
        };
        tracing::debug!(file = %self.source.file(), error = %err, "lexing failed");
        err
    }

    // -------------------------------------------------------------------------
    // Helpers shared by the state nodes
    // -------------------------------------------------------------------------

    /// Byte at `index`, or 0 past the sentinel.
    #[inline]
    pub(crate) fn peek(&self, index: usize) -> u8 {
        self.bytes.get(index).copied().unwrap_or(0)
    }

    #[inline]
    pub(crate) fn emit(&mut self, kind: TokenKind, offset: usize, length: usize) {
        self.pending.push_back(Token {
            kind,
            loc: SourceLocation {
                file: self.source.file().clone(),
                offset,
                length,
            },
        });
        self.state.prev = Some(kind);
        self.emitted += 1;
    }

    /// Switches node; the next token starts after the current byte.
    #[inline]
    pub(crate) fn enter(&mut self, node: DfaNode, pos: usize) {
        self.state.token_start = pos + 1;
        self.goto(node, pos);
    }

    /// Switches node and feeds the current byte again.
    #[inline]
    pub(crate) fn reconsume(&mut self, node: DfaNode, pos: usize) {
        self.state.token_start = pos;
        self.state.head = pos;
        self.goto(node, pos);
    }

    /// Back to Start, feeding the current byte again.
    #[inline]
    pub(crate) fn rewind_to_start(&mut self, pos: usize) {
        self.state.head = pos;
        self.goto(DfaNode::Start, pos);
    }

    #[inline]
    pub(crate) fn goto(&mut self, node: DfaNode, pos: usize) {
        tracing::trace!(from = self.state.node.name(), to = node.name(), pos, "transition");
        self.state.node = node;
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(tok) = self.pending.pop_front() {
                return Some(Ok(tok));
            }
            if let Some(err) = self.failed.take() {
                return Some(Err(err));
            }
            if self.finished {
                return None;
            }
            if let Err(err) = self.advance() {
                self.finished = true;
                self.failed = Some(err);
            }
        }
    }
}

impl FusedIterator for Lexer<'_> {}

/// Lexes a whole source, stopping at the first error.
#[tracing::instrument(level = "debug", skip_all, fields(file = %source.file(), len = source.len()))]
pub fn tokenize(source: &Source) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).collect()
}
