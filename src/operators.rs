//! Longest-match operator recognition.
//!
//! Two tries are built lazily and shared for the life of the process: one
//! over every operator and one without the arithmetic operators. The lexer
//! picks between them by context, see [`OperatorSet::for_context`].

use std::sync::LazyLock;

use smallvec::SmallVec;

use crate::token::TokenKind;

// =============================================================================
// Pattern tables
// =============================================================================

#[rustfmt::skip]
pub const ARITHMETIC_OPERATORS: &[(&str, TokenKind)] = &[
    ("**", TokenKind::Power),
    ("//", TokenKind::IntDiv),
    ("*",  TokenKind::Times),
    ("/",  TokenKind::Divide),
    ("+",  TokenKind::Plus),
    ("-",  TokenKind::Minus),
    ("%",  TokenKind::Mod),
];

#[rustfmt::skip]
pub const NON_ARITHMETIC_OPERATORS: &[(&str, TokenKind)] = &[
    ("...", TokenKind::Ellipsis),
    (":=",  TokenKind::Declare),
    ("+=",  TokenKind::PlusAssign),
    ("-=",  TokenKind::MinusAssign),
    ("*=",  TokenKind::TimesAssign),
    ("/=",  TokenKind::DivideAssign),
    ("%=",  TokenKind::ModAssign),
    ("**=", TokenKind::PowerAssign),
    ("//=", TokenKind::IntDivAssign),
    ("++=", TokenKind::ConcatAssign),
    ("|=",  TokenKind::PipeAssign),
    ("&&=", TokenKind::SeqAndAssign),
    ("||=", TokenKind::SeqOrAssign),
    (">>",  TokenKind::AppendFile),
    ("\\",  TokenKind::Lambda),
    ("->",  TokenKind::Arrow),
    ("&&",  TokenKind::SeqAnd),
    ("||",  TokenKind::SeqOr),
    ("::",  TokenKind::Namespace),
    ("==",  TokenKind::Equals),
    ("!=",  TokenKind::NotEquals),
    (">=",  TokenKind::Gte),
    ("<=",  TokenKind::Lte),
    ("..",  TokenKind::Range),
    ("++",  TokenKind::Concat),
    (":",   TokenKind::Colon),
    ("=",   TokenKind::Assign),
    ("|",   TokenKind::Pipe),
    (",",   TokenKind::Comma),
    ("(",   TokenKind::ParenOpen),
    (")",   TokenKind::ParenClose),
    ("{",   TokenKind::CurlyOpen),
    ("}",   TokenKind::CurlyClose),
    ("<",   TokenKind::AngleOpen),
    (">",   TokenKind::AngleClose),
    ("[",   TokenKind::SquareOpen),
    ("]",   TokenKind::SquareClose),
    (";",   TokenKind::Semicolon),
    ("$",   TokenKind::Curry),
    ("!",   TokenKind::Not),
    ("~",   TokenKind::Async),
];

// =============================================================================
// Trie
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxMunchMatch {
    pub kind: TokenKind,
    pub len: usize,
}

#[derive(Debug, Default)]
struct TrieNode {
    children: SmallVec<[(u8, u32); 4]>,
    terminal: Option<TokenKind>,
}

/// Byte trie answering "longest pattern starting here".
#[derive(Debug)]
pub struct MaxMunchTrie {
    /// Node 0 is the root.
    nodes: Vec<TrieNode>,
    first_bytes: [bool; 256],
}

impl MaxMunchTrie {
    /// Builds a trie from `(spelling, kind)` pairs. A later duplicate
    /// spelling overrides an earlier one.
    pub fn new<'a, I>(patterns: I) -> Self
    where
        I: IntoIterator<Item = &'a (&'static str, TokenKind)>,
    {
        let mut trie = Self {
            nodes: vec![TrieNode::default()],
            first_bytes: [false; 256],
        };
        for &(spelling, kind) in patterns {
            trie.insert(spelling.as_bytes(), kind);
        }
        trie
    }

    fn insert(&mut self, spelling: &[u8], kind: TokenKind) {
        let Some(&first) = spelling.first() else {
            return;
        };
        self.first_bytes[first as usize] = true;

        let mut node = 0u32;
        for &b in spelling {
            node = match self.child(node, b) {
                Some(next) => next,
                None => {
                    let next = self.nodes.len() as u32;
                    self.nodes.push(TrieNode::default());
                    self.nodes[node as usize].children.push((b, next));
                    next
                }
            };
        }
        self.nodes[node as usize].terminal = Some(kind);
    }

    #[inline]
    fn child(&self, node: u32, b: u8) -> Option<u32> {
        self.nodes[node as usize]
            .children
            .iter()
            .find_map(|&(edge, next)| (edge == b).then_some(next))
    }

    /// O(1) pre-check: can any pattern start with `b`?
    #[inline]
    pub fn can_start(&self, b: u8) -> bool {
        self.first_bytes[b as usize]
    }

    /// Longest pattern matching `data` at `start`.
    ///
    /// The walk follows children as far as the input allows and remembers
    /// the deepest terminal passed on the way.
    pub fn longest_match(&self, data: &[u8], start: usize) -> Option<MaxMunchMatch> {
        if !data.get(start).is_some_and(|&b| self.can_start(b)) {
            return None;
        }

        let mut node = 0u32;
        let mut best = None;
        for (i, &b) in data.get(start..)?.iter().enumerate() {
            match self.child(node, b) {
                Some(next) => node = next,
                None => break,
            }
            if let Some(kind) = self.nodes[node as usize].terminal {
                best = Some(MaxMunchMatch { kind, len: i + 1 });
            }
        }
        best
    }
}

static ALL_OPERATORS: LazyLock<MaxMunchTrie> = LazyLock::new(|| {
    MaxMunchTrie::new(NON_ARITHMETIC_OPERATORS.iter().chain(ARITHMETIC_OPERATORS))
});

static NON_ARITHMETIC_ONLY: LazyLock<MaxMunchTrie> =
    LazyLock::new(|| MaxMunchTrie::new(NON_ARITHMETIC_OPERATORS));

// =============================================================================
// Context selection
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorSet {
    AllOperators,
    NonArithmeticOnly,
}

impl OperatorSet {
    /// Directly after a command argument, at top level, arithmetic
    /// spellings belong to the next argument (`ls -la`, `cp a-1 b`).
    #[inline]
    pub fn for_context(in_block: bool, prev: Option<TokenKind>) -> Self {
        if !in_block && prev == Some(TokenKind::ExecArg) {
            OperatorSet::NonArithmeticOnly
        } else {
            OperatorSet::AllOperators
        }
    }

    #[inline]
    pub fn trie(self) -> &'static MaxMunchTrie {
        match self {
            OperatorSet::AllOperators => &ALL_OPERATORS,
            OperatorSet::NonArithmeticOnly => &NON_ARITHMETIC_ONLY,
        }
    }
}

/// True if `b` can start any operator, arithmetic or not.
#[inline]
pub fn is_operator_byte(b: u8) -> bool {
    ALL_OPERATORS.can_start(b)
}
