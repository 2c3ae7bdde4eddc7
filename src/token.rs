use std::fmt;
use std::sync::Arc;

use crate::error::Span;
use crate::source::Source;

// =============================================================================
// Token kinds
// =============================================================================

macro_rules! token_kinds {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Closed set of token kinds produced by the lexer.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum TokenKind {
            $($variant,)*
        }

        impl TokenKind {
            pub const ALL: &'static [TokenKind] = &[$(TokenKind::$variant,)*];
            pub const COUNT: usize = Self::ALL.len();

            /// Upper-snake name used in diagnostics and test dumps.
            pub const fn debug_name(self) -> &'static str {
                match self {
                    $(TokenKind::$variant => $name,)*
                }
            }
        }
    };
}

#[rustfmt::skip]
token_kinds! {
    // literals and words
    Name => "NAME",
    ExecArg => "EXEC_ARG",
    Int => "INT",
    Float => "FLOAT",
    QuotedString => "QUOTED_STRING",
    ImplicitLambdaParam => "IMPLICIT_LAMBDA_PARAM",
    Dot => "DOT",

    // arithmetic
    Power => "POWER",
    IntDiv => "INT_DIV",
    Times => "TIMES",
    Divide => "DIVIDE",
    Plus => "PLUS",
    Minus => "MINUS",
    Mod => "MOD",

    // assignment
    Declare => "DECLARE",
    Assign => "ASSIGN",
    PlusAssign => "PLUS_ASSIGN",
    MinusAssign => "MINUS_ASSIGN",
    TimesAssign => "TIMES_ASSIGN",
    DivideAssign => "DIVIDE_ASSIGN",
    ModAssign => "MOD_ASSIGN",
    PowerAssign => "POWER_ASSIGN",
    IntDivAssign => "INT_DIV_ASSIGN",
    ConcatAssign => "CONCAT_ASSIGN",
    PipeAssign => "PIPE_ASSIGN",
    SeqAndAssign => "SEQ_AND_ASSIGN",
    SeqOrAssign => "SEQ_OR_ASSIGN",

    // comparison
    Equals => "EQUALS",
    NotEquals => "NOT_EQUALS",
    Gte => "GTE",
    Lte => "LTE",

    // structural punctuation
    Ellipsis => "ELLIPSIS",
    AppendFile => "APPEND_FILE",
    Lambda => "LAMBDA",
    Arrow => "ARROW",
    SeqAnd => "SEQ_AND",
    SeqOr => "SEQ_OR",
    Namespace => "NAMESPACE",
    Range => "RANGE",
    Concat => "CONCAT",
    Colon => "COLON",
    Pipe => "PIPE",
    Comma => "COMMA",
    Semicolon => "SEMICOLON",
    Curry => "CURRY",
    Not => "NOT",
    Async => "ASYNC",

    // brackets
    ParenOpen => "PAREN_OPEN",
    ParenClose => "PAREN_CLOSE",
    CurlyOpen => "CURLY_OPEN",
    CurlyClose => "CURLY_CLOSE",
    SquareOpen => "SQUARE_OPEN",
    SquareClose => "SQUARE_CLOSE",
    AngleOpen => "ANGLE_OPEN",
    AngleClose => "ANGLE_CLOSE",

    // keywords
    Assert => "ASSERT",
    Fn => "FN",
    For => "FOR",
    While => "WHILE",
    AlwaysLoop => "ALWAYS_LOOP",
    Continue => "CONTINUE",
    Break => "BREAK",
    True => "TRUE",
    False => "FALSE",
    And => "AND",
    Or => "OR",
    Xor => "XOR",
    Return => "RETURN",
    If => "IF",
    Do => "DO",
    In => "IN",
    Import => "IMPORT",
    Else => "ELSE",
    Elif => "ELIF",
    Try => "TRY",
    Catch => "CATCH",
    As => "AS",
    Var => "VAR",
    Const => "CONST",
    Class => "CLASS",
    With => "WITH",
    By => "BY",
    Say => "SAY",
}

macro_rules! gen_lookup_table {
    ($($variant:ident),* $(,)?) => {{
        let mut table = [false; TokenKind::COUNT];
        $(table[TokenKind::$variant as usize] = true;)*
        table
    }};
}

/// Kinds after which a bare word is always a language name, never a command
/// argument.
#[rustfmt::skip]
const PRECEDES_NAME: [bool; TokenKind::COUNT] = gen_lookup_table!(
    As, Break, Catch, Class, Const, Continue, Fn, For, Var,
    Colon, Dot, Ellipsis, Lambda, Namespace,
    ParenClose, SquareClose,
    Power, IntDiv, Times, Divide, Plus, Minus, Mod,
    Declare, Assign, PlusAssign, MinusAssign, TimesAssign, DivideAssign,
    ModAssign, PowerAssign, IntDivAssign, ConcatAssign, PipeAssign,
    SeqAndAssign, SeqOrAssign,
);

impl TokenKind {
    #[inline]
    pub const fn precedes_name(self) -> bool {
        PRECEDES_NAME[self as usize]
    }

    #[inline]
    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            TokenKind::Power
                | TokenKind::IntDiv
                | TokenKind::Times
                | TokenKind::Divide
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Mod
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.debug_name())
    }
}

// =============================================================================
// Locations
// =============================================================================

/// Source file identifier. The empty id stands for unnamed input (stdin).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(Arc<str>);

impl FileId {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn stdin() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_stdin(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self(Arc::from(""))
    }
}

impl From<&str> for FileId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FileId {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_stdin() {
            f.write_str("<stdin>")
        } else {
            f.write_str(&self.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: FileId,
    pub offset: usize,
    pub length: usize,
}

impl SourceLocation {
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.offset, self.end())
    }
}

// =============================================================================
// Token
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub loc: SourceLocation,
}

impl Token {
    /// The lexeme this token was produced from.
    ///
    /// Returns an empty string if `source` is not the buffer the token came
    /// from and the location does not fit it.
    pub fn text<'src>(&self, source: &'src Source) -> &'src str {
        source.slice(self.loc.offset, self.loc.length).unwrap_or("")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}:{}+{}",
            self.kind, self.loc.file, self.loc.offset, self.loc.length
        )
    }
}
