// tests/lexer_semis.rs
use egg_lexer::{tokenize, Source, TokenKind};

fn lex_all(input: &str) -> Vec<(TokenKind, String)> {
    let src = Source::new("", input);
    tokenize(&src)
        .unwrap_or_else(|e| panic!("lexing {input:?} failed: {e}"))
        .iter()
        .map(|t| (t.kind, t.text(&src).to_string()))
        .collect()
}

fn kinds(input: &str) -> Vec<TokenKind> {
    lex_all(input).into_iter().map(|(k, _)| k).collect()
}

/// Offsets of zero-length terminators produced by newlines.
fn injected_semis(input: &str) -> Vec<usize> {
    let src = Source::new("", input);
    tokenize(&src)
        .unwrap_or_else(|e| panic!("lexing {input:?} failed: {e}"))
        .into_iter()
        .filter(|t| t.kind == TokenKind::Semicolon && t.loc.length == 0)
        .map(|t| t.loc.offset)
        .collect()
}

#[test]
fn newline_terminates_statement_at_top_level() {
    use TokenKind::*;
    assert_eq!(kinds("a\nb"), vec![ExecArg, Semicolon, ExecArg]);
    assert_eq!(injected_semis("a\nb"), vec![1]);
}

#[test]
fn newline_after_word_is_emitted_once() {
    assert_eq!(injected_semis("foo\n"), vec![3]);
    assert_eq!(injected_semis("foo \n"), vec![4]);
    assert_eq!(injected_semis("@foo\n"), vec![4]);
    assert_eq!(injected_semis("12\n"), vec![2]);
}

#[test]
fn newlines_inside_parens_are_not_terminators() {
    use TokenKind::*;
    assert_eq!(
        kinds("(a\n+\n\n\n\t2)"),
        vec![ParenOpen, Name, Plus, Int, ParenClose]
    );
    assert_eq!(injected_semis("(1,\n2)\n"), vec![6]);
}

#[test]
fn newlines_inside_curly_and_square_still_terminate() {
    use TokenKind::*;
    assert_eq!(
        kinds("{\na\n}"),
        vec![CurlyOpen, Semicolon, Name, Semicolon, CurlyClose]
    );
    assert_eq!(
        kinds("[1\n2]"),
        vec![SquareOpen, Int, Semicolon, Int, SquareClose]
    );
}

#[test]
fn every_blank_line_yields_a_terminator() {
    assert_eq!(injected_semis("a\n\n\nb"), vec![1, 2, 3]);
}

#[test]
fn comments_terminate_statements() {
    assert_eq!(
        lex_all("a # hello \n #world \n b"),
        vec![
            (TokenKind::ExecArg, "a".to_string()),
            (TokenKind::Semicolon, "# hello ".to_string()),
            (TokenKind::Semicolon, "#world ".to_string()),
            (TokenKind::ExecArg, "b".to_string()),
        ]
    );
}

#[test]
fn trailing_comment_without_newline_emits_nothing() {
    assert_eq!(kinds("a # the end"), vec![TokenKind::ExecArg]);
    assert!(kinds("# only a comment").is_empty());
}

#[test]
fn comment_inside_parens_is_silent() {
    use TokenKind::*;
    assert_eq!(
        kinds("(a # note\n + b)"),
        vec![ParenOpen, Name, Plus, Name, ParenClose]
    );
}

#[test]
fn newline_resets_previous_token_context() {
    use TokenKind::*;
    // `b` would be a name right after `fn`; the newline makes it a command again.
    assert_eq!(kinds("fn\nb"), vec![Fn, Semicolon, ExecArg]);
    // after the reset `-` is an operator again, not part of an argument
    assert_eq!(kinds("ls\n-x"), vec![ExecArg, Semicolon, Minus, Name]);
}

#[test]
fn crlf_carriage_return_is_plain_whitespace() {
    use TokenKind::*;
    assert_eq!(kinds("a\r\nb"), vec![ExecArg, Semicolon, ExecArg]);
}
