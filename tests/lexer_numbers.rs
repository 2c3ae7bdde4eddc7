// tests/lexer_numbers.rs
use egg_lexer::error::UnitClass;
use egg_lexer::{tokenize, LexErrorKind, Source, TokenKind};

fn lex_all(input: &str) -> Vec<(TokenKind, String)> {
    let src = Source::new("", input);
    tokenize(&src)
        .unwrap_or_else(|e| panic!("lexing {input:?} failed: {e}"))
        .iter()
        .map(|t| (t.kind, t.text(&src).to_string()))
        .collect()
}

fn lex_err(input: &str) -> LexErrorKind {
    let src = Source::new("", input);
    match tokenize(&src) {
        Ok(toks) => panic!("lexing {input:?} should fail, got {toks:?}"),
        Err(e) => e.kind,
    }
}

fn one(kind: TokenKind, text: &str) -> (TokenKind, String) {
    (kind, text.to_string())
}

#[test]
fn integers_and_floats() {
    use TokenKind::*;
    assert_eq!(lex_all("42"), vec![one(Int, "42")]);
    assert_eq!(lex_all("1.5"), vec![one(Float, "1.5")]);
    assert_eq!(lex_all("1."), vec![one(Float, "1.")]);
    assert_eq!(
        lex_all("x := 3.25"),
        vec![one(Name, "x"), one(Declare, ":="), one(Float, "3.25")]
    );
}

#[test]
fn range_after_digits_is_not_a_decimal_point() {
    use TokenKind::*;
    assert_eq!(
        lex_all("1..10"),
        vec![one(Int, "1"), one(Range, ".."), one(Int, "10")]
    );
    assert_eq!(
        lex_all("(1.5..3)"),
        vec![
            one(ParenOpen, "("),
            one(Float, "1.5"),
            one(Range, ".."),
            one(Int, "3"),
            one(ParenClose, ")"),
        ]
    );
    assert_eq!(
        lex_all("[0...]"),
        vec![
            one(SquareOpen, "["),
            one(Int, "0"),
            one(Ellipsis, "..."),
            one(SquareClose, "]"),
        ]
    );
}

#[test]
fn leading_minus_prefers_the_operator() {
    use TokenKind::*;
    assert_eq!(lex_all("-5"), vec![one(Minus, "-"), one(Int, "5")]);
    assert_eq!(
        lex_all("(1 % -9)"),
        vec![
            one(ParenOpen, "("),
            one(Int, "1"),
            one(Mod, "%"),
            one(Minus, "-"),
            one(Int, "9"),
            one(ParenClose, ")"),
        ]
    );
}

#[test]
fn numbers_in_command_position_are_arguments() {
    use TokenKind::*;
    assert_eq!(
        lex_all("sleep 42"),
        vec![one(ExecArg, "sleep"), one(ExecArg, "42")]
    );
    assert_eq!(
        lex_all("head -5 f"),
        vec![one(ExecArg, "head"), one(ExecArg, "-5"), one(ExecArg, "f")]
    );
    assert_eq!(
        lex_all("seq 0.5"),
        vec![one(ExecArg, "seq"), one(ExecArg, "0.5")]
    );
    // no unit check for arguments: the suffix becomes its own argument
    assert_eq!(
        lex_all("dd 5kb"),
        vec![one(ExecArg, "dd"), one(ExecArg, "5"), one(ExecArg, "kb")]
    );
}

#[test]
fn duplicate_decimal_point_fails() {
    assert_eq!(lex_err("1.2.3"), LexErrorKind::DuplicateDecimalPoint);
    assert_eq!(lex_err("ping 10.0.0.1"), LexErrorKind::DuplicateDecimalPoint);
}

#[test]
fn known_unit_suffixes_are_unsupported() {
    assert_eq!(
        lex_err("5kb"),
        LexErrorKind::UnsupportedUnit {
            unit: "kb".to_string(),
            class: UnitClass::Size,
        }
    );
    assert_eq!(
        lex_err("x := 3ms"),
        LexErrorKind::UnsupportedUnit {
            unit: "ms".to_string(),
            class: UnitClass::Time,
        }
    );
    assert_eq!(
        lex_err("(2GiB)"),
        LexErrorKind::UnsupportedUnit {
            unit: "GiB".to_string(),
            class: UnitClass::Size,
        }
    );
}

#[test]
fn unknown_suffix_is_rejected() {
    assert_eq!(lex_err("7q"), LexErrorKind::UnknownUnit("q".to_string()));
    assert_eq!(lex_err("(1.5x)"), LexErrorKind::UnknownUnit("x".to_string()));
}
