// tests/lexer_props.rs
use egg_lexer::keywords::keyword;
use egg_lexer::operators::{ARITHMETIC_OPERATORS, NON_ARITHMETIC_OPERATORS};
use egg_lexer::{tokenize, Lexer, Source, TokenKind};
use proptest::prelude::*;

fn kinds(input: &str) -> Vec<TokenKind> {
    let src = Source::new("", input);
    tokenize(&src)
        .unwrap_or_else(|e| panic!("lexing {input:?} failed: {e}"))
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn plain_word() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}".prop_filter("keywords are not plain words", |w| {
        keyword(w.as_bytes()).is_none()
    })
}

fn operator() -> impl Strategy<Value = (&'static str, TokenKind)> {
    let all: Vec<(&'static str, TokenKind)> = NON_ARITHMETIC_OPERATORS
        .iter()
        .chain(ARITHMETIC_OPERATORS)
        .copied()
        .collect();
    proptest::sample::select(all)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn never_panics_and_stays_in_bounds(s in ".*") {
        let src = Source::new("", s.as_str());
        let lx = Lexer::new(&src);

        let mut last_end = 0usize;
        let max_items = s.len() + 2;

        for (steps, item) in lx.enumerate() {
            // Anti-hang guard: every token consumes input, bar one terminator per newline
            prop_assert!(steps < max_items, "too many tokens: {steps} for len={} input={s:?}", s.len());

            let Ok(tok) = item else { break };
            let (start, end) = (tok.loc.offset, tok.loc.end());

            prop_assert!(end <= s.len(), "end out of bounds: ({start},{end}) tok={tok} input={s:?}");
            prop_assert!(start >= last_end, "token moved backwards: {tok} after {last_end} input={s:?}");
            prop_assert!(src.slice(start, tok.loc.length).is_ok(), "not a char boundary: {tok} input={s:?}");
            last_end = end;
        }
    }

    #[test]
    fn shell_like_input_round_trips(s in "[a-z0-9 ().:=|,_\\[\\]{}\n-]{0,40}") {
        let src = Source::new("", s.as_str());
        if let Ok(toks) = tokenize(&src) {
            for tok in &toks {
                let text = tok.text(&src);
                prop_assert_eq!(text.len(), tok.loc.length);
                if tok.kind == TokenKind::Semicolon {
                    prop_assert!(text.is_empty() || text == ";", "terminator text {:?}", text);
                }
            }
        }
    }

    #[test]
    fn top_level_words_are_arguments_and_nested_words_are_names(
        words in prop::collection::vec(plain_word(), 1..6)
    ) {
        let line = words.join(" ");
        prop_assert_eq!(kinds(&line), vec![TokenKind::ExecArg; words.len()]);

        for (open, close, open_kind, close_kind) in [
            ("(", ")", TokenKind::ParenOpen, TokenKind::ParenClose),
            ("[", "]", TokenKind::SquareOpen, TokenKind::SquareClose),
            ("{", "}", TokenKind::CurlyOpen, TokenKind::CurlyClose),
        ] {
            let mut expected = vec![open_kind];
            expected.extend(std::iter::repeat(TokenKind::Name).take(words.len()));
            expected.push(close_kind);
            prop_assert_eq!(kinds(&format!("{open}{line}{close}")), expected);
        }
    }

    #[test]
    fn newline_terminates_only_outside_parens(a in plain_word(), b in plain_word()) {
        use TokenKind::*;
        prop_assert_eq!(kinds(&format!("{a}\n{b}")), vec![ExecArg, Semicolon, ExecArg]);
        prop_assert_eq!(kinds(&format!("({a}\n{b})")), vec![ParenOpen, Name, Name, ParenClose]);
    }

    #[test]
    fn operators_match_longest_spelling((op, kind) in operator(), tail in "[a-z0-9 ]{0,4}") {
        let input = format!("{op}{tail}");
        let got = egg_lexer::operators::OperatorSet::AllOperators
            .trie()
            .longest_match(input.as_bytes(), 0)
            .map(|m| (m.kind, m.len));
        prop_assert_eq!(got, Some((kind, op.len())));
    }

    #[test]
    fn decimals_and_ranges_are_distinct(a in 0u32..100_000, b in 0u32..1000) {
        use TokenKind::*;
        prop_assert_eq!(kinds(&format!("({a}.{b})")), vec![ParenOpen, Float, ParenClose]);
        prop_assert_eq!(kinds(&format!("({a}..{b})")), vec![ParenOpen, Int, Range, Int, ParenClose]);
    }
}
