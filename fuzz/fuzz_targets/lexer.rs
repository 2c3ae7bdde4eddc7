// fuzz_targets/lexer.rs
#![no_main]

use egg_lexer::{Lexer, Source};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Lossy decoding keeps invalid UTF-8 inputs useful.
    let text = String::from_utf8_lossy(data);
    let src = Source::new("fuzz.egg", text.as_ref());

    let mut last_end = 0usize;
    let mut steps = 0usize;
    let max_steps = src.len() + 2;

    for item in Lexer::new(&src) {
        steps += 1;
        assert!(steps <= max_steps);

        let Ok(tok) = item else { break };
        assert!(tok.loc.end() <= src.len());
        assert!(tok.loc.offset >= last_end);
        assert!(src.slice(tok.loc.offset, tok.loc.length).is_ok());
        last_end = tok.loc.end();
    }
});
