// src/bin/hot_lexer.rs
use egg_lexer::{Lexer, Source, TokenKind};
use std::hint::black_box as bb;
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SMALL: &str = r#"
say "hello world"
ls -la | grep egg
"#;

const MEDIUM: &str = r#"
import "utils"

fn area(w, h): float {
    ret w * h
}

class Rect {
    w: float = 1.0
    h: float = 2.5
    fn scale(f) { @self.w *= f; @self.h *= f }
}

for x in (0..10) {
    say x
}
"#;

const LARGE: &str = r#"
import "lib/files"
import "lib/strings"

# Collect log files, newest first.
const root := "/var/log"

fn newest(dir, n := 10) {
    files := utils::list_files(dir) | _.sort | ...mtime
    ret files[: n]
}

fn summarize(path) {
    try {
        lines := `wc -l "$path"` | _.split(" ")
        ret {path: lines[0], size: 4.5}
    } catch e {
        say "failed" path
        ret {}
    }
}

class Report: Base {
    title: str = "daily"
    rows: [int] = [1, 2, 3]

    fn render() {
        with open(@self.title) as f {
            for row in @self.rows {
                f.write(row ** 2 // 3 + -1)
            }
        }
    }
}

cd /tmp
make -j8 && make install >> build.log
`tar czf out.tgz "a b" c` | gzip
while true { loop { break } }
[10**x for x in (0..10)]
{-x: 100**-x for x in (0..10)}
"#;

// ----------------- arg parsing -----------------

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    let mut it = args.iter();
    while let Some(a) = it.next() {
        if a == key {
            return it.next().map(|s| s.as_str());
        }
    }
    None
}

fn arg_usize(args: &[String], key: &str, default: usize) -> usize {
    arg_value(args, key)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn arg_f64(args: &[String], key: &str, default: f64) -> f64 {
    arg_value(args, key)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn arg_str<'a>(args: &'a [String], key: &str, default: &'a str) -> &'a str {
    arg_value(args, key).unwrap_or(default)
}

// ----------------- hot loop -----------------

#[inline(never)]
fn lex_once(src: &Source) -> u64 {
    let mut checksum: u64 = 0;
    let mut n: u64 = 0;

    for item in Lexer::new(bb(src)) {
        let Ok(tok) = item else {
            checksum ^= 0xDEAD;
            break;
        };
        n = n.wrapping_add(1);
        checksum ^= (tok.loc.offset as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        checksum ^= (tok.loc.length as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);

        // Touch word bytes so slicing can't be optimized away.
        match tok.kind {
            TokenKind::Name | TokenKind::ExecArg | TokenKind::QuotedString => {
                if let Some(b0) = src.byte_at(tok.loc.offset) {
                    checksum ^= (b0 as u64) << 32;
                }
            }
            kind => checksum ^= kind as u64,
        }
    }

    checksum ^ (n.wrapping_mul(0xD6E8_FEB8_6659_FD93))
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();

    let seconds = arg_f64(&args, "--seconds", 3.0);
    let repeat = arg_usize(&args, "--repeat", 64);
    let corpus = arg_str(&args, "--corpus", "large");

    let base = match corpus {
        "small" => SMALL,
        "medium" => MEDIUM,
        _ => LARGE,
    };

    // Build a bigger input *outside* the measured hot loop.
    let mut input = String::with_capacity(base.len() * repeat);
    for _ in 0..repeat {
        input.push_str(base);
        input.push('\n');
    }
    let src = Source::new(format!("<{corpus}x{repeat}>"), input);

    let dur = Duration::from_secs_f64(seconds);
    let start = Instant::now();

    let mut iters: u64 = 0;
    let mut acc: u64 = 0;

    while start.elapsed() < dur {
        acc ^= lex_once(&src);
        iters += 1;
    }

    tracing::info!(iters, checksum = acc, bytes = src.len(), "hot_lexer done");
    eprintln!(
        "hot_lexer done: iters={iters}, checksum={acc}, bytes={}",
        src.len()
    );
    bb(acc);
}
