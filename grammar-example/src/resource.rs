//! The file or resource reference under a cursor.
//!
//! The scanner first runs in reverse from the cursor to find where the
//! reference starts, then forward from there to read the path and an optional
//! `:line` or `:line:column` suffix. Escaped units, such as an escaped space,
//! are part of the path.

use crate::ESCAPE;
use common_framework::{Pos, ScanConfig, Source, Span};
use scanner_framework::combinators::{
    and, digits, escape_any, loop1, opt_loop, or, reverse_mode, rune, rune_fn,
};
use scanner_framework::{Matcher, ScanError, Scanner};
use value_framework::combinators::{opt_value, pair_value, preceded, string_value, try_map_value};
use value_framework::{AstNode, ValueFn};

const PATH_PUNCT: [char; 14] = [
    '/', '_', '-', '~', '.', '%', '@', '&', '+', '=', ',', '#', '!', '^',
];

pub fn is_path_rune(ch: char) -> bool {
    ch.is_alphanumeric() || PATH_PUNCT.contains(&ch)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    /// Path and suffix together.
    pub span: Span,
    /// The path as written.
    pub raw: String,
    /// The path with escapes resolved.
    pub path: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl AstNode for ResourceRef {
    fn span(&self) -> Span {
        self.span
    }
}

/// Escape pair read right to left. The escape found must itself be
/// unescaped, so it needs an even run of escapes before it: in `a\\ b` the
/// space is not escaped.
fn escape_pair_left() -> Matcher {
    let pair = escape_any(ESCAPE);
    Matcher::new(move |sc: &Scanner, pos: Pos| {
        let start = pair.run(sc, pos)?;
        let mut run = 0usize;
        let mut p = start;
        while let Ok((ESCAPE, q)) = sc.read_rune_dir(p, true) {
            run += 1;
            p = q;
        }
        if run % 2 == 0 {
            Ok(start)
        } else {
            Err(ScanError::no_match(pos))
        }
    })
}

/// Steps left over path units, and over `:` and digits so a cursor sitting
/// on a `:line` suffix still reaches the path.
fn expand_left() -> Matcher {
    reverse_mode(
        true,
        opt_loop(or(vec![
            escape_pair_left(),
            rune_fn(|ch| is_path_rune(ch) || ch == ':'),
        ])),
    )
}

fn number() -> ValueFn<u32> {
    try_map_value(string_value(digits()), |text| text.parse::<u32>())
}

type Location = Option<(u32, Option<u32>)>;

fn resource_value() -> ValueFn<(String, Location)> {
    let path = string_value(loop1(or(vec![escape_any(ESCAPE), rune_fn(is_path_rune)])));
    let location = opt_value(preceded(
        rune(':'),
        pair_value(number(), and(vec![]), opt_value(preceded(rune(':'), number()))),
    ));
    pair_value(path, and(vec![]), location)
}

/// Finds the reference around `cursor` in `bytes`, whose first byte sits at
/// position `offset`.
pub fn parse_resource(bytes: &[u8], offset: Pos, cursor: Pos) -> Result<ResourceRef, ScanError> {
    parse_resource_with_config(bytes, offset, cursor, ScanConfig::default())
}

pub fn parse_resource_with_config(
    bytes: &[u8],
    offset: Pos,
    cursor: Pos,
    config: ScanConfig,
) -> Result<ResourceRef, ScanError> {
    let sc = Scanner::with_config(Source::new(bytes, offset), config);
    if cursor < sc.src_min() || cursor > sc.src_max() {
        return Err(ScanError::no_match(cursor));
    }

    let (start, _) = sc.run_match(cursor, &expand_left());
    tracing::trace!(cursor, start, "expanded left");

    // The left expansion may have crossed a `scheme:` or `drive:` prefix, so
    // each position after a `:` is also a candidate start.
    let mut candidates = vec![start];
    candidates.extend(
        sc.bytes(start, cursor)
            .iter()
            .enumerate()
            .filter(|(_, b)| **b == b':')
            .map(|(i, _)| start + i as Pos + 1),
    );

    let grammar = resource_value();
    let mut last_err = ScanError::no_match(cursor);
    for from in candidates {
        match grammar.run(&sc, from) {
            Ok(((raw, location), end)) if cursor <= end => {
                let path = decode_path(&raw);
                tracing::debug!(from, end, %path, "resource found");
                return Ok(ResourceRef {
                    span: Span::between(from, end),
                    raw,
                    path,
                    line: location.map(|(line, _)| line),
                    column: location.and_then(|(_, column)| column),
                });
            }
            Ok(_) => {}
            Err(err) if err.is_recoverable() => last_err = err,
            Err(err) => return Err(err),
        }
    }
    Err(last_err)
}

/// Resolves `\x` escapes and `%XX` percent escapes. Percent escapes are
/// decoded as bytes, so a multi-byte UTF-8 sequence may be spelled out.
pub fn decode_path(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if i + 1 < bytes.len() => {
                out.push(bytes[i + 1]);
                i += 2;
            }
            b'%' => {
                let byte = raw
                    .get(i + 1..i + 3)
                    .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                match byte {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
