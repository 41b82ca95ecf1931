//! Curried matchers.
//!
//! Every match-library function `Scanner::f(pos, a, b, ..)` has a
//! counterpart `f(a, b, ..) -> Matcher` here, so grammars can be composed as
//! plain values:
//!
//! ```
//! use scanner_framework::combinators::*;
//! use scanner_framework::Scanner;
//!
//! let m = and(vec![rune('a'), optional(rune('b'))]);
//! let sc = Scanner::from_text("ab");
//! assert_eq!(m.run(&sc, 0), Ok(2));
//! ```
//!
//! The wrappers are generated from the method signatures by `curried!`, so
//! the two layers cannot drift apart. Functions taking closures or
//! string-like arguments are written out by hand below.

use crate::scanner::Scanner;
use crate::section::SectionOpts;
use crate::traits::Matcher;
use common_framework::Pos;

macro_rules! curried {
    ($(
        $(#[$meta:meta])*
        $name:ident ( $($arg:ident : $ty:ty),* ) => $method:ident ( $($pass:expr),* );
    )*) => {
        $(
            $(#[$meta])*
            pub fn $name($($arg: $ty),*) -> Matcher {
                Matcher::new(move |sc: &Scanner, pos: Pos| sc.$method(pos, $($pass),*))
            }
        )*
    };
}

curried! {
    any_rune() => any_rune();
    rune(ru: char) => rune(ru);
    rune_any(set: Vec<char>) => rune_any(&set);
    rune_none(set: Vec<char>) => rune_none(&set);
    n_runes(n: usize) => n_runes(n);
    letter() => letter();
    identifier() => identifier();
    digit() => digit();
    digits() => digits();
    integer() => integer();
    exponent() => exponent();
    float() => float();

    spaces(include_nl: bool) => spaces(include_nl);
    to_nl_or_end(include_nl: bool, escape: Option<char>) => to_nl_or_end(include_nl, escape);
    eof() => eof();

    /// Runs every matcher in the given order, regardless of direction.
    and(fns: Vec<Matcher>) => and(&fns);
    /// Runs the matchers back-to-front in reverse mode.
    and_r(fns: Vec<Matcher>) => and_r(&fns);
    or(fns: Vec<Matcher>) => or(&fns);
    optional(m: Matcher) => optional(&m);

    limited_loop(min: usize, max: Option<usize>, m: Matcher) => limited_loop(min, max, &m);
    loop1(m: Matcher) => loop1(&m);
    opt_loop(m: Matcher) => opt_loop(&m);
    loop_sep(m: Matcher, sep: Matcher) => loop_sep(&m, &sep);
    loop_sep_can_have_last(m: Matcher, sep: Matcher) => loop_sep_can_have_last(&m, &sep);

    peek(m: Matcher) => peek(&m);
    not(m: Matcher) => not(&m);
    reverse_mode(reverse: bool, m: Matcher) => reverse_mode(reverse, &m);
    /// Bounds recursion depth by [`ScanConfig::max_depth`](common_framework::ScanConfig).
    nested(m: Matcher) => nested(&m);
    fail() => fail();

    section(open: Matcher, close: Matcher, opts: SectionOpts, inner: Option<Matcher>)
        => section(&open, &close, &opts, inner.as_ref());
    quoted_string() => quoted_string();
    quoted_string2(escape: char, max_len: usize, rune_max_len: usize)
        => quoted_string2(escape, max_len, rune_max_len);
    escape_any(escape: char) => escape_any(escape);
}

pub fn rune_fn<F>(pred: F) -> Matcher
where
    F: Fn(char) -> bool + Send + Sync + 'static,
{
    Matcher::new(move |sc: &Scanner, pos: Pos| sc.rune_fn(pos, &pred))
}

pub fn rune_fn_loop<F>(pred: F) -> Matcher
where
    F: Fn(char) -> bool + Send + Sync + 'static,
{
    Matcher::new(move |sc: &Scanner, pos: Pos| sc.rune_fn_loop(pos, &pred))
}

pub fn sequence<S: Into<String>>(seq: S) -> Matcher {
    let seq = seq.into();
    Matcher::new(move |sc: &Scanner, pos: Pos| sc.sequence(pos, &seq))
}

pub fn sequence_mid<S: Into<String>>(seq: S) -> Matcher {
    let seq = seq.into();
    Matcher::new(move |sc: &Scanner, pos: Pos| sc.sequence_mid(pos, &seq))
}

pub fn string_section<S: Into<String>>(delim: S, opts: SectionOpts) -> Matcher {
    let delim = delim.into();
    Matcher::new(move |sc: &Scanner, pos: Pos| sc.string_section(pos, &delim, &opts))
}

/// Anchored regex, cached, using the scanner's configured window.
pub fn regexp<S: Into<String>>(pattern: S) -> Matcher {
    let pattern = pattern.into();
    Matcher::new(move |sc: &Scanner, pos: Pos| {
        sc.regexp_from_start(pos, &pattern, true, sc.config().regex_max_len)
    })
}

pub fn regexp_from_start<S: Into<String>>(pattern: S, cacheable: bool, max_len: usize) -> Matcher {
    let pattern = pattern.into();
    Matcher::new(move |sc: &Scanner, pos: Pos| {
        sc.regexp_from_start(pos, &pattern, cacheable, max_len)
    })
}

/// Commits past this point: recoverable failures of `m` become fatal.
pub fn must<S: Into<String>>(m: Matcher, message: S) -> Matcher {
    let message = message.into();
    Matcher::new(move |sc: &Scanner, pos: Pos| sc.must(pos, &m, &message))
}

pub fn fatal<S: Into<String>>(message: S) -> Matcher {
    let message = message.into();
    Matcher::new(move |sc: &Scanner, pos: Pos| sc.fatal(pos, &message))
}

pub fn debug<S: Into<String>>(name: S, m: Matcher) -> Matcher {
    let name = name.into();
    Matcher::new(move |sc: &Scanner, pos: Pos| sc.debug(pos, &name, &m))
}

/// See [`Matcher::recursive`].
pub fn recursive<F>(build: F) -> Matcher
where
    F: FnOnce(Matcher) -> Matcher,
{
    Matcher::recursive(build)
}
