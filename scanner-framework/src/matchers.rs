//! The match library: rune, sequence, logic and repetition matchers.
//!
//! Every function returns the new position on success. On failure the
//! caller keeps its own position; the error only reports where the failure
//! was detected. The `*_with` forms are the generic cores, taking closures
//! instead of [`Matcher`]s so other layers can reuse them without
//! allocating.

use crate::error::{MatchResult, ScanError};
use crate::scanner::Scanner;
use crate::traits::Matcher;
use common_framework::Pos;

/// Whitespace as understood by [`Scanner::spaces`].
pub fn is_space(ch: char, include_nl: bool) -> bool {
    match ch {
        '\n' => include_nl,
        ' ' | '\t' | '\r' | '\x0b' | '\x0c' => true,
        _ => ch.is_whitespace(),
    }
}

impl Scanner {
    // ------------------------------------------------------------------
    // runes

    /// Matches any single code point.
    pub fn any_rune(&self, pos: Pos) -> MatchResult {
        self.read_rune(pos).map(|(_, p)| p)
    }

    /// Matches one code point accepted by `pred`.
    pub fn rune_fn(&self, pos: Pos, pred: impl Fn(char) -> bool) -> MatchResult {
        let (ch, p) = self.read_rune(pos)?;
        if pred(ch) {
            Ok(p)
        } else {
            Err(ScanError::no_match(pos))
        }
    }

    /// Matches one or more code points accepted by `pred`.
    pub fn rune_fn_loop(&self, pos: Pos, pred: impl Fn(char) -> bool) -> MatchResult {
        self.loop_with(pos, 1, None, |p| self.rune_fn(p, &pred))
    }

    pub fn rune(&self, pos: Pos, ru: char) -> MatchResult {
        self.rune_fn(pos, |ch| ch == ru)
    }

    /// Matches one code point contained in `set`.
    pub fn rune_any(&self, pos: Pos, set: &[char]) -> MatchResult {
        self.rune_fn(pos, |ch| set.contains(&ch))
    }

    /// Matches one code point not contained in `set`.
    pub fn rune_none(&self, pos: Pos, set: &[char]) -> MatchResult {
        self.rune_fn(pos, |ch| !set.contains(&ch))
    }

    /// Matches exactly `n` code points.
    pub fn n_runes(&self, pos: Pos, n: usize) -> MatchResult {
        let mut p = pos;
        for _ in 0..n {
            p = self.any_rune(p)?;
        }
        Ok(p)
    }

    pub fn letter(&self, pos: Pos) -> MatchResult {
        self.rune_fn(pos, char::is_alphabetic)
    }

    /// `[A-Za-z_][A-Za-z0-9_]*`, with unicode letters allowed.
    pub fn identifier(&self, pos: Pos) -> MatchResult {
        let first = |ch: char| ch.is_alphabetic() || ch == '_';
        let rest = |ch: char| ch.is_alphanumeric() || ch == '_';
        if self.is_reverse() {
            // the first unit is only known once the run has been read
            let p = self.rune_fn_loop(pos, rest)?;
            let (ch, _) = self.read_rune_dir(p, false)?;
            if first(ch) {
                Ok(p)
            } else {
                self.identifier_rewind(pos, p, first)
            }
        } else {
            let p = self.rune_fn(pos, first)?;
            self.optional_with(p, |p| self.rune_fn_loop(p, rest))
        }
    }

    // Reverse identifiers must start with a letter: drop leading digits.
    fn identifier_rewind(&self, pos: Pos, mut p: Pos, first: impl Fn(char) -> bool) -> MatchResult {
        while p < pos {
            let (ch, next) = self.read_rune_dir(p, false)?;
            if first(ch) {
                return Ok(p);
            }
            p = next;
        }
        Err(ScanError::no_match(pos))
    }

    // ------------------------------------------------------------------
    // sequences

    /// Matches the exact byte sequence `seq`.
    ///
    /// In reverse mode the sequence must end at `pos`; the match covers the
    /// same bytes in both directions.
    pub fn sequence(&self, pos: Pos, seq: &str) -> MatchResult {
        if pos < self.src_min() || pos > self.src_max() {
            return Err(ScanError::no_match(pos));
        }
        let n = seq.len() as Pos;
        let (start, end) = if self.is_reverse() {
            (pos - n, pos)
        } else {
            (pos, pos + n)
        };
        if start < self.src_min() {
            return Err(ScanError::StartOfFile { at: pos });
        }
        if end > self.src_max() {
            return Err(ScanError::EndOfFile { at: pos });
        }
        if self.bytes(start, end) != seq.as_bytes() {
            return Err(ScanError::no_match(pos));
        }
        Ok(if self.is_reverse() { start } else { end })
    }

    /// Matches an occurrence of `seq` that contains `pos`.
    ///
    /// Useful when a cursor sits in the middle of a keyword. The result is
    /// the far end of the occurrence in the active direction; an occurrence
    /// anchored exactly at `pos` is preferred.
    pub fn sequence_mid(&self, pos: Pos, seq: &str) -> MatchResult {
        let n = seq.len() as Pos;
        for k in 0..=n {
            let (start, end) = if self.is_reverse() {
                (pos + k - n, pos + k)
            } else {
                (pos - k, pos - k + n)
            };
            if start < self.src_min() || end > self.src_max() {
                continue;
            }
            if self.bytes(start, end) == seq.as_bytes() {
                return Ok(if self.is_reverse() { start } else { end });
            }
        }
        Err(ScanError::no_match(pos))
    }

    // ------------------------------------------------------------------
    // whitespace and lines

    /// Matches one or more whitespace units.
    pub fn spaces(&self, pos: Pos, include_nl: bool) -> MatchResult {
        self.rune_fn_loop(pos, |ch| is_space(ch, include_nl))
    }

    /// Consumes everything up to the next newline or the edge of the input.
    ///
    /// Always succeeds. With `include_nl` the newline itself is consumed; an
    /// escaped newline does not end the line.
    pub fn to_nl_or_end(&self, pos: Pos, include_nl: bool, escape: Option<char>) -> MatchResult {
        let mut p = pos;
        loop {
            if let Some(esc) = escape {
                if let Ok(q) = self.escape_any(p, esc) {
                    p = q;
                    continue;
                }
            }
            match self.read_rune(p) {
                Ok(('\n', q)) => return Ok(if include_nl { q } else { p }),
                Ok((_, q)) => p = q,
                Err(err) if err.is_boundary() => return Ok(p),
                Err(err) => return Err(err),
            }
        }
    }

    /// Succeeds, zero-width, at the edge of the input in the active direction.
    pub fn eof(&self, pos: Pos) -> MatchResult {
        let at_edge = if self.is_reverse() {
            pos <= self.src_min()
        } else {
            pos >= self.src_max()
        };
        if at_edge {
            Ok(pos)
        } else {
            Err(ScanError::no_match(pos))
        }
    }

    // ------------------------------------------------------------------
    // logic

    /// Runs `n` steps in list order, or back-to-front when `reverse_order`.
    pub fn and_with(
        &self,
        pos: Pos,
        n: usize,
        reverse_order: bool,
        mut step: impl FnMut(usize, Pos) -> MatchResult,
    ) -> MatchResult {
        let mut p = pos;
        for k in 0..n {
            let i = if reverse_order { n - 1 - k } else { k };
            p = step(i, p)?;
        }
        Ok(p)
    }

    /// Runs every matcher in the given order, regardless of direction.
    pub fn and(&self, pos: Pos, fns: &[Matcher]) -> MatchResult {
        self.and_with(pos, fns.len(), false, |i, p| fns[i].run(self, p))
    }

    /// Runs the matchers in written order forward and back-to-front in
    /// reverse, so a grammar written left-to-right parses in both directions.
    pub fn and_r(&self, pos: Pos, fns: &[Matcher]) -> MatchResult {
        self.and_with(pos, fns.len(), self.is_reverse(), |i, p| fns[i].run(self, p))
    }

    /// Tries `n` alternatives in order and returns the first match.
    ///
    /// When all fail, the failure that progressed furthest in the active
    /// direction is returned (ties keep the earlier one). A non-recoverable
    /// failure stops the search immediately.
    pub fn or_with(&self, pos: Pos, n: usize, mut alt: impl FnMut(usize, Pos) -> MatchResult) -> MatchResult {
        let mut best: Option<ScanError> = None;
        for i in 0..n {
            match alt(i, pos) {
                Ok(p) => return Ok(p),
                Err(err) if !err.is_recoverable() => return Err(err),
                Err(err) => {
                    let replace = match (&best, err.at()) {
                        (None, _) => true,
                        (Some(prev), Some(at)) => prev.at().map_or(true, |b| self.further(at, b)),
                        (Some(_), None) => false,
                    };
                    if replace {
                        best = Some(err);
                    }
                }
            }
        }
        Err(best.unwrap_or(ScanError::no_match(pos)))
    }

    pub fn or(&self, pos: Pos, fns: &[Matcher]) -> MatchResult {
        self.or_with(pos, fns.len(), |i, p| fns[i].run(self, p))
    }

    /// Turns a recoverable failure into a zero-width match.
    pub fn optional_with(&self, pos: Pos, f: impl FnOnce(Pos) -> MatchResult) -> MatchResult {
        match f(pos) {
            Ok(p) => Ok(p),
            Err(err) if err.is_recoverable() => Ok(pos),
            Err(err) => Err(err),
        }
    }

    pub fn optional(&self, pos: Pos, m: &Matcher) -> MatchResult {
        self.optional_with(pos, |p| m.run(self, p))
    }

    // ------------------------------------------------------------------
    // repetition

    /// Repeats `f` until it fails; succeeds if it matched at least `min`
    /// times. `max` of `None` means unbounded.
    ///
    /// A zero-width repetition counts once and ends the loop.
    pub fn loop_with(
        &self,
        pos: Pos,
        min: usize,
        max: Option<usize>,
        mut f: impl FnMut(Pos) -> MatchResult,
    ) -> MatchResult {
        let mut p = pos;
        let mut count = 0;
        let mut last_err = None;
        while max.map_or(true, |max| count < max) {
            match f(p) {
                Ok(next) => {
                    count += 1;
                    if next == p {
                        break;
                    }
                    p = next;
                }
                Err(err) if err.is_recoverable() => {
                    last_err = Some(err);
                    break;
                }
                Err(err) => return Err(err),
            }
        }
        if count < min {
            return Err(last_err.unwrap_or(ScanError::no_match(p)));
        }
        Ok(p)
    }

    pub fn limited_loop(&self, pos: Pos, min: usize, max: Option<usize>, m: &Matcher) -> MatchResult {
        self.loop_with(pos, min, max, |p| m.run(self, p))
    }

    /// One or more.
    pub fn loop1(&self, pos: Pos, m: &Matcher) -> MatchResult {
        self.limited_loop(pos, 1, None, m)
    }

    /// Zero or more.
    pub fn opt_loop(&self, pos: Pos, m: &Matcher) -> MatchResult {
        self.limited_loop(pos, 0, None, m)
    }

    /// Parses `item (sep item)*`, optionally followed by one trailing `sep`.
    ///
    /// In reverse mode the trailing separator is met first, and each further
    /// separator precedes its item in traversal order; the logical sequence
    /// is the same as forward. `item` is only ever called where its success
    /// is kept, so it may record values as a side effect.
    pub fn loop_sep_with(
        &self,
        pos: Pos,
        can_have_last: bool,
        mut item: impl FnMut(Pos) -> MatchResult,
        sep: impl Fn(Pos) -> MatchResult,
    ) -> MatchResult {
        let reverse = self.is_reverse();
        let mut p = pos;
        if reverse && can_have_last {
            p = self.optional_with(p, &sep)?;
        }
        p = item(p)?;
        loop {
            let after_sep = match sep(p) {
                Ok(q) => q,
                Err(err) if err.is_recoverable() => break,
                Err(err) => return Err(err),
            };
            match item(after_sep) {
                Ok(q) => {
                    if q == p {
                        break;
                    }
                    p = q;
                }
                Err(err) if err.is_recoverable() => {
                    if !reverse && can_have_last {
                        p = after_sep;
                    }
                    break;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(p)
    }

    pub fn loop_sep(&self, pos: Pos, m: &Matcher, sep: &Matcher) -> MatchResult {
        self.loop_sep_with(pos, false, |p| m.run(self, p), |p| sep.run(self, p))
    }

    pub fn loop_sep_can_have_last(&self, pos: Pos, m: &Matcher, sep: &Matcher) -> MatchResult {
        self.loop_sep_with(pos, true, |p| m.run(self, p), |p| sep.run(self, p))
    }

    // ------------------------------------------------------------------
    // control

    /// Zero-width lookahead: succeeds at `pos` when `f` would match.
    pub fn peek_with(&self, pos: Pos, f: impl FnOnce(Pos) -> MatchResult) -> MatchResult {
        f(pos).map(|_| pos)
    }

    pub fn peek(&self, pos: Pos, m: &Matcher) -> MatchResult {
        self.peek_with(pos, |p| m.run(self, p))
    }

    /// Zero-width negative lookahead: succeeds at `pos` when `m` fails
    /// recoverably.
    pub fn not(&self, pos: Pos, m: &Matcher) -> MatchResult {
        match m.run(self, pos) {
            Ok(_) => Err(ScanError::no_match(pos)),
            Err(err) if err.is_recoverable() => Ok(pos),
            Err(err) => Err(err),
        }
    }

    /// Runs `m` with a forced direction.
    pub fn reverse_mode(&self, pos: Pos, reverse: bool, m: &Matcher) -> MatchResult {
        self.with_direction(reverse, |sc| m.run(sc, pos))
    }

    /// Commits: any recoverable failure of `m` becomes [`ScanError::Fatal`].
    pub fn must(&self, pos: Pos, m: &Matcher, message: &str) -> MatchResult {
        m.run(self, pos).map_err(|err| err.into_fatal(message))
    }

    /// Runs `m` one nesting level deeper; see [`Scanner::nest_with`].
    pub fn nested(&self, pos: Pos, m: &Matcher) -> MatchResult {
        self.nest_with(pos, || m.run(self, pos))
    }

    pub fn fail(&self, pos: Pos) -> MatchResult {
        Err(ScanError::no_match(pos))
    }

    pub fn fatal(&self, pos: Pos, message: &str) -> MatchResult {
        Err(ScanError::fatal(pos, message))
    }

    /// Runs `m` and logs its outcome at trace level.
    pub fn debug(&self, pos: Pos, name: &str, m: &Matcher) -> MatchResult {
        let result = m.run(self, pos);
        tracing::trace!(
            matcher = name,
            pos,
            reverse = self.is_reverse(),
            result = ?result,
            "match"
        );
        result
    }
}
