//! Bracketed content: sections, quoted strings and escapes.

use crate::error::{MatchResult, ScanError};
use crate::scanner::Scanner;
use crate::traits::Matcher;
use common_framework::Pos;

/// Guards applied while scanning the inside of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionOpts {
    /// An escape unit followed by any unit is consumed as a pair, so an
    /// escaped closing token does not close the section.
    pub escape: Option<char>,
    /// Rejects a section spanning a line boundary.
    pub fail_on_newline: bool,
    /// Upper bound, in bytes, on the distance covered before the close.
    pub max_len: Option<usize>,
    /// Reaching the edge of the input closes the section instead of failing.
    pub eof_closes: bool,
}

impl SectionOpts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn escape(mut self, escape: char) -> Self {
        self.escape = Some(escape);
        self
    }

    pub fn fail_on_newline(mut self, fail: bool) -> Self {
        self.fail_on_newline = fail;
        self
    }

    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn eof_closes(mut self, closes: bool) -> Self {
        self.eof_closes = closes;
        self
    }
}

impl Scanner {
    /// Generic section core.
    ///
    /// Matches `open`, then repeatedly an escape pair, the `close` token, or
    /// one step of `inner` (a single code point when `inner` is `None`),
    /// until `close` matches. In reverse mode the roles of `open` and `close`
    /// are swapped so the same section is recognized from its right end.
    pub fn section_with(
        &self,
        pos: Pos,
        open: impl Fn(Pos) -> MatchResult,
        close: impl Fn(Pos) -> MatchResult,
        opts: &SectionOpts,
        inner: Option<&dyn Fn(Pos) -> MatchResult>,
    ) -> MatchResult {
        let (first, last): (&dyn Fn(Pos) -> MatchResult, &dyn Fn(Pos) -> MatchResult) =
            if self.is_reverse() {
                (&close, &open)
            } else {
                (&open, &close)
            };

        let mut p = first(pos)?;
        loop {
            if let Some(max_len) = opts.max_len {
                if Scanner::distance(pos, p) > max_len {
                    return Err(ScanError::no_match(p));
                }
            }

            if let Some(esc) = opts.escape {
                match self.escape_any(p, esc) {
                    Ok(q) => {
                        p = q;
                        continue;
                    }
                    Err(err) if !err.is_recoverable() => return Err(err),
                    Err(_) => {}
                }
            }

            match last(p) {
                Ok(q) => return Ok(q),
                Err(err) if !err.is_recoverable() => return Err(err),
                Err(_) => {}
            }

            let (ch, next) = match self.read_rune(p) {
                Ok(read) => read,
                Err(err) if err.is_boundary() && opts.eof_closes => return Ok(p),
                Err(err) => return Err(err),
            };
            if opts.fail_on_newline && ch == '\n' {
                return Err(ScanError::no_match(p));
            }

            p = match inner {
                Some(step) => {
                    let q = step(p)?;
                    if q == p {
                        return Err(ScanError::no_match(p));
                    }
                    q
                }
                None => next,
            };
        }
    }

    /// Matcher form of [`Scanner::section_with`].
    pub fn section(
        &self,
        pos: Pos,
        open: &Matcher,
        close: &Matcher,
        opts: &SectionOpts,
        inner: Option<&Matcher>,
    ) -> MatchResult {
        let step = inner.map(|m| move |p: Pos| m.run(self, p));
        self.section_with(
            pos,
            |p| open.run(self, p),
            |p| close.run(self, p),
            opts,
            step.as_ref().map(|f| f as &dyn Fn(Pos) -> MatchResult),
        )
    }

    /// A section opened and closed by the same sequence.
    pub fn string_section(&self, pos: Pos, delim: &str, opts: &SectionOpts) -> MatchResult {
        self.section_with(
            pos,
            |p| self.sequence(p, delim),
            |p| self.sequence(p, delim),
            opts,
            None,
        )
    }

    /// Double-, back- and single-quoted strings.
    ///
    /// Double and single quotes may not span lines; back quotes may. Single
    /// quotes use the smaller bound, being meant for rune literals.
    pub fn quoted_string2(&self, pos: Pos, escape: char, max_len: usize, rune_max_len: usize) -> MatchResult {
        let double = SectionOpts::new()
            .escape(escape)
            .fail_on_newline(true)
            .max_len(max_len);
        let back = SectionOpts::new().escape(escape).max_len(max_len);
        let single = SectionOpts::new()
            .escape(escape)
            .fail_on_newline(true)
            .max_len(rune_max_len);
        self.or_with(pos, 3, |i, p| match i {
            0 => self.string_section(p, "\"", &double),
            1 => self.string_section(p, "`", &back),
            _ => self.string_section(p, "'", &single),
        })
    }

    /// [`Scanner::quoted_string2`] with the scanner's configured limits.
    pub fn quoted_string(&self, pos: Pos) -> MatchResult {
        let config = self.config();
        self.quoted_string2(
            pos,
            config.escape,
            config.quoted_max_len,
            config.quoted_rune_max_len,
        )
    }

    /// Matches an escape unit together with the unit it escapes.
    ///
    /// Forward, the escape is read first. In reverse the escaped unit is read
    /// first and must be preceded by the escape. A lone escape at either edge
    /// of the input never matches.
    pub fn escape_any(&self, pos: Pos, escape: char) -> MatchResult {
        if self.is_reverse() {
            let (_, p) = self.read_rune(pos)?;
            let (ch, q) = self.read_rune(p)?;
            if ch == escape {
                Ok(q)
            } else {
                Err(ScanError::no_match(p))
            }
        } else {
            let p = self.rune(pos, escape)?;
            self.any_rune(p)
        }
    }
}
