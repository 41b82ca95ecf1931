use crate::cache::RegexCache;
use crate::cursor::{decode_after, decode_before};
use crate::error::{Outcome, ScanError};
use crate::traits::Matcher;
use common_framework::{Pos, ScanConfig, Source, Span};
use std::cell::Cell;

/// Owns a [`Source`] and the traversal direction.
///
/// Reads never depend on hidden cursor state: every primitive takes the
/// position to read from and returns the position after the read. The only
/// mutable state is the direction flag and the regex cache, both
/// unsynchronized, so a scanner must not be shared between threads while a
/// parse is running. Scanners may be reused sequentially.
#[derive(Debug)]
pub struct Scanner {
    source: Source,
    reverse: Cell<bool>,
    config: ScanConfig,
    cache: RegexCache,
    depth: Cell<usize>,
}

impl Scanner {
    /// Creates a forward scanner whose first byte sits at position `offset`.
    pub fn new<B: Into<std::sync::Arc<[u8]>>>(bytes: B, offset: Pos) -> Self {
        Self::with_config(Source::new(bytes, offset), ScanConfig::default())
    }

    /// Creates a forward scanner over `text` starting at position zero.
    pub fn from_text(text: &str) -> Self {
        Self::with_config(Source::from_text(text), ScanConfig::default())
    }

    /// Creates a forward scanner with explicit limits.
    pub fn with_config(source: Source, config: ScanConfig) -> Self {
        let cache = RegexCache::new(config.regex_cache_capacity);
        Self {
            source,
            reverse: Cell::new(false),
            config,
            cache,
            depth: Cell::new(0),
        }
    }

    /// Replaces the source, keeping the config and the regex cache.
    pub fn set_source(&mut self, source: Source) {
        self.source = source;
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn cache(&self) -> &RegexCache {
        &self.cache
    }

    /// Sets the traversal direction for subsequent reads.
    pub fn set_reverse(&self, reverse: bool) {
        self.reverse.set(reverse);
    }

    pub fn is_reverse(&self) -> bool {
        self.reverse.get()
    }

    /// Smallest valid position.
    pub fn src_min(&self) -> Pos {
        self.source.min()
    }

    /// Largest valid position.
    pub fn src_max(&self) -> Pos {
        self.source.max()
    }

    /// Reads one code point in the active direction.
    ///
    /// Forward, the code point starting at `pos` is decoded; in reverse, the
    /// one ending at `pos`. The returned position is past the code point in
    /// the direction of travel.
    pub fn read_rune(&self, pos: Pos) -> Result<(char, Pos), ScanError> {
        self.read_rune_dir(pos, self.is_reverse())
    }

    /// Reads one code point in an explicit direction.
    ///
    /// Reading away from an edge of the source is `StartOfFile` or
    /// `EndOfFile`. A position outside the source is `NoMatch`.
    pub fn read_rune_dir(&self, pos: Pos, reverse: bool) -> Result<(char, Pos), ScanError> {
        let bytes = self.source.as_bytes();
        if reverse {
            if pos <= self.src_min() {
                return Err(ScanError::StartOfFile { at: pos });
            }
            let index = self
                .source
                .index(pos)
                .ok_or(ScanError::NoMatch { at: pos })?;
            let (ch, width) =
                decode_before(bytes, index).ok_or(ScanError::StartOfFile { at: pos })?;
            Ok((ch, pos - width as Pos))
        } else {
            if pos >= self.src_max() {
                return Err(ScanError::EndOfFile { at: pos });
            }
            let index = self
                .source
                .index(pos)
                .ok_or(ScanError::NoMatch { at: pos })?;
            let (ch, width) =
                decode_after(bytes, index).ok_or(ScanError::EndOfFile { at: pos })?;
            Ok((ch, pos + width as Pos))
        }
    }

    /// Reads one byte in the active direction.
    pub fn read_byte(&self, pos: Pos) -> Result<(u8, Pos), ScanError> {
        if self.is_reverse() {
            if pos <= self.src_min() {
                return Err(ScanError::StartOfFile { at: pos });
            }
            let byte = self
                .source
                .byte_at(pos - 1)
                .ok_or(ScanError::NoMatch { at: pos })?;
            Ok((byte, pos - 1))
        } else {
            if pos >= self.src_max() {
                return Err(ScanError::EndOfFile { at: pos });
            }
            let byte = self
                .source
                .byte_at(pos)
                .ok_or(ScanError::NoMatch { at: pos })?;
            Ok((byte, pos + 1))
        }
    }

    /// Bytes between two positions given in any order.
    pub fn bytes(&self, a: Pos, b: Pos) -> &[u8] {
        self.source.slice(Span::between(a, b))
    }

    /// Text between two positions given in any order (lossy).
    pub fn text(&self, a: Pos, b: Pos) -> String {
        self.source.text(Span::between(a, b))
    }

    /// Runs `m` from `start`.
    ///
    /// The returned position is the end of the match, or `start` itself
    /// when the match failed.
    pub fn run_match(&self, start: Pos, m: &Matcher) -> (Pos, Outcome) {
        let result = m.run(self, start);
        let outcome = Outcome::from(&result);
        (result.unwrap_or(start), outcome)
    }

    /// Runs `f` with `reverse` as the active direction, restoring the
    /// previous direction afterwards.
    pub fn with_direction<T>(&self, reverse: bool, f: impl FnOnce(&Scanner) -> T) -> T {
        let previous = self.reverse.replace(reverse);
        let out = f(self);
        self.reverse.set(previous);
        out
    }

    /// Runs `f` one nesting level deeper.
    ///
    /// Past [`ScanConfig::max_depth`] levels the parse stops with a
    /// [`ScanError::Fatal`] instead of recursing further.
    pub fn nest_with<T>(
        &self,
        pos: Pos,
        f: impl FnOnce() -> Result<T, ScanError>,
    ) -> Result<T, ScanError> {
        let depth = self.depth.get();
        if depth >= self.config.max_depth {
            tracing::debug!(pos, depth, "nesting limit reached");
            return Err(ScanError::fatal(pos, "nesting too deep"));
        }
        self.depth.set(depth + 1);
        let out = f();
        self.depth.set(depth);
        out
    }

    /// Current nesting level.
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    /// Returns `true` if `a` lies further along than `b` in the active direction.
    pub(crate) fn further(&self, a: Pos, b: Pos) -> bool {
        if self.is_reverse() {
            a < b
        } else {
            a > b
        }
    }

    /// Distance travelled from `start` to `pos`, whichever the direction.
    pub(crate) fn distance(start: Pos, pos: Pos) -> usize {
        (pos - start).unsigned_abs() as usize
    }
}
