use crate::error::{MatchResult, ScanError};
use crate::scanner::Scanner;
use common_framework::Pos;

impl Scanner {
    /// Matches `pattern` anchored at `pos`, looking at no more than
    /// `max_len` bytes.
    ///
    /// Only defined forward: in reverse mode this fails immediately with
    /// [`ScanError::ReverseRegex`], which is not recoverable. Uncacheable
    /// patterns are compiled on every call.
    pub fn regexp_from_start(
        &self,
        pos: Pos,
        pattern: &str,
        cacheable: bool,
        max_len: usize,
    ) -> MatchResult {
        if self.is_reverse() {
            return Err(ScanError::ReverseRegex { at: pos });
        }
        let re = self.cache().anchored(pattern, cacheable)?;
        let index = self
            .source()
            .index(pos)
            .ok_or(ScanError::no_match(pos))?;
        let bytes = self.source().as_bytes();
        let end = index.saturating_add(max_len).min(bytes.len());
        match re.find(&bytes[index..end]) {
            Some(found) if found.start() == 0 => Ok(pos + found.end() as Pos),
            _ => Err(ScanError::no_match(pos)),
        }
    }
}
