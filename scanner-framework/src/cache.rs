use crate::error::ScanError;
use lru::LruCache;
use regex::bytes::Regex;
use std::cell::RefCell;
use std::num::NonZeroUsize;

/// Compiled-pattern cache owned by one [`Scanner`](crate::Scanner).
///
/// The cache is an unsynchronized `RefCell`, which keeps the owning scanner
/// `!Sync`: one scanner per concurrently running parse.
pub struct RegexCache {
    entries: RefCell<LruCache<String, Regex>>,
}

impl RegexCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: RefCell::new(LruCache::new(capacity)),
        }
    }

    /// Returns the compiled, start-anchored form of `pattern`.
    ///
    /// Uncacheable patterns are compiled on every call and never stored.
    pub fn anchored(&self, pattern: &str, cacheable: bool) -> Result<Regex, ScanError> {
        if cacheable {
            if let Some(re) = self.entries.borrow_mut().get(pattern) {
                tracing::trace!(pattern, "regex cache hit");
                return Ok(re.clone());
            }
        }

        let re = compile_anchored(pattern)?;
        if cacheable {
            self.entries
                .borrow_mut()
                .put(pattern.to_string(), re.clone());
        }
        Ok(re)
    }

    /// Number of cached patterns.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl std::fmt::Debug for RegexCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegexCache")
            .field("len", &self.len())
            .field("capacity", &self.entries.borrow().cap())
            .finish()
    }
}

fn compile_anchored(pattern: &str) -> Result<Regex, ScanError> {
    tracing::trace!(pattern, "compiling regex");
    Regex::new(&format!("^(?:{pattern})")).map_err(|err| ScanError::Regex {
        pattern: pattern.to_string(),
        message: err.to_string(),
    })
}
