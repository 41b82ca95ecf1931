use crate::error::{MatchResult, ScanError};
use crate::scanner::Scanner;
use common_framework::Pos;
use std::sync::{Arc, OnceLock};

/// A match rule: a pure function from a position to a new position.
///
/// On failure the caller's position is untouched; the error carries the
/// position where the failure was detected. Rules may be implemented by
/// structs, but most grammars are built from closures through the
/// [`combinators`](crate::combinators) module.
pub trait MatchRule: Send + Sync {
    /// Attempts to match from `pos` in the scanner's active direction.
    fn try_match(&self, sc: &Scanner, pos: Pos) -> MatchResult;
}

impl<F> MatchRule for F
where
    F: Fn(&Scanner, Pos) -> MatchResult + Send + Sync,
{
    fn try_match(&self, sc: &Scanner, pos: Pos) -> MatchResult {
        self(sc, pos)
    }
}

/// A shareable, immutable match function.
///
/// Cloning is cheap. Matchers hold no per-parse state, so one composed
/// grammar can be used by many scanners, including on other threads.
#[derive(Clone)]
pub struct Matcher(Arc<dyn MatchRule>);

impl Matcher {
    /// Wraps a closure or rule.
    pub fn new<R>(rule: R) -> Self
    where
        R: MatchRule + 'static,
    {
        Matcher(Arc::new(rule))
    }

    /// Runs the matcher from `pos`.
    #[inline]
    pub fn run(&self, sc: &Scanner, pos: Pos) -> MatchResult {
        self.0.try_match(sc, pos)
    }

    /// Builds a self-referential matcher.
    ///
    /// `build` receives a handle that refers back to the matcher being
    /// built. The handle only holds a weak reference, so no reference cycle
    /// is created; using it after the returned matcher is dropped fails with
    /// a fatal error.
    pub fn recursive<F>(build: F) -> Matcher
    where
        F: FnOnce(Matcher) -> Matcher,
    {
        let slot: Arc<OnceLock<Matcher>> = Arc::new(OnceLock::new());
        let weak = Arc::downgrade(&slot);
        let handle = Matcher::new(move |sc: &Scanner, pos: Pos| {
            match weak.upgrade().and_then(|slot| slot.get().cloned()) {
                Some(m) => m.run(sc, pos),
                None => Err(ScanError::fatal(pos, "recursive matcher used after drop")),
            }
        });
        let body = build(handle);
        let _ = slot.set(body);
        Matcher::new(move |sc: &Scanner, pos: Pos| match slot.get() {
            Some(m) => m.run(sc, pos),
            None => Err(ScanError::fatal(pos, "recursive matcher not initialized")),
        })
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Matcher(..)")
    }
}
