use common_framework::{Pos, Span};
use scanner_framework::{MatchResult, Matcher, ScanError, Scanner};
use std::sync::{Arc, OnceLock};

/// Result of a value function: the decoded value and the new position.
pub type ValueResult<T> = Result<(T, Pos), ScanError>;

/// A node of a parse tree built by value functions.
///
/// Only the span is required; everything else is up to the grammar.
pub trait AstNode: Clone + std::fmt::Debug {
    /// Returns the span covered by this node.
    fn span(&self) -> Span;

    fn start(&self) -> Pos {
        self.span().start
    }

    fn end(&self) -> Pos {
        self.span().end
    }
}

/// A decoded value together with the span it was decoded from.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub span: Span,
    pub value: T,
}

impl<T> Spanned<T> {
    pub fn new(span: Span, value: T) -> Self {
        Self { span, value }
    }
}

impl<T: Clone + std::fmt::Debug> AstNode for Spanned<T> {
    fn span(&self) -> Span {
        self.span
    }
}

/// A value rule: a match function that also decodes what it matched.
pub trait ValueRule<T>: Send + Sync {
    fn try_value(&self, sc: &Scanner, pos: Pos) -> ValueResult<T>;
}

impl<T, F> ValueRule<T> for F
where
    F: Fn(&Scanner, Pos) -> ValueResult<T> + Send + Sync,
{
    fn try_value(&self, sc: &Scanner, pos: Pos) -> ValueResult<T> {
        self(sc, pos)
    }
}

/// A shareable, immutable value function.
pub struct ValueFn<T>(Arc<dyn ValueRule<T>>);

impl<T> Clone for ValueFn<T> {
    fn clone(&self) -> Self {
        ValueFn(Arc::clone(&self.0))
    }
}

impl<T: 'static> ValueFn<T> {
    pub fn new<R>(rule: R) -> Self
    where
        R: ValueRule<T> + 'static,
    {
        ValueFn(Arc::new(rule))
    }

    #[inline]
    pub fn run(&self, sc: &Scanner, pos: Pos) -> ValueResult<T> {
        self.0.try_value(sc, pos)
    }

    /// The same match, with the value discarded.
    pub fn matcher(&self) -> Matcher {
        let this = self.clone();
        Matcher::new(move |sc: &Scanner, pos: Pos| -> MatchResult {
            this.run(sc, pos).map(|(_, p)| p)
        })
    }

    /// Builds a self-referential value function; see [`Matcher::recursive`].
    pub fn recursive<F>(build: F) -> ValueFn<T>
    where
        F: FnOnce(ValueFn<T>) -> ValueFn<T>,
    {
        let slot: Arc<OnceLock<ValueFn<T>>> = Arc::new(OnceLock::new());
        let weak = Arc::downgrade(&slot);
        let handle = ValueFn::new(move |sc: &Scanner, pos: Pos| {
            match weak.upgrade().and_then(|slot| slot.get().cloned()) {
                Some(v) => v.run(sc, pos),
                None => Err(ScanError::fatal(pos, "recursive value used after drop")),
            }
        });
        let body = build(handle);
        let _ = slot.set(body);
        ValueFn::new(move |sc: &Scanner, pos: Pos| match slot.get() {
            Some(v) => v.run(sc, pos),
            None => Err(ScanError::fatal(pos, "recursive value not initialized")),
        })
    }
}

impl<T> std::fmt::Debug for ValueFn<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ValueFn(..)")
    }
}
