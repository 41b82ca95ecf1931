/// A position in the caller's coordinate space.
///
/// Positions are signed so that a source buffer can be mapped onto absolute
/// offsets (e.g. a window of a larger file) and so that distances computed in
/// reverse mode stay meaningful.
pub type Pos = i64;

/// The span covered by a successful match.
///
/// A span is always normalized so that `start <= end`, whichever direction
/// the match was run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Smaller of the two positions.
    pub start: Pos,
    /// Larger of the two positions.
    pub end: Pos,
}

impl Span {
    /// Creates a span from two positions given in any order.
    pub fn between(a: Pos, b: Pos) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Creates a zero-width span at `pos`.
    pub fn empty(pos: Pos) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    /// Returns `true` if the span is zero-width.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `pos` lies inside the span, both ends included.
    pub fn contains(&self, pos: Pos) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// Returns the smallest span covering both `self` and `other`.
    pub fn cover(&self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}
