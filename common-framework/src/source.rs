use crate::position::{Pos, Span};
use std::sync::Arc;

/// Immutable byte buffer mapped onto the caller's coordinate space.
///
/// The buffer is kept behind an `Arc<[u8]>` so that a source can be cloned
/// cheaply and handed to several scanners. Position `offset` corresponds to
/// the first byte of the buffer, so every position in `[min(), max()]` maps
/// to a buffer index by subtracting `offset`.
#[derive(Clone, Debug)]
pub struct Source {
    buffer: Arc<[u8]>,
    offset: Pos,
}

impl Source {
    /// Creates a source whose first byte sits at position `offset`.
    pub fn new<B: Into<Arc<[u8]>>>(bytes: B, offset: Pos) -> Self {
        Self {
            buffer: bytes.into(),
            offset,
        }
    }

    /// Creates a source starting at position zero.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.as_bytes(), 0)
    }

    /// Returns the smallest valid position.
    pub fn min(&self) -> Pos {
        self.offset
    }

    /// Returns the largest valid position (one past the last byte).
    pub fn max(&self) -> Pos {
        self.offset + self.buffer.len() as Pos
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the whole underlying buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Returns the shared buffer.
    pub fn buffer(&self) -> Arc<[u8]> {
        Arc::clone(&self.buffer)
    }

    /// Maps a position to a buffer index, if it lies in `[min(), max()]`.
    pub fn index(&self, pos: Pos) -> Option<usize> {
        if pos < self.min() || pos > self.max() {
            return None;
        }
        Some((pos - self.offset) as usize)
    }

    /// Returns the byte at `pos`, if any.
    pub fn byte_at(&self, pos: Pos) -> Option<u8> {
        self.buffer.get(self.index(pos)?).copied()
    }

    /// Returns the bytes covered by `span`, clamped to the buffer.
    pub fn slice(&self, span: Span) -> &[u8] {
        let start = span.start.clamp(self.min(), self.max());
        let end = span.end.clamp(start, self.max());
        &self.buffer[(start - self.offset) as usize..(end - self.offset) as usize]
    }

    /// Returns the text covered by `span`, replacing invalid UTF-8.
    pub fn text(&self, span: Span) -> String {
        String::from_utf8_lossy(self.slice(span)).into_owned()
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Source::from_text(text)
    }
}

impl From<Vec<u8>> for Source {
    fn from(bytes: Vec<u8>) -> Self {
        Source::new(bytes, 0)
    }
}

impl PartialEq for Source {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
            && (Arc::ptr_eq(&self.buffer, &other.buffer) || self.buffer == other.buffer)
    }
}

impl Eq for Source {}
