//! Code-point decoding over raw bytes in both directions.
//!
//! Invalid or truncated UTF-8 decodes to U+FFFD with a width of one byte, so
//! every step always makes progress.

pub const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

fn sequence_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7f => 1,
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => 0,
    }
}

fn is_continuation(byte: u8) -> bool {
    byte & 0xc0 == 0x80
}

/// Decodes the code point starting at `index`; returns it with its width.
pub fn decode_after(bytes: &[u8], index: usize) -> Option<(char, usize)> {
    let lead = *bytes.get(index)?;
    let width = sequence_width(lead);
    if width == 0 || index + width > bytes.len() {
        return Some((REPLACEMENT, 1));
    }
    match std::str::from_utf8(&bytes[index..index + width]) {
        Ok(text) => text.chars().next().map(|ch| (ch, width)),
        Err(_) => Some((REPLACEMENT, 1)),
    }
}

/// Decodes the code point ending at `index` (exclusive); returns it with its width.
pub fn decode_before(bytes: &[u8], index: usize) -> Option<(char, usize)> {
    if index == 0 || index > bytes.len() {
        return None;
    }
    let lowest = index.saturating_sub(4);
    let mut start = index - 1;
    while start > lowest && is_continuation(bytes[start]) {
        start -= 1;
    }
    match decode_after(bytes, start) {
        Some((ch, width)) if start + width == index => Some((ch, width)),
        _ => Some((REPLACEMENT, 1)),
    }
}
