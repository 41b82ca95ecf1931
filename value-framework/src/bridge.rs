//! Value functions over the match library.
//!
//! Each function delimits a span with an ordinary matcher and decodes it in
//! the same pass. Decoding failures after a successful match are reported as
//! [`ScanError::Conversion`], which no alternative absorbs.

use crate::traits::{ValueFn, ValueResult};
use crate::unquote::unquote;
use common_framework::{Pos, Span};
use scanner_framework::{Matcher, ScanError, Scanner};

/// Value-producing counterparts of the scanner's match functions.
pub trait ValueScanner {
    /// The exact bytes consumed by `m`.
    fn bytes_value(&self, pos: Pos, m: &Matcher) -> ValueResult<Vec<u8>>;

    /// The text consumed by `m` (invalid UTF-8 is replaced).
    fn string_value(&self, pos: Pos, m: &Matcher) -> ValueResult<String>;

    /// The span consumed by `m`.
    fn span_value(&self, pos: Pos, m: &Matcher) -> ValueResult<Span>;

    /// One code point.
    fn rune_value(&self, pos: Pos) -> ValueResult<char>;

    /// An [`integer`](Scanner::integer) converted to `i64`.
    fn int_value(&self, pos: Pos) -> ValueResult<i64>;

    /// A [`float`](Scanner::float) converted to a finite `f64`.
    fn float64_value(&self, pos: Pos) -> ValueResult<f64>;

    /// A [`quoted_string`](Scanner::quoted_string) with its quotes removed
    /// and escapes resolved.
    fn quoted_string_value(&self, pos: Pos) -> ValueResult<String>;

    /// Runs `v` and, only on success, hands the value to `callback`.
    fn on_value<T: 'static>(&self, pos: Pos, v: &ValueFn<T>, callback: &dyn Fn(T)) -> Result<Pos, ScanError>;

    /// The value of the first alternative that matches.
    fn or_value<T: 'static>(&self, pos: Pos, fns: &[ValueFn<T>]) -> ValueResult<T>;

    /// Items of `item (sep item)*` in left-to-right order, whichever the
    /// direction.
    fn loop_sep_value<T: 'static>(
        &self,
        pos: Pos,
        item: &ValueFn<T>,
        sep: &Matcher,
        can_have_last: bool,
    ) -> ValueResult<Vec<T>>;
}

impl ValueScanner for Scanner {
    fn bytes_value(&self, pos: Pos, m: &Matcher) -> ValueResult<Vec<u8>> {
        let end = m.run(self, pos)?;
        Ok((self.bytes(pos, end).to_vec(), end))
    }

    fn string_value(&self, pos: Pos, m: &Matcher) -> ValueResult<String> {
        let end = m.run(self, pos)?;
        Ok((self.text(pos, end), end))
    }

    fn span_value(&self, pos: Pos, m: &Matcher) -> ValueResult<Span> {
        let end = m.run(self, pos)?;
        Ok((Span::between(pos, end), end))
    }

    fn rune_value(&self, pos: Pos) -> ValueResult<char> {
        self.read_rune(pos)
    }

    fn int_value(&self, pos: Pos) -> ValueResult<i64> {
        let end = self.integer(pos)?;
        let text = self.text(pos, end);
        let value = text.parse::<i64>().map_err(|err| {
            tracing::debug!(pos, %text, %err, "integer conversion failed");
            ScanError::conversion(pos.min(end), format!("`{text}`: {err}"))
        })?;
        Ok((value, end))
    }

    fn float64_value(&self, pos: Pos) -> ValueResult<f64> {
        let end = self.float(pos)?;
        let text = self.text(pos, end);
        let value =
            parse_finite(&text).map_err(|message| ScanError::conversion(pos.min(end), message))?;
        Ok((value, end))
    }

    fn quoted_string_value(&self, pos: Pos) -> ValueResult<String> {
        let end = self.quoted_string(pos)?;
        let text = self.text(pos, end);
        let value = unquote(&text, self.config().escape)
            .map_err(|message| ScanError::conversion(pos.min(end), message))?;
        Ok((value, end))
    }

    fn on_value<T: 'static>(&self, pos: Pos, v: &ValueFn<T>, callback: &dyn Fn(T)) -> Result<Pos, ScanError> {
        let (value, end) = v.run(self, pos)?;
        callback(value);
        Ok(end)
    }

    fn or_value<T: 'static>(&self, pos: Pos, fns: &[ValueFn<T>]) -> ValueResult<T> {
        let mut winner = None;
        let end = self.or_with(pos, fns.len(), |i, p| {
            let (value, q) = fns[i].run(self, p)?;
            winner = Some(value);
            Ok(q)
        })?;
        match winner {
            Some(value) => Ok((value, end)),
            None => Err(ScanError::no_match(pos)),
        }
    }

    fn loop_sep_value<T: 'static>(
        &self,
        pos: Pos,
        item: &ValueFn<T>,
        sep: &Matcher,
        can_have_last: bool,
    ) -> ValueResult<Vec<T>> {
        let mut items = Vec::new();
        let end = self.loop_sep_with(
            pos,
            can_have_last,
            |p| {
                let (value, q) = item.run(self, p)?;
                items.push(value);
                Ok(q)
            },
            |p| sep.run(self, p),
        )?;
        if self.is_reverse() {
            items.reverse();
        }
        Ok((items, end))
    }
}

/// Parses a float, rejecting values that overflow to infinity.
pub fn parse_finite(text: &str) -> Result<f64, String> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(format!("`{text}`: out of range")),
        Err(err) => Err(format!("`{text}`: {err}")),
    }
}
