//! Curried value functions.
//!
//! Sequencing helpers (`pair_value`, `preceded`, `terminated`, `delimited`)
//! are written in left-to-right order and run back-to-front in reverse mode,
//! like [`and_r`](scanner_framework::combinators::and_r).

use crate::bridge::ValueScanner;
use crate::traits::{Spanned, ValueFn, ValueResult};
use common_framework::{Pos, Span};
use scanner_framework::{MatchResult, Matcher, ScanError, Scanner};
use std::fmt::Display;

macro_rules! curried_value {
    ($(
        $(#[$meta:meta])*
        $name:ident ( $($arg:ident : $ty:ty),* ) -> $out:ty => $method:ident ( $($pass:expr),* );
    )*) => {
        $(
            $(#[$meta])*
            pub fn $name($($arg: $ty),*) -> ValueFn<$out> {
                ValueFn::new(move |sc: &Scanner, pos: Pos| sc.$method(pos, $($pass),*))
            }
        )*
    };
}

curried_value! {
    bytes_value(m: Matcher) -> Vec<u8> => bytes_value(&m);
    string_value(m: Matcher) -> String => string_value(&m);
    span_value(m: Matcher) -> Span => span_value(&m);
    rune_value() -> char => rune_value();
    /// Fails with [`ScanError::Conversion`] when the digits overflow `i64`.
    int_value() -> i64 => int_value();
    float64_value() -> f64 => float64_value();
    quoted_string_value() -> String => quoted_string_value();
}

/// Runs `v` and, only on success, passes the value to `callback`.
pub fn on_value<T, F>(v: ValueFn<T>, callback: F) -> Matcher
where
    T: 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    Matcher::new(move |sc: &Scanner, pos: Pos| sc.on_value(pos, &v, &callback))
}

pub fn or_value<T: 'static>(fns: Vec<ValueFn<T>>) -> ValueFn<T> {
    ValueFn::new(move |sc: &Scanner, pos: Pos| sc.or_value(pos, &fns))
}

/// `item (sep item)*`, with an optional trailing `sep` when `can_have_last`.
pub fn loop_sep_value<T: 'static>(item: ValueFn<T>, sep: Matcher, can_have_last: bool) -> ValueFn<Vec<T>> {
    ValueFn::new(move |sc: &Scanner, pos: Pos| sc.loop_sep_value(pos, &item, &sep, can_have_last))
}

/// Repeats `item` between `min` and `max` times, collecting in
/// left-to-right order.
pub fn loop_value<T: 'static>(min: usize, max: Option<usize>, item: ValueFn<T>) -> ValueFn<Vec<T>> {
    ValueFn::new(move |sc: &Scanner, pos: Pos| -> ValueResult<Vec<T>> {
        let mut items = Vec::new();
        let end = sc.loop_with(pos, min, max, |p| {
            let (value, q) = item.run(sc, p)?;
            items.push(value);
            Ok(q)
        })?;
        if sc.is_reverse() {
            items.reverse();
        }
        Ok((items, end))
    })
}

/// A fixed value for whatever `m` matches.
pub fn const_value<T>(m: Matcher, value: T) -> ValueFn<T>
where
    T: Clone + Send + Sync + 'static,
{
    ValueFn::new(move |sc: &Scanner, pos: Pos| -> ValueResult<T> {
        let end = m.run(sc, pos)?;
        Ok((value.clone(), end))
    })
}

pub fn map_value<T, U, F>(v: ValueFn<T>, f: F) -> ValueFn<U>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> U + Send + Sync + 'static,
{
    ValueFn::new(move |sc: &Scanner, pos: Pos| -> ValueResult<U> {
        let (value, end) = v.run(sc, pos)?;
        Ok((f(value), end))
    })
}

/// Like [`map_value`], but a failed mapping is a conversion error.
pub fn try_map_value<T, U, E, F>(v: ValueFn<T>, f: F) -> ValueFn<U>
where
    T: 'static,
    U: 'static,
    E: Display,
    F: Fn(T) -> Result<U, E> + Send + Sync + 'static,
{
    ValueFn::new(move |sc: &Scanner, pos: Pos| -> ValueResult<U> {
        let (value, end) = v.run(sc, pos)?;
        let mapped = f(value).map_err(|err| ScanError::conversion(pos.min(end), err))?;
        Ok((mapped, end))
    })
}

/// `None` instead of a recoverable failure.
pub fn opt_value<T: 'static>(v: ValueFn<T>) -> ValueFn<Option<T>> {
    ValueFn::new(move |sc: &Scanner, pos: Pos| -> ValueResult<Option<T>> {
        match v.run(sc, pos) {
            Ok((value, end)) => Ok((Some(value), end)),
            Err(err) if err.is_recoverable() => Ok((None, pos)),
            Err(err) => Err(err),
        }
    })
}

/// The value together with its span.
pub fn spanned<T: 'static>(v: ValueFn<T>) -> ValueFn<Spanned<T>> {
    ValueFn::new(move |sc: &Scanner, pos: Pos| -> ValueResult<Spanned<T>> {
        let (value, end) = v.run(sc, pos)?;
        Ok((Spanned::new(Span::between(pos, end), value), end))
    })
}

/// `a sep b`, both values kept.
pub fn pair_value<A, B>(a: ValueFn<A>, sep: Matcher, b: ValueFn<B>) -> ValueFn<(A, B)>
where
    A: 'static,
    B: 'static,
{
    ValueFn::new(move |sc: &Scanner, pos: Pos| -> ValueResult<(A, B)> {
        let mut first = None;
        let mut second = None;
        let end = sc.and_with(pos, 3, sc.is_reverse(), |i, p| match i {
            0 => a.run(sc, p).map(|(value, q)| {
                first = Some(value);
                q
            }),
            1 => sep.run(sc, p),
            _ => b.run(sc, p).map(|(value, q)| {
                second = Some(value);
                q
            }),
        })?;
        match (first, second) {
            (Some(x), Some(y)) => Ok(((x, y), end)),
            _ => Err(ScanError::no_match(pos)),
        }
    })
}

fn empty() -> Matcher {
    Matcher::new(|_: &Scanner, pos: Pos| -> MatchResult { Ok(pos) })
}

/// `m v`, keeping the value of `v`.
pub fn preceded<T: 'static>(m: Matcher, v: ValueFn<T>) -> ValueFn<T> {
    delimited(m, v, empty())
}

/// `v m`, keeping the value of `v`.
pub fn terminated<T: 'static>(v: ValueFn<T>, m: Matcher) -> ValueFn<T> {
    delimited(empty(), v, m)
}

/// `open v close`, keeping the value of `v`.
pub fn delimited<T: 'static>(open: Matcher, v: ValueFn<T>, close: Matcher) -> ValueFn<T> {
    ValueFn::new(move |sc: &Scanner, pos: Pos| -> ValueResult<T> {
        let mut inner = None;
        let end = sc.and_with(pos, 3, sc.is_reverse(), |i, p| match i {
            0 => open.run(sc, p),
            1 => v.run(sc, p).map(|(value, q)| {
                inner = Some(value);
                q
            }),
            _ => close.run(sc, p),
        })?;
        inner
            .map(|value| (value, end))
            .ok_or(ScanError::no_match(pos))
    })
}

/// Runs `v` one nesting level deeper; see [`Scanner::nest_with`].
pub fn nested_value<T: 'static>(v: ValueFn<T>) -> ValueFn<T> {
    ValueFn::new(move |sc: &Scanner, pos: Pos| sc.nest_with(pos, || v.run(sc, pos)))
}

/// See [`ValueFn::recursive`].
pub fn recursive_value<T, F>(build: F) -> ValueFn<T>
where
    T: 'static,
    F: FnOnce(ValueFn<T>) -> ValueFn<T>,
{
    ValueFn::recursive(build)
}
