//! Digits, integers and floats, written once in left-to-right order and
//! matched in either direction.

use crate::error::MatchResult;
use crate::scanner::Scanner;
use common_framework::Pos;

const SIGNS: &[char] = &['+', '-'];

impl Scanner {
    pub fn digit(&self, pos: Pos) -> MatchResult {
        self.rune_fn(pos, |ch| ch.is_ascii_digit())
    }

    pub fn digits(&self, pos: Pos) -> MatchResult {
        self.rune_fn_loop(pos, |ch| ch.is_ascii_digit())
    }

    fn sign(&self, pos: Pos) -> MatchResult {
        self.optional_with(pos, |p| self.rune_any(p, SIGNS))
    }

    /// Optional sign followed by one or more digits.
    pub fn integer(&self, pos: Pos) -> MatchResult {
        self.and_with(pos, 2, self.is_reverse(), |i, p| match i {
            0 => self.sign(p),
            _ => self.digits(p),
        })
    }

    /// `[eE][+-]?digits`
    pub fn exponent(&self, pos: Pos) -> MatchResult {
        self.and_with(pos, 3, self.is_reverse(), |i, p| match i {
            0 => self.rune_any(p, &['e', 'E']),
            1 => self.sign(p),
            _ => self.digits(p),
        })
    }

    /// Optional sign and integer part, a mandatory `.` and fraction digits,
    /// then an optional exponent.
    pub fn float(&self, pos: Pos) -> MatchResult {
        self.and_with(pos, 5, self.is_reverse(), |i, p| match i {
            0 => self.sign(p),
            1 => self.optional_with(p, |q| self.digits(q)),
            2 => self.rune(p, '.'),
            3 => self.digits(p),
            _ => self.optional_with(p, |q| self.exponent(q)),
        })
    }
}
