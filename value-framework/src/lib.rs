//! Value bridge: match functions that decode what they match.
//!
//! A [`ValueFn`] delimits a span with the scanner's match library and turns
//! it into a typed value in the same pass, so a parse tree can be built
//! while matching.

pub mod bridge;
pub mod collector;
pub mod combinators;
pub mod traits;
pub mod unquote;

pub use bridge::ValueScanner;
pub use collector::Collector;
pub use traits::{AstNode, Spanned, ValueFn, ValueResult, ValueRule};

use common_framework::Pos;
use scanner_framework::{Outcome, Scanner};

/// Runs `v` from `start`.
///
/// On failure the value is `None` and the position is `start`.
pub fn run_value_match<T: 'static>(sc: &Scanner, start: Pos, v: &ValueFn<T>) -> (Option<T>, Pos, Outcome) {
    let result = v.run(sc, start);
    match result {
        Ok((value, end)) => (Some(value), end, Outcome::Matched),
        Err(err) if err.is_recoverable() => (None, start, Outcome::NoMatch(err)),
        Err(err) => (None, start, Outcome::Fatal(err)),
    }
}
