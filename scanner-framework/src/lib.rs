//! Position-based, bidirectional matcher engine.
//!
//! A [`Scanner`] owns a byte [`Source`] and a direction flag. Match
//! functions take a position and return a new one, and run unchanged
//! left-to-right or right-to-left from any pivot position.

pub mod cache;
pub mod combinators;
pub mod cursor;
pub mod error;
pub mod matchers;
pub mod numeric;
pub mod regexp;
pub mod scanner;
pub mod section;
pub mod traits;

pub use common_framework::{Pos, ScanConfig, Source, Span};
pub use error::{MatchResult, Outcome, ScanError};
pub use scanner::Scanner;
pub use section::SectionOpts;
pub use traits::{MatchRule, Matcher};
