use common_framework::Pos;
use thiserror::Error;

/// Result of a match function: the new position on success.
pub type MatchResult = Result<Pos, ScanError>;

/// Every way a match can fail.
///
/// `NoMatch`, `StartOfFile` and `EndOfFile` are recoverable: an enclosing
/// `or`, `optional` or loop absorbs them. All other variants are committed
/// and propagate through every combinator unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("no match at {at}")]
    NoMatch { at: Pos },

    #[error("start of file at {at}")]
    StartOfFile { at: Pos },

    #[error("end of file at {at}")]
    EndOfFile { at: Pos },

    #[error("fatal at {at}: {message}")]
    Fatal { at: Pos, message: String },

    #[error("conversion failed at {at}: {message}")]
    Conversion { at: Pos, message: String },

    #[error("invalid pattern `{pattern}`: {message}")]
    Regex { pattern: String, message: String },

    #[error("regex matching is not available in reverse mode (at {at})")]
    ReverseRegex { at: Pos },
}

impl ScanError {
    pub fn no_match(at: Pos) -> Self {
        ScanError::NoMatch { at }
    }

    pub fn fatal<M: Into<String>>(at: Pos, message: M) -> Self {
        ScanError::Fatal {
            at,
            message: message.into(),
        }
    }

    pub fn conversion<M: ToString>(at: Pos, message: M) -> Self {
        ScanError::Conversion {
            at,
            message: message.to_string(),
        }
    }

    /// Returns `true` if an enclosing alternative may try something else.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ScanError::NoMatch { .. } | ScanError::StartOfFile { .. } | ScanError::EndOfFile { .. }
        )
    }

    /// Returns `true` if the failure came from running off either edge.
    pub fn is_boundary(&self) -> bool {
        matches!(
            self,
            ScanError::StartOfFile { .. } | ScanError::EndOfFile { .. }
        )
    }

    /// Position where the failure was detected, when known.
    pub fn at(&self) -> Option<Pos> {
        match self {
            ScanError::NoMatch { at }
            | ScanError::StartOfFile { at }
            | ScanError::EndOfFile { at }
            | ScanError::Fatal { at, .. }
            | ScanError::Conversion { at, .. }
            | ScanError::ReverseRegex { at } => Some(*at),
            ScanError::Regex { .. } => None,
        }
    }

    /// Escalates a recoverable failure into a committed one.
    ///
    /// Errors that are already non-recoverable are returned as they are.
    pub fn into_fatal<M: Into<String>>(self, message: M) -> Self {
        if !self.is_recoverable() {
            return self;
        }
        let at = self.at().unwrap_or_default();
        let message = message.into();
        tracing::debug!(at, %message, cause = %self, "committed match failed");
        ScanError::Fatal { at, message }
    }
}

/// Outcome reported by [`Scanner::run_match`](crate::Scanner::run_match).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Matched,
    NoMatch(ScanError),
    Fatal(ScanError),
}

impl Outcome {
    pub fn is_matched(&self) -> bool {
        matches!(self, Outcome::Matched)
    }

    /// The failure carried by `NoMatch` or `Fatal`.
    pub fn into_error(self) -> Option<ScanError> {
        match self {
            Outcome::Matched => None,
            Outcome::NoMatch(err) | Outcome::Fatal(err) => Some(err),
        }
    }
}

impl From<&MatchResult> for Outcome {
    fn from(result: &MatchResult) -> Self {
        match result {
            Ok(_) => Outcome::Matched,
            Err(err) if err.is_recoverable() => Outcome::NoMatch(err.clone()),
            Err(err) => Outcome::Fatal(err.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_kinds() {
        assert!(ScanError::no_match(1).is_recoverable());
        assert!(ScanError::StartOfFile { at: 0 }.is_recoverable());
        assert!(ScanError::EndOfFile { at: 9 }.is_recoverable());
        assert!(!ScanError::fatal(1, "x").is_recoverable());
        assert!(!ScanError::conversion(1, "overflow").is_recoverable());
        assert!(!ScanError::ReverseRegex { at: 0 }.is_recoverable());
    }

    #[test]
    fn test_into_fatal_keeps_position() {
        let err = ScanError::no_match(7).into_fatal("expected `]`");
        assert_eq!(err, ScanError::fatal(7, "expected `]`"));
    }

    #[test]
    fn test_into_fatal_does_not_rewrap() {
        let err = ScanError::conversion(3, "overflow");
        assert_eq!(err.clone().into_fatal("ignored"), err);
    }

    #[test]
    fn test_outcome_from_result() {
        assert_eq!(Outcome::from(&Ok(3)), Outcome::Matched);
        assert_eq!(
            Outcome::from(&Err(ScanError::no_match(2))),
            Outcome::NoMatch(ScanError::no_match(2))
        );
        assert!(matches!(
            Outcome::from(&Err(ScanError::fatal(2, "boom"))),
            Outcome::Fatal(_)
        ));
    }
}
