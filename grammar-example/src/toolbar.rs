//! Toolbar command lines.
//!
//! A toolbar holds parts separated by `|` or a newline. Each part holds
//! arguments separated by spaces. Escaped units and quoted strings never
//! split an argument or a part:
//!
//! ```
//! use grammar_example::parse_toolbar;
//!
//! let data = parse_toolbar(r"a\ aa\|aa|bb").unwrap();
//! assert_eq!(data.parts.len(), 2);
//! assert_eq!(data.parts[0].text, r"a\ aa\|aa");
//! ```

use crate::ESCAPE;
use common_framework::{Pos, ScanConfig, Source, Span};
use scanner_framework::combinators::{
    escape_any, loop1, loop_sep_can_have_last, optional, or, quoted_string, rune, rune_none,
    spaces,
};
use scanner_framework::{Matcher, ScanError, Scanner};
use value_framework::combinators::{loop_sep_value, map_value, on_value, opt_value, preceded, spanned, string_value};
use value_framework::{AstNode, Collector, ValueFn};

const SEPARATORS: [char; 2] = ['|', '\n'];

/// One space-separated argument, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    pub span: Span,
    pub text: String,
}

impl AstNode for Arg {
    fn span(&self) -> Span {
        self.span
    }
}

/// One `|`-separated part. Its span includes leading and trailing spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub span: Span,
    pub text: String,
    pub args: Vec<Arg>,
}

impl Part {
    pub fn trimmed_str(&self) -> &str {
        self.text.trim_matches(|ch: char| ch == ' ' || ch == '\t' || ch == '\r')
    }

    /// The argument under `pos`, if any. An argument's end counts as inside.
    pub fn arg_at(&self, pos: Pos) -> Option<&Arg> {
        self.args
            .iter()
            .find(|arg| arg.span.contains(pos) || arg.span.end == pos)
    }
}

impl AstNode for Part {
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarData {
    pub text: String,
    pub parts: Vec<Part>,
}

impl ToolbarData {
    /// The part under `pos`. A position on a separator belongs to the part
    /// that ends there.
    pub fn part_at(&self, pos: Pos) -> Option<&Part> {
        self.parts
            .iter()
            .find(|part| part.span.contains(pos) || part.span.end == pos)
    }
}

fn arg_matcher() -> Matcher {
    loop1(or(vec![
        escape_any(ESCAPE),
        quoted_string(),
        rune_none(vec![' ', '\t', '\r', SEPARATORS[0], SEPARATORS[1]]),
    ]))
}

fn args_value() -> ValueFn<Vec<Arg>> {
    let arg = map_value(spanned(string_value(arg_matcher())), |s| Arg {
        span: s.span,
        text: s.value,
    });
    let args = opt_value(loop_sep_value(arg, spaces(false), true));
    preceded(optional(spaces(false)), map_value(args, Option::unwrap_or_default))
}

/// Builds the toolbar matcher. Every part found is pushed into `parts`.
fn toolbar_matcher(parts: &Collector<(Span, Vec<Arg>)>) -> Matcher {
    let part = map_value(spanned(args_value()), |s| (s.span, s.value));
    let separator = or(vec![rune(SEPARATORS[0]), rune(SEPARATORS[1])]);
    loop_sep_can_have_last(on_value(part, parts.sink()), separator)
}

pub fn parse_toolbar(text: &str) -> Result<ToolbarData, ScanError> {
    parse_toolbar_with_config(text, ScanConfig::default())
}

pub fn parse_toolbar_with_config(text: &str, config: ScanConfig) -> Result<ToolbarData, ScanError> {
    let sc = Scanner::with_config(Source::from_text(text), config);
    let parts = Collector::new();
    let (end, outcome) = sc.run_match(sc.src_min(), &toolbar_matcher(&parts));
    if let Some(err) = outcome.into_error() {
        return Err(err);
    }
    if end != sc.src_max() {
        tracing::debug!(end, len = text.len(), "toolbar text not fully consumed");
        return Err(ScanError::no_match(end));
    }

    let parts: Vec<Part> = parts
        .take()
        .into_iter()
        .map(|(span, args)| Part {
            span,
            text: sc.text(span.start, span.end),
            args,
        })
        .collect();
    tracing::debug!(parts = parts.len(), "toolbar parsed");
    Ok(ToolbarData {
        text: text.to_string(),
        parts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_str() {
        let data = parse_toolbar("  ls -l  |pwd").unwrap();
        assert_eq!(data.parts[0].trimmed_str(), "ls -l");
        assert_eq!(data.parts[1].trimmed_str(), "pwd");
    }

    #[test]
    fn test_arg_at() {
        let data = parse_toolbar("grep foo").unwrap();
        let part = &data.parts[0];
        assert_eq!(part.arg_at(1).map(|a| a.text.as_str()), Some("grep"));
        assert_eq!(part.arg_at(6).map(|a| a.text.as_str()), Some("foo"));
    }
}
