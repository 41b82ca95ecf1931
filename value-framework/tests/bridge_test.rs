use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use scanner_framework::combinators::{identifier, rune, sequence};
use scanner_framework::{ScanError, Scanner};
use value_framework::combinators::*;
use value_framework::{AstNode, ValueScanner};

fn reverse(text: &str) -> Scanner {
    let sc = Scanner::from_text(text);
    sc.set_reverse(true);
    sc
}

#[test]
fn test_string_bytes_span() {
    let sc = Scanner::from_text("abc def");
    assert_eq!(string_value(identifier()).run(&sc, 0), Ok(("abc".to_string(), 3)));
    assert_eq!(bytes_value(identifier()).run(&sc, 4), Ok((b"def".to_vec(), 7)));
    let (span, end) = span_value(identifier()).run(&sc, 4).unwrap();
    assert_eq!((span.start, span.end, end), (4, 7, 7));
}

#[test]
fn test_string_value_in_reverse() {
    let sc = reverse("abc def");
    assert_eq!(string_value(identifier()).run(&sc, 7), Ok(("def".to_string(), 4)));
}

#[test]
fn test_rune_value() {
    let sc = Scanner::from_text("é!");
    assert_eq!(rune_value().run(&sc, 0), Ok(('é', 2)));
    assert_eq!(reverse("é!").rune_value(2), Ok(('!', 1)));
}

#[test]
fn test_int_value() {
    assert_eq!(int_value().run(&Scanner::from_text("123x"), 0), Ok((123, 3)));
    assert_eq!(int_value().run(&Scanner::from_text("-5"), 0), Ok((-5, 2)));
    assert_eq!(reverse("x-42").int_value(4), Ok((-42, 1)));
}

#[test]
fn test_int_overflow_is_conversion_error() {
    let sc = Scanner::from_text("99999999999999999999");
    let err = int_value().run(&sc, 0).unwrap_err();
    assert_matches!(err, ScanError::Conversion { at: 0, .. });
    assert!(!err.is_recoverable());
}

#[test]
fn test_conversion_error_points_at_number_start_in_reverse() {
    let sc = reverse("x 99999999999999999999");
    assert_matches!(int_value().run(&sc, 22), Err(ScanError::Conversion { at: 2, .. }));
}

#[test]
fn test_float_value() {
    assert_eq!(float64_value().run(&Scanner::from_text("3.5e2"), 0), Ok((350.0, 5)));
    assert_matches!(
        float64_value().run(&Scanner::from_text("1.0e400"), 0),
        Err(ScanError::Conversion { .. })
    );
    assert!(float64_value().run(&Scanner::from_text("12"), 0).unwrap_err().is_recoverable());
}

#[test]
fn test_quoted_string_value() {
    let sc = Scanner::from_text(r#""a\tb" `c\d`"#);
    assert_eq!(quoted_string_value().run(&sc, 0), Ok(("a\tb".to_string(), 6)));
    assert_eq!(quoted_string_value().run(&sc, 7), Ok((r"c\d".to_string(), 12)));
}

#[test]
fn test_conversion_error_is_not_absorbed_by_or() {
    let sc = Scanner::from_text("99999999999999999999");
    let v = or_value(vec![int_value(), const_value(sequence("9"), 9)]);
    assert_matches!(v.run(&sc, 0), Err(ScanError::Conversion { .. }));
}

#[test]
fn test_or_value_first_match() {
    let v = or_value(vec![
        const_value(sequence("ab"), 1),
        const_value(sequence("abc"), 2),
    ]);
    assert_eq!(v.run(&Scanner::from_text("abc"), 0), Ok((1, 2)));
    assert!(v.run(&Scanner::from_text("x"), 0).is_err());
}

#[test]
fn test_loop_sep_value_keeps_logical_order() {
    let v = loop_sep_value(rune_value(), rune(','), true);
    assert_eq!(
        v.run(&Scanner::from_text("a,b,c,"), 0),
        Ok((vec!['a', 'b', 'c'], 6))
    );
    assert_eq!(v.run(&reverse("a,b,c,"), 6), Ok((vec!['a', 'b', 'c'], 0)));
}

#[test]
fn test_loop_value_bounds() {
    let v = loop_value(1, Some(2), rune_value());
    assert_eq!(v.run(&Scanner::from_text("abc"), 0), Ok((vec!['a', 'b'], 2)));
    assert_eq!(v.run(&reverse("abc"), 3), Ok((vec!['b', 'c'], 1)));
    assert!(v.run(&Scanner::from_text(""), 0).is_err());
}

#[test]
fn test_pair_value_both_directions() {
    let v = pair_value(string_value(identifier()), rune('='), int_value());
    assert_eq!(v.run(&Scanner::from_text("x=5"), 0), Ok((("x".to_string(), 5), 3)));
    assert_eq!(v.run(&reverse("x=5"), 3), Ok((("x".to_string(), 5), 0)));
}

#[test]
fn test_delimited_and_friends() {
    let sc = Scanner::from_text("(42)");
    assert_eq!(delimited(rune('('), int_value(), rune(')')).run(&sc, 0), Ok((42, 4)));
    assert_eq!(preceded(rune('('), int_value()).run(&sc, 0), Ok((42, 3)));
    assert_eq!(terminated(int_value(), rune(')')).run(&sc, 1), Ok((42, 4)));
    assert_eq!(
        delimited(rune('('), int_value(), rune(')')).run(&reverse("(42)"), 4),
        Ok((42, 0))
    );
}

#[test]
fn test_opt_and_map() {
    let sc = Scanner::from_text("x");
    assert_eq!(opt_value(int_value()).run(&sc, 0), Ok((None, 0)));
    assert_eq!(
        map_value(string_value(identifier()), |s| s.len()).run(&sc, 0),
        Ok((1, 1))
    );
    assert_matches!(
        try_map_value(string_value(identifier()), |s| s.parse::<u8>()).run(&sc, 0),
        Err(ScanError::Conversion { at: 0, .. })
    );
}

#[test]
fn test_spanned_node() {
    let sc = Scanner::from_text("  7");
    let (node, end) = spanned(int_value()).run(&sc, 2).unwrap();
    assert_eq!((node.start(), node.end(), node.value, end), (2, 3, 7, 3));
}

#[test]
fn test_matcher_discards_value() {
    let sc = Scanner::from_text("12");
    assert_eq!(int_value().matcher().run(&sc, 0), Ok(2));
}
