use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use scanner_framework::combinators::*;
use scanner_framework::{Matcher, Outcome, ScanConfig, ScanError, Scanner, Source};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn reverse(text: &str) -> Scanner {
    let sc = Scanner::from_text(text);
    sc.set_reverse(true);
    sc
}

#[test]
fn test_rune_classes() {
    let sc = Scanner::from_text("a1-");
    assert_eq!(rune('a').run(&sc, 0), Ok(1));
    assert_eq!(rune_any(vec!['0', '1']).run(&sc, 1), Ok(2));
    assert_eq!(rune_none(vec!['a']).run(&sc, 2), Ok(3));
    assert_matches!(rune('b').run(&sc, 0), Err(ScanError::NoMatch { at: 0 }));
    assert_eq!(letter().run(&sc, 0), Ok(1));
    assert!(letter().run(&sc, 1).is_err());
}

#[test]
fn test_n_runes_counts_code_points() {
    let sc = Scanner::from_text("héllo");
    assert_eq!(n_runes(2).run(&sc, 0), Ok(3));
    assert_matches!(n_runes(9).run(&sc, 0), Err(ScanError::EndOfFile { .. }));
}

#[test]
fn test_sequence_both_directions() {
    let sc = Scanner::from_text("let x");
    assert_eq!(sequence("let").run(&sc, 0), Ok(3));
    assert_eq!(reverse("let x").sequence(3, "let"), Ok(0));
    assert_matches!(sequence("letter").run(&sc, 0), Err(ScanError::EndOfFile { .. }));
    assert_matches!(reverse("let").sequence(2, "let"), Err(ScanError::StartOfFile { .. }));
}

#[test]
fn test_sequence_mid() {
    let sc = Scanner::from_text("hello world");
    assert_eq!(sequence_mid("world").run(&sc, 8), Ok(11));
    assert_eq!(reverse("hello world").sequence_mid(8, "world"), Ok(6));
    assert!(sequence_mid("world").run(&sc, 2).is_err());
}

#[test]
fn test_identifier_both_directions() {
    let sc = Scanner::from_text("_ab1 x");
    assert_eq!(identifier().run(&sc, 0), Ok(4));
    assert_eq!(reverse("_ab1 x").identifier(4), Ok(0));
    assert_eq!(reverse("12abc").identifier(5), Ok(2));
    assert!(reverse("x 9").identifier(3).is_err());
    assert!(identifier().run(&Scanner::from_text("1a"), 0).is_err());
}

#[test]
fn test_spaces_and_lines() {
    let sc = Scanner::from_text("  \tx");
    assert_eq!(spaces(false).run(&sc, 0), Ok(3));
    assert!(spaces(false).run(&Scanner::from_text("\n"), 0).is_err());
    assert_eq!(spaces(true).run(&Scanner::from_text(" \n x"), 0), Ok(3));

    let sc = Scanner::from_text("abc\ndef");
    assert_eq!(to_nl_or_end(false, None).run(&sc, 0), Ok(3));
    assert_eq!(to_nl_or_end(true, None).run(&sc, 0), Ok(4));
    assert_eq!(to_nl_or_end(false, None).run(&sc, 4), Ok(7));

    let sc = Scanner::from_text("a\\\nb\nc");
    assert_eq!(to_nl_or_end(false, Some('\\')).run(&sc, 0), Ok(4));
}

#[test]
fn test_eof_follows_direction() {
    let sc = Scanner::from_text("ab");
    assert_eq!(eof().run(&sc, 2), Ok(2));
    assert!(eof().run(&sc, 0).is_err());
    assert_eq!(reverse("ab").eof(0), Ok(0));
    assert!(reverse("ab").eof(2).is_err());
}

#[test]
fn test_and_r_runs_back_to_front() {
    let m = and_r(vec![rune('a'), rune('b')]);
    assert_eq!(m.run(&Scanner::from_text("ab"), 0), Ok(2));
    assert_eq!(m.run(&reverse("ab"), 2), Ok(0));
    // `and` keeps list order, so in reverse it expects "ba"
    let m = and(vec![rune('a'), rune('b')]);
    assert_eq!(m.run(&reverse("ba"), 2), Ok(0));
}

#[test]
fn test_or_reports_furthest_failure() {
    let m = or(vec![
        and(vec![rune('a'), rune('x')]),
        and(vec![rune('a'), rune('b'), rune('x')]),
    ]);
    assert_eq!(m.run(&Scanner::from_text("abc"), 0), Err(ScanError::NoMatch { at: 2 }));
    assert_eq!(m.run(&reverse("cba"), 3), Err(ScanError::NoMatch { at: 1 }));
}

#[test]
fn test_or_first_match_wins() {
    let m = or(vec![sequence("ab"), sequence("abc")]);
    assert_eq!(m.run(&Scanner::from_text("abc"), 0), Ok(2));
}

#[test]
fn test_optional_and_failure_positions() {
    let sc = Scanner::from_text("b");
    assert_eq!(optional(rune('a')).run(&sc, 0), Ok(0));
    let (end, outcome) = sc.run_match(0, &and(vec![rune('b'), rune('c')]));
    assert_eq!(end, 0);
    assert_matches!(outcome, Outcome::NoMatch(ScanError::EndOfFile { at: 1 }));
}

#[test]
fn test_limited_loop() {
    let sc = Scanner::from_text("aaaa");
    assert_eq!(limited_loop(2, Some(3), rune('a')).run(&sc, 0), Ok(3));
    assert_eq!(limited_loop(0, None, rune('a')).run(&sc, 0), Ok(4));
    assert!(limited_loop(2, None, rune('a')).run(&Scanner::from_text("ab"), 0).is_err());
    assert_eq!(opt_loop(rune('x')).run(&sc, 0), Ok(0));
    assert!(loop1(rune('x')).run(&sc, 0).is_err());
}

#[test]
fn test_zero_width_loop_terminates() {
    let sc = Scanner::from_text("abc");
    assert_eq!(opt_loop(optional(rune('x'))).run(&sc, 0), Ok(0));
    assert_eq!(loop1(peek(rune('a'))).run(&sc, 0), Ok(0));
}

#[test]
fn test_loop_sep_with_trailing_separator() {
    let item = rune_any(vec!['a', 'b', 'c']);
    let m = loop_sep_can_have_last(item.clone(), rune(','));
    assert_eq!(m.run(&Scanner::from_text("a,b,c,"), 0), Ok(6));
    assert_eq!(m.run(&reverse("a,b,c,"), 6), Ok(0));
    assert_eq!(m.run(&reverse("a,b,c"), 5), Ok(0));

    let strict = loop_sep(item, rune(','));
    assert_eq!(strict.run(&Scanner::from_text("a,b,c,"), 0), Ok(5));
    assert!(strict.run(&reverse("a,b,c,"), 6).is_err());
    assert_eq!(strict.run(&reverse("a,b,c,"), 5), Ok(0));
}

#[test]
fn test_peek_and_not_are_zero_width() {
    let sc = Scanner::from_text("ab");
    assert_eq!(peek(rune('a')).run(&sc, 0), Ok(0));
    assert!(peek(rune('b')).run(&sc, 0).is_err());
    assert_eq!(not(rune('b')).run(&sc, 0), Ok(0));
    assert!(not(rune('a')).run(&sc, 0).is_err());
}

#[test]
fn test_reverse_mode_restores_direction() {
    let sc = Scanner::from_text("ab");
    assert_eq!(reverse_mode(true, rune('a')).run(&sc, 1), Ok(0));
    assert!(!sc.is_reverse());
    let m = and(vec![rune('a'), reverse_mode(true, rune('a')), rune('a')]);
    assert_eq!(m.run(&Scanner::from_text("a"), 0), Ok(1));
}

#[test]
fn test_must_escalates() {
    let sc = Scanner::from_text("a");
    assert_eq!(
        must(rune('b'), "expected b").run(&sc, 0),
        Err(ScanError::fatal(0, "expected b"))
    );
    assert_eq!(must(rune('a'), "expected a").run(&sc, 0), Ok(1));
}

#[test]
fn test_fatal_is_never_swallowed() {
    let sc = Scanner::from_text("a");
    let boom = || fatal("boom");
    assert_matches!(or(vec![boom(), rune('a')]).run(&sc, 0), Err(ScanError::Fatal { .. }));
    assert_matches!(optional(boom()).run(&sc, 0), Err(ScanError::Fatal { .. }));
    assert_matches!(opt_loop(boom()).run(&sc, 0), Err(ScanError::Fatal { .. }));
    assert_matches!(not(boom()).run(&sc, 0), Err(ScanError::Fatal { .. }));
    assert_matches!(
        loop_sep_can_have_last(rune('a'), boom()).run(&sc, 0),
        Err(ScanError::Fatal { .. })
    );
    let (end, outcome) = sc.run_match(0, &and(vec![rune('a'), boom()]));
    assert_eq!(end, 0);
    assert_matches!(outcome, Outcome::Fatal(_));
}

#[test]
fn test_fail_and_debug() {
    let sc = Scanner::from_text("a");
    assert_eq!(fail().run(&sc, 0), Err(ScanError::NoMatch { at: 0 }));
    assert_eq!(debug("a", rune('a')).run(&sc, 0), Ok(1));
}

#[test]
fn test_rune_fn_loop() {
    let sc = Scanner::from_text("aaab");
    assert_eq!(rune_fn_loop(|ch| ch == 'a').run(&sc, 0), Ok(3));
    assert_eq!(rune_fn(|ch| ch == 'b').run(&sc, 3), Ok(4));
}

#[test]
fn test_numbers_both_directions() {
    let sc = Scanner::from_text("-42x");
    assert_eq!(integer().run(&sc, 0), Ok(3));
    assert_eq!(reverse("-42x").integer(3), Ok(0));

    let text = "3.14e-2";
    assert_eq!(float().run(&Scanner::from_text(text), 0), Ok(7));
    assert_eq!(reverse(text).float(7), Ok(0));
    assert!(float().run(&Scanner::from_text("12"), 0).is_err());

    assert_eq!(reverse("ab123").digits(5), Ok(2));
    assert_eq!(exponent().run(&Scanner::from_text("E+10"), 0), Ok(4));
    assert_eq!(digit().run(&Scanner::from_text("7"), 0), Ok(1));
}

#[test]
fn test_recursive_balanced_parens() {
    let parens = recursive(|this| {
        and_r(vec![
            rune('('),
            opt_loop(or(vec![this, rune_none(vec!['(', ')'])])),
            rune(')'),
        ])
    });
    assert_eq!(parens.run(&Scanner::from_text("(a(b)c)"), 0), Ok(7));
    assert_eq!(parens.run(&reverse("(a(b)c)"), 7), Ok(0));
    assert!(parens.run(&Scanner::from_text("(a(b)c"), 0).is_err());
}

#[test]
fn test_nested_depth_limit() {
    let parens = recursive(|this| {
        nested(and_r(vec![
            rune('('),
            opt_loop(or(vec![this, rune_none(vec!['(', ')'])])),
            rune(')'),
        ]))
    });
    let config = ScanConfig {
        max_depth: 2,
        ..ScanConfig::default()
    };
    let sc = Scanner::with_config(Source::from_text("((a))"), config.clone());
    assert_eq!(parens.run(&sc, 0), Ok(5));
    assert_eq!(sc.depth(), 0);

    let sc = Scanner::with_config(Source::from_text("(((a)))"), config);
    assert_matches!(parens.run(&sc, 0), Err(ScanError::Fatal { at: 2, .. }));
    assert_eq!(sc.depth(), 0);
    sc.set_reverse(true);
    assert_matches!(parens.run(&sc, 7), Err(ScanError::Fatal { at: 5, .. }));
}

#[test]
fn test_fatal_stops_remaining_alternatives() {
    let tried = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&tried);
    let spy = Matcher::new(move |sc: &Scanner, pos: i64| {
        counter.fetch_add(1, Ordering::SeqCst);
        sc.any_rune(pos)
    });
    let m = or(vec![
        and(vec![rune('a'), must(rune('x'), "expected x")]),
        spy,
    ]);
    assert_eq!(
        m.run(&Scanner::from_text("ab"), 0),
        Err(ScanError::fatal(1, "expected x"))
    );
    assert_eq!(tried.load(Ordering::SeqCst), 0);
}
