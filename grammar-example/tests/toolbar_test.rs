use grammar_example::{parse_toolbar, ToolbarData};
use pretty_assertions::assert_eq;
use value_framework::AstNode;

fn part_texts(data: &ToolbarData) -> Vec<&str> {
    data.parts.iter().map(|p| p.text.as_str()).collect()
}

fn arg_texts(data: &ToolbarData, part: usize) -> Vec<&str> {
    data.parts[part].args.iter().map(|a| a.text.as_str()).collect()
}

#[test]
fn test_escaped_separators_stay_in_part() {
    let data = parse_toolbar(r"a\ aa\|aa|bb").unwrap();
    assert_eq!(part_texts(&data), vec![r"a\ aa\|aa", "bb"]);
    assert_eq!(arg_texts(&data, 0), vec![r"a\ aa\|aa"]);
}

#[test]
fn test_unterminated_quote_is_plain_text() {
    let data = parse_toolbar(r#"cmd1|"cmd2\|cmd3"#).unwrap();
    assert_eq!(part_texts(&data), vec!["cmd1", r#""cmd2\|cmd3"#]);
}

#[test]
fn test_quoted_arg_keeps_spaces_and_pipes() {
    let data = parse_toolbar(r#"echo "a b|c" 'x' `y z`|ls"#).unwrap();
    assert_eq!(data.parts.len(), 2);
    assert_eq!(arg_texts(&data, 0), vec!["echo", r#""a b|c""#, "'x'", "`y z`"]);
}

#[test]
fn test_escaped_quote_inside_quotes() {
    let data = parse_toolbar(r#""aa\"""#).unwrap();
    assert_eq!(data.parts[0].args.len(), 1);
    assert_eq!(data.parts[0].args[0].text.len(), 6);
}

#[test]
fn test_newline_separates_parts() {
    let data = parse_toolbar("a\nb c").unwrap();
    assert_eq!(part_texts(&data), vec!["a", "b c"]);
    assert_eq!(arg_texts(&data, 1), vec!["b", "c"]);
}

#[test]
fn test_trailing_separator() {
    let data = parse_toolbar("a|").unwrap();
    assert_eq!(part_texts(&data), vec!["a", ""]);
    assert!(data.parts[1].args.is_empty());
}

#[test]
fn test_empty_text() {
    let data = parse_toolbar("").unwrap();
    assert_eq!(data.parts.len(), 1);
    assert!(data.parts[0].args.is_empty());
}

#[test]
fn test_spans_include_padding() {
    let data = parse_toolbar(" ab  |cd").unwrap();
    let first = &data.parts[0];
    assert_eq!((first.start(), first.end()), (0, 5));
    assert_eq!(first.trimmed_str(), "ab");
    assert_eq!((first.args[0].start(), first.args[0].end()), (1, 3));
    assert_eq!((data.parts[1].start(), data.parts[1].end()), (6, 8));
}

#[test]
fn test_part_at() {
    let data = parse_toolbar("ls|pwd").unwrap();
    assert_eq!(data.part_at(0).map(|p| p.trimmed_str()), Some("ls"));
    assert_eq!(data.part_at(2).map(|p| p.trimmed_str()), Some("ls"));
    assert_eq!(data.part_at(4).map(|p| p.trimmed_str()), Some("pwd"));
    assert_eq!(data.part_at(6).map(|p| p.trimmed_str()), Some("pwd"));
    assert!(data.part_at(7).is_none());
}
