use lexforge_core::{MAX_CODE_POINT, Pattern};

use super::literal::{class_pattern, string_pattern, string_value, unescape};
use crate::diagnostics::{DiagnosticKind, Diagnostics, Span};

fn chars(body: &str) -> (String, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let text = unescape(body, 0, &mut diagnostics)
        .into_iter()
        .map(|u| u.ch)
        .collect();
    (text, diagnostics)
}

#[test]
fn simple_escapes() {
    let (text, diagnostics) = chars(r#"a\n\r\t\\\'\"\[\]\-\^"#);
    assert_eq!(text, "a\n\r\t\\'\"[]-^");
    assert!(diagnostics.is_empty());
}

#[test]
fn unicode_escapes() {
    let (text, diagnostics) = chars(r"\u{41}\u{3bb}\u{10FFFF}");
    assert_eq!(text, "A\u{3bb}\u{10FFFF}");
    assert!(diagnostics.is_empty());
}

#[test]
fn invalid_escapes_are_reported() {
    let (text, diagnostics) = chars(r"a\qb\u{D800}c\u{}");
    assert_eq!(text, "abc");
    assert_eq!(
        diagnostics.kinds(),
        vec![DiagnosticKind::InvalidEscape; 3]
    );
    insta::assert_snapshot!(diagnostics.to_string(), @r#"
    error at 1..3: invalid escape: `\q` (hint: valid escapes: \n \r \t \\ \' \" \[ \] \- \^ \u{HEX})
    error at 4..12: invalid escape: `\u{D800}` (hint: valid escapes: \n \r \t \\ \' \" \[ \] \- \^ \u{HEX})
    error at 13..17: invalid escape: `\u{}` (hint: valid escapes: \n \r \t \\ \' \" \[ \] \- \^ \u{HEX})
    "#);
}

#[test]
fn unit_spans_are_offset() {
    let mut diagnostics = Diagnostics::new();
    let units = unescape(r"x\ty", 10, &mut diagnostics);
    let spans: Vec<Span> = units.iter().map(|u| u.span).collect();
    assert_eq!(spans, vec![Span::new(10, 11), Span::new(11, 13), Span::new(13, 14)]);
    assert!(units[1].escaped);
}

#[test]
fn string_literals() {
    let mut diagnostics = Diagnostics::new();
    assert_eq!(string_pattern("\"ab\"", 0, &mut diagnostics), Pattern::literal("ab"));
    assert_eq!(string_pattern("''", 0, &mut diagnostics), Pattern::epsilon());
    assert_eq!(
        string_value(r#""push \"q\"""#, 0, &mut diagnostics),
        "push \"q\""
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn class_ranges_and_literals() {
    let mut diagnostics = Diagnostics::new();
    let pattern = class_pattern("[a-c_0-9-]", 0, &mut diagnostics);
    assert_eq!(
        pattern,
        Pattern::choice([
            Pattern::char('-'),
            Pattern::char_range('0', '9'),
            Pattern::char('_'),
            Pattern::char_range('a', 'c'),
        ])
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn class_merges_overlaps() {
    let mut diagnostics = Diagnostics::new();
    let pattern = class_pattern("[a-fd-kl]", 0, &mut diagnostics);
    assert_eq!(pattern, Pattern::char_range('a', 'l'));
}

#[test]
fn negated_class() {
    let mut diagnostics = Diagnostics::new();
    let pattern = class_pattern(r#"[^"\\]"#, 0, &mut diagnostics);
    assert_eq!(
        pattern,
        Pattern::choice([
            Pattern::range(0, '"' as u32 - 1),
            Pattern::range('"' as u32 + 1, '\\' as u32 - 1),
            Pattern::range('\\' as u32 + 1, MAX_CODE_POINT),
        ])
    );
}

#[test]
fn empty_classes() {
    let mut diagnostics = Diagnostics::new();
    assert_eq!(class_pattern("[]", 0, &mut diagnostics), Pattern::never());
    assert_eq!(class_pattern("[^]", 0, &mut diagnostics), Pattern::any());
}

#[test]
fn escaped_dash_and_caret_are_literal() {
    let mut diagnostics = Diagnostics::new();
    assert_eq!(
        class_pattern(r"[\^a\-c]", 0, &mut diagnostics),
        Pattern::choice([Pattern::char('-'), Pattern::char('^'), Pattern::char('a'), Pattern::char('c')])
    );
}

#[test]
fn reversed_range_is_reported() {
    let mut diagnostics = Diagnostics::new();
    let pattern = class_pattern("[z-ax]", 4, &mut diagnostics);
    assert_eq!(pattern, Pattern::char('x'));
    assert_eq!(
        diagnostics.to_string(),
        "error at 5..8: invalid class range: `z` sorts after `a`"
    );
}
