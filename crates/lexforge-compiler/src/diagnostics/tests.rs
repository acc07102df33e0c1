use super::*;

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedPattern, Span::new(0, 5))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.to_string(), "error at 0..5: expected a pattern");
}

#[test]
fn report_with_detail() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownParent, Span::new(20, 24))
        .message("base")
        .emit();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, Span::new(3, 4))
        .message("`=>`")
        .emit();

    insta::assert_snapshot!(diagnostics.to_string(), @r"
    error at 20..24: `base` is not a group
    error at 3..4: unexpected token: `=>`
    ");
}

#[test]
fn related_and_hints() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateGroup, Span::new(30, 34))
        .message("main")
        .related_to("first defined here", Span::new(6, 10))
        .hint("rename one of the groups")
        .emit();

    assert_eq!(
        diagnostics.to_string(),
        "error at 30..34: group `main` is already defined \
         (related: first defined here at 6..10) (hint: rename one of the groups)"
    );
}

#[test]
fn default_hint_is_attached() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedAction, Span::at(7))
        .emit();
    assert!(diagnostics.to_string().contains("(hint: e.g., `[0-9]+ => \"token number\"`)"));
}

#[test]
fn warnings_are_counted_separately() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::EmptyGroup, Span::new(0, 4))
        .message("main")
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.error_count(), 0);
    assert_eq!(diagnostics.warning_count(), 1);
}

#[test]
fn extend_keeps_order() {
    let mut first = Diagnostics::new();
    first.report(DiagnosticKind::NoGroups, Span::at(0)).emit();
    let mut second = Diagnostics::new();
    second
        .report(DiagnosticKind::UnclosedGroup, Span::at(3))
        .emit();

    first.extend(second);
    assert_eq!(
        first.kinds(),
        vec![DiagnosticKind::NoGroups, DiagnosticKind::UnclosedGroup]
    );
}

#[test]
fn printer_without_source_is_plain() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::InvalidClassRange, Span::new(1, 4))
        .message("`z-a`")
        .emit();

    assert_eq!(
        diagnostics.printer().render(),
        "error at 1..4: invalid class range: `z-a`"
    );
}

#[test]
fn printer_with_source() {
    let source = "group main {\n  'a' => \n}\n";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedAction, Span::at(21))
        .emit();

    let out = diagnostics.printer().source(source).path("lexer.lex").render();
    assert!(out.contains("error: expected `=>` followed by an action string"));
    assert!(out.contains("lexer.lex"));
    assert!(out.contains("'a' =>"));
    assert!(out.contains("= help: e.g."));
}

#[test]
fn span_helpers() {
    let span = Span::from(3..7);
    assert_eq!(span.range(), 3..7);
    assert_eq!(span.cover(Span::new(1, 4)), Span::new(1, 7));
    assert_eq!(Span::at(5).range(), 5..5);
}
