use indoc::indoc;
use lexforge_core::{GroupId, Pattern};

use super::{parse, parse_with_diagnostics};
use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

fn errors(source: &str) -> Diagnostics {
    match parse(source) {
        Err(Error::DefinitionParseError(diagnostics)) => diagnostics,
        other => panic!("expected parse errors, got {other:?}"),
    }
}

const STRINGS: &str = indoc! {r#"
    # identifiers, numbers and strings
    group main {
        [a-z_] [a-z0-9_]*   => "token ident"
        [0-9]+              => "token number"
        '"'                 => "token quote; push string"
        [ \t\n]+            => "skip"
    }

    group string extends main on_exit "token string_end" {
        [^"\\]+             => "token chunk"
        '"'                 => "pop"
    }
"#};

#[test]
fn parses_groups_and_rules() {
    let definition = parse(STRINGS).unwrap();
    let registry = definition.registry();

    assert_eq!(registry.len(), 2);
    assert_eq!(definition.initial(), GroupId::new(0));

    let main = registry.group_by_name("main").unwrap();
    let actions: Vec<&str> = main.own_rules().iter().map(|r| r.action().as_str()).collect();
    assert_eq!(
        actions,
        vec!["token ident", "token number", "token quote; push string", "skip"]
    );

    let string = registry.group(definition.group("string").unwrap()).unwrap();
    assert_eq!(string.parent(), Some(main.id()));
    assert_eq!(string.on_exit().map(|a| a.as_str()), Some("token string_end"));
    assert_eq!(registry.effective_rules(string.id()).len(), 6);
}

#[test]
fn patterns_follow_precedence() {
    let definition = parse(r#"group g { "a" "b"* | 'c'+ => "x" }"#).unwrap();
    let rule = &definition.registry().group_by_name("g").unwrap().own_rules()[0];
    assert_eq!(
        rule.pattern(),
        &Pattern::alt(
            Pattern::concat(Pattern::char('a'), Pattern::repeat(Pattern::char('b'))),
            Pattern::many1(Pattern::char('c')),
        )
    );
    assert_eq!(rule.pattern().to_string(), "'a' 'b'* | 'c' 'c'*");
}

#[test]
fn postfix_runs_collapse() {
    let definition = parse(indoc! {r#"
        group g {
            'a'*+? => "star"
            'b'++  => "plus"
            'c'??  => "opt"
        }
    "#})
    .unwrap();
    let shown: Vec<String> = definition.registry().groups().next().unwrap().own_rules()
        .iter()
        .map(|r| r.pattern().to_string())
        .collect();
    assert_eq!(shown, ["'a'*", "'b' 'b'*", "'c' | eps"]);
}

#[test]
fn many_alternatives_and_items() {
    let alternatives = vec!["'x'"; 20_000].join(" | ");
    let items = vec!["[a-z]"; 20_000].join(" ");
    let source = format!(r#"group g {{ {alternatives} => "alts" {items} => "items" }}"#);
    let definition = parse(&source).unwrap();
    let rules = definition.registry().groups().next().unwrap().own_rules();
    assert_eq!(rules[0].pattern(), &Pattern::choice(vec![Pattern::char('x'); 20_000]));
    assert_eq!(rules[1].pattern().size(), 2 * 20_000 - 1);
}

#[test]
fn atoms() {
    let definition = parse(indoc! {r#"
        group g {
            .          => "any"
            never      => "never"
            eps        => "empty"
            ('x' 'y')? => "opt"
            ""         => "empty string"
        }
    "#})
    .unwrap();
    let patterns: Vec<Pattern> = definition.registry().groups().next().unwrap().own_rules()
        .iter()
        .map(|r| r.pattern().clone())
        .collect();
    assert_eq!(
        patterns,
        vec![
            Pattern::any(),
            Pattern::never(),
            Pattern::epsilon(),
            Pattern::opt(Pattern::literal("xy")),
            Pattern::epsilon(),
        ]
    );
}

#[test]
fn forward_parent_and_initial_marker() {
    let definition = parse(indoc! {r#"
        group inner extends outer { 'i' => "token i" }
        initial group outer { 'o' => "token o" }
    "#})
    .unwrap();
    assert_eq!(definition.initial(), definition.group("outer").unwrap());

    let artifact = definition.generator().generate_all().unwrap();
    assert_eq!(artifact.initial, 1);
    assert_eq!(artifact.groups[0].bindings[1].action.as_str(), "token o");
}

#[test]
fn duplicate_group() {
    let diagnostics = errors(indoc! {r#"
        group main { 'a' => "a" }
        group main { 'b' => "b" }
    "#});
    insta::assert_snapshot!(diagnostics.to_string(), @"error at 32..36: group `main` is already defined (related: first defined here at 6..10)");
}

#[test]
fn unknown_parent() {
    let diagnostics = errors(r#"group a extends b { 'a' => "a" }"#);
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::UnknownParent]);
    assert_eq!(diagnostics.to_string(), "error at 16..17: `b` is not a group");
}

#[test]
fn cyclic_parent() {
    let diagnostics = errors(indoc! {r#"
        group a extends b { 'a' => "a" }
        group b extends a { 'b' => "b" }
    "#});
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::CyclicParent]);
    assert!(
        diagnostics
            .to_string()
            .contains("`b` is already an ancestor of `a`")
    );
}

#[test]
fn self_parent_is_cyclic() {
    let diagnostics = errors(r#"group a extends a { 'a' => "a" }"#);
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::CyclicParent]);
}

#[test]
fn missing_action() {
    let diagnostics = errors(indoc! {r#"
        group g {
            'a' => "a"
            'b'
        }
        group h {
            'd' => "d"
            'c' =>
        }
    "#});
    assert_eq!(
        diagnostics.kinds(),
        vec![DiagnosticKind::ExpectedAction, DiagnosticKind::ExpectedAction]
    );
}

#[test]
fn recovers_after_bad_rule() {
    let (definition, diagnostics) = parse_with_diagnostics(indoc! {r#"
        group g {
            ) => "broken"
            'a' => "a"
        }
        group h { 'b' => "b" }
    "#});
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::ExpectedPattern]);
    assert_eq!(definition.registry().len(), 2);
    assert_eq!(
        definition.registry().groups().next().unwrap().own_rules().len(),
        1
    );
}

#[test]
fn lexical_errors() {
    let cases = [
        ("\"abc", DiagnosticKind::UnterminatedString),
        ("[abc", DiagnosticKind::UnterminatedClass),
        ("[z-a] => \"z\"", DiagnosticKind::InvalidClassRange),
        ("'q\\w' => \"w\"", DiagnosticKind::InvalidEscape),
        ("@ => \"at\"", DiagnosticKind::UnexpectedToken),
    ];
    for (line, kind) in cases {
        let source = format!("group g {{\n    'a' => \"a\"\n    {line}\n}}\n");
        assert_eq!(errors(&source).kinds(), vec![kind], "{line}");
    }
}

#[test]
fn garbage_is_reported_once() {
    let diagnostics = errors("group g { 'a' => \"a\" @@@ => \"x\" }");
    assert_eq!(
        diagnostics.to_string(),
        "error at 21..24: unexpected token: `@@@`"
    );
}

#[test]
fn unclosed_group_and_paren() {
    let diagnostics = errors(indoc! {r#"
        group g { 'z' => "z" ('a' => "a"
        group h { 'b' => "b"
    "#});
    assert_eq!(
        diagnostics.kinds(),
        vec![
            DiagnosticKind::UnclosedParen,
            DiagnosticKind::UnclosedGroup,
            DiagnosticKind::UnclosedGroup
        ]
    );
}

#[test]
fn header_errors() {
    let diagnostics = errors(indoc! {r#"
        group { }
        group a extends { }
        group b on_exit { }
        group c 'x'
        stray
        group d { 'd' => "d" }
    "#});
    assert_eq!(
        diagnostics.kinds(),
        vec![
            DiagnosticKind::ExpectedGroupName,
            DiagnosticKind::ExpectedGroupName,
            DiagnosticKind::ExpectedAction,
            DiagnosticKind::ExpectedOpenBrace,
        ]
    );
}

#[test]
fn stray_top_level_token() {
    let diagnostics = errors(r#"main { 'a' => "a" }"#);
    assert_eq!(diagnostics.kinds()[0], DiagnosticKind::UnexpectedToken);
    assert!(
        diagnostics
            .to_string()
            .starts_with("error at 0..4: unexpected token: found identifier, expected `group`")
    );
}

#[test]
fn multiple_initial() {
    let diagnostics = errors(indoc! {r#"
        initial group a { 'a' => "a" }
        initial group b { 'b' => "b" }
    "#});
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::MultipleInitial]);
}

#[test]
fn empty_definition() {
    let diagnostics = errors("# nothing here\n");
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::NoGroups]);
}

#[test]
fn empty_group_is_a_warning() {
    let (definition, diagnostics) = parse_with_diagnostics("group idle { }");
    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::EmptyGroup]);
    assert!(parse("group idle { }").is_ok());
    assert_eq!(definition.registry().len(), 1);
}

#[test]
fn deep_nesting_is_rejected() {
    let depth = super::MAX_NESTING as usize + 1;
    let source = format!(
        "group g {{ {}'a'{} => \"a\" }}",
        "(".repeat(depth),
        ")".repeat(depth)
    );
    let diagnostics = errors(&source);
    assert_eq!(diagnostics.kinds()[0], DiagnosticKind::NestingTooDeep);
}

#[test]
fn render_against_source() {
    let source = "group a extends missing { 'a' => \"a\" }\n";
    let diagnostics = errors(source);
    let out = diagnostics.printer().source(source).path("lexer.lex").render();
    assert!(out.contains("`missing` is not a group"));
    assert!(out.contains("lexer.lex:1:17"));
}
