use indoc::indoc;
use lexforge_compiler::{Definition, parse};
use lexforge_core::Colors;

use super::dump::{Stage, render};

const LEXER: &str = indoc! {r#"
    group main {
        'a' => "token a"
    }

    group inner extends main {
        'b' => "pop"
    }
"#};

fn definition() -> Definition {
    parse(LEXER).unwrap()
}

#[test]
fn nfa_of_one_group() {
    let out = render(&definition(), Stage::Nfa, Some("main"), None, Colors::OFF).unwrap();

    insta::assert_snapshot!(out, @r"
    group0 main
      N0 start
        eps -> N1
      N1
        'a' -> N2
      N2 accept rule0
        eps -> N3
      N3 accept end
    ");
}

#[test]
fn dfa_puts_own_rules_first() {
    let out = render(&definition(), Stage::Dfa, Some("inner"), None, Colors::OFF).unwrap();

    insta::assert_snapshot!(out, @r"
    group1 inner
      S0 sink
      S1 start
        'a' -> S2
        'b' -> S3
      S2 accept rule1
      S3 accept rule0
    ");
}

#[test]
fn artifact_of_one_group() {
    let out = render(&definition(), Stage::Artifact, Some("inner"), None, Colors::OFF).unwrap();

    insta::assert_snapshot!(out, @r#"
    group1 inner extends group0
      rules
        group1_rule0 = "pop"
        group1_rule1 = "token a"
      states
        S0 sink
        S1 start
          'a' -> S2
          'b' -> S3
        S2 accept group1_rule1
        S3 accept group1_rule0
    "#);
}

#[test]
fn every_group_by_default() {
    let out = render(&definition(), Stage::Dfa, None, None, Colors::OFF).unwrap();

    assert!(out.starts_with("group0 main\n"));
    assert!(out.contains("\n\ngroup1 inner\n"));
}

#[test]
fn artifact_marks_initial_group() {
    let out = render(&definition(), Stage::Artifact, None, None, Colors::OFF).unwrap();

    assert!(out.starts_with("group0 main (initial)\n"));
}

#[test]
fn unknown_group() {
    let err = render(&definition(), Stage::Nfa, Some("string"), None, Colors::OFF).unwrap_err();

    insta::assert_snapshot!(err, @"no group named `string`");
}

#[test]
fn state_limit_is_reported() {
    let err = render(&definition(), Stage::Dfa, None, Some(2), Colors::OFF).unwrap_err();

    insta::assert_snapshot!(err, @"group `main`: DFA state limit exceeded (2 states)");
}
