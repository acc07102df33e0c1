//! Cross-checks DFA acceptance against `regex-automata` on small alphabets.

use regex_automata::Input;
use regex_automata::dfa::{Automaton, dense};

use lexforge_core::Pattern;

use crate::dfa::Dfa;
use crate::nfa::AcceptTag;
use crate::test_utils::dfa_for;

fn words(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut out = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for word in &frontier {
            for &c in alphabet {
                let mut w = word.clone();
                w.push(c);
                next.push(w);
            }
        }
        out.extend(next.iter().cloned());
        frontier = next;
    }
    out
}

fn accepts(dfa: &Dfa, input: &str) -> bool {
    dfa.state(dfa.run(input)).accept() == Some(AcceptTag::Rule(0))
}

fn check(pattern: Pattern, regex: &str) {
    let dfa = dfa_for(vec![(pattern.clone(), "rule")]);
    let oracle = dense::DFA::new(&format!("^(?:{regex})$")).unwrap();

    for word in words(&['a', 'b', 'c'], 5) {
        let expected = oracle
            .try_search_fwd(&Input::new(word.as_str()))
            .unwrap()
            .is_some();
        assert_eq!(
            accepts(&dfa, &word),
            expected,
            "{pattern} vs /{regex}/ on {word:?}"
        );
    }
}

#[test]
fn literal() {
    check(Pattern::literal("abc"), "abc");
}

#[test]
fn star_of_alternation() {
    check(Pattern::repeat(Pattern::any_of("ab")), "[ab]*");
}

#[test]
fn nested_repeat() {
    check(
        Pattern::repeat(Pattern::concat(
            Pattern::char('a'),
            Pattern::repeat(Pattern::char('b')),
        )),
        "(?:ab*)*",
    );
}

#[test]
fn optional_and_plus() {
    check(
        Pattern::opt(Pattern::char('c')) >> Pattern::many1(Pattern::literal("ab")),
        "c?(?:ab)+",
    );
}

#[test]
fn negated_set() {
    check(
        Pattern::many1(Pattern::none_of("c")) >> Pattern::char('c'),
        "[^c]+c",
    );
}

#[test]
fn alternation_with_empty() {
    check(
        Pattern::choice([
            Pattern::literal("ab"),
            Pattern::epsilon(),
            Pattern::literal("cab"),
            Pattern::never(),
        ]),
        "ab||cab",
    );
}

#[test]
fn star_star() {
    check(
        Pattern::repeat(Pattern::repeat(Pattern::char('a')) >> Pattern::char('b')),
        "(?:a*b)*",
    );
}
