//! Shared fixtures for compiler tests.

use lexforge_core::{GroupId, MAX_CODE_POINT, Pattern, Registry};

use crate::dfa::{Dfa, determinize};
use crate::nfa::{Nfa, build};

/// One group named `main` holding `rules` in order.
pub fn single_group(rules: Vec<(Pattern, &str)>) -> (Registry, GroupId) {
    let mut registry = Registry::new();
    let main = registry.new_group("main", None);
    for (pattern, action) in rules {
        let _ = registry.rule(main, pattern).bind_action(action);
    }
    (registry, main)
}

pub fn nfa_for(rules: Vec<(Pattern, &str)>) -> Nfa {
    let (registry, main) = single_group(rules);
    build(&registry, main)
}

pub fn dfa_for(rules: Vec<(Pattern, &str)>) -> Dfa {
    determinize(&nfa_for(rules))
}

/// Every state's transitions cover the alphabet exactly once, in order.
pub fn assert_total(dfa: &Dfa) {
    for (id, state) in dfa.states().iter().enumerate() {
        let mut expected = 0;
        for t in state.transitions() {
            assert_eq!(t.lo, expected, "S{id}: gap or overlap at {expected:#x}");
            assert!(t.lo <= t.hi, "S{id}: empty range");
            assert!((t.target as usize) < dfa.len(), "S{id}: dangling target");
            expected = t.hi + 1;
        }
        assert_eq!(expected, MAX_CODE_POINT + 1, "S{id}: alphabet not covered");
    }
}
