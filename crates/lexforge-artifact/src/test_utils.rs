//! Hand-built artifacts shared by the unit tests.

use lexforge_core::{Action, MAX_CODE_POINT};

use crate::format::{Binding, GroupArtifact, LexerArtifact, StateEntry, Transition};

fn t(lo: char, hi: char, target: u32) -> Transition {
    Transition {
        lo: lo as u32,
        hi: hi as u32,
        target,
    }
}

fn fill(ranges: Vec<Transition>) -> Vec<Transition> {
    let mut out = Vec::new();
    let mut next = 0;
    for r in ranges {
        if r.lo > next {
            out.push(Transition { lo: next, hi: r.lo - 1, target: 0 });
        }
        next = r.hi + 1;
        out.push(r);
    }
    if next <= MAX_CODE_POINT {
        out.push(Transition { lo: next, hi: MAX_CODE_POINT, target: 0 });
    }
    out
}

fn state(id: u32, transitions: Vec<Transition>, action: Option<&str>) -> StateEntry {
    StateEntry {
        id,
        transitions: fill(transitions),
        action: action.map(str::to_string),
    }
}

fn binding(tag: &str, action: &str) -> Binding {
    Binding {
        tag: tag.to_string(),
        action: Action::new(action),
    }
}

/// Two groups: `main` lexes `a` and single digits, `string` extends it and
/// accepts a closing quote.
pub fn sample_artifact() -> LexerArtifact {
    let main = GroupArtifact {
        index: 0,
        name: "main".to_string(),
        parent: None,
        start: 1,
        sink: 0,
        states: vec![
            state(0, vec![], None),
            state(1, vec![t('0', '9', 3), t('a', 'a', 2)], None),
            state(2, vec![], Some("group0_rule0")),
            state(3, vec![], Some("group0_rule1")),
        ],
        bindings: vec![
            binding("group0_rule0", "token a"),
            binding("group0_rule1", "token digit"),
        ],
        on_exit: None,
    };
    let string = GroupArtifact {
        index: 1,
        name: "string".to_string(),
        parent: Some(0),
        start: 1,
        sink: 0,
        states: vec![
            state(0, vec![], None),
            state(1, vec![t('"', '"', 2)], None),
            state(2, vec![], Some("group1_rule0")),
        ],
        bindings: vec![binding("group1_rule0", "pop")],
        on_exit: Some(binding("group1_on_exit", "token end")),
    };
    LexerArtifact {
        initial: 0,
        groups: vec![main, string],
    }
}
