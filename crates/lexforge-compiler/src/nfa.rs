//! NFA construction.
//!
//! Each group compiles to one automaton:
//!
//! ```text
//! start --eps--> entry(rule 0) ... exit(rule 0, accepts Rule(0)) --eps--+
//!       --eps--> entry(rule 1) ... exit(rule 1, accepts Rule(1)) --eps--+--> end (Sentinel)
//! ```
//!
//! States live in an arena and are never removed, so a [`StateId`] stays
//! valid for the lifetime of the automaton.

use std::collections::HashSet;
use std::fmt;

use lexforge_artifact::format_range;
use lexforge_core::{CodePoint, GroupId, Pattern, Registry};

use crate::invariants::{ensure_group, ensure_untagged};

/// Index into [`Nfa::states`].
pub type StateId = u32;

/// What a state accepts.
///
/// Ordered by priority: the smallest tag among simultaneously reachable
/// states wins, so earlier rules beat later ones and any rule beats the
/// sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AcceptTag {
    /// Position of the rule in the group's effective order.
    Rule(u32),
    /// Shared end state: some rule completed, no specific one.
    Sentinel,
}

impl AcceptTag {
    pub fn rule(self) -> Option<u32> {
        match self {
            AcceptTag::Rule(priority) => Some(priority),
            AcceptTag::Sentinel => None,
        }
    }
}

impl fmt::Display for AcceptTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcceptTag::Rule(priority) => write!(f, "rule{priority}"),
            AcceptTag::Sentinel => f.write_str("end"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NfaState {
    /// Sorted, without duplicates.
    pub(crate) epsilon: Vec<StateId>,
    pub(crate) ranges: Vec<(CodePoint, CodePoint, StateId)>,
    pub(crate) accept: Option<AcceptTag>,
}

impl NfaState {
    pub fn epsilon(&self) -> &[StateId] {
        &self.epsilon
    }

    /// Range edges `(lo, hi, target)` in insertion order.
    pub fn ranges(&self) -> &[(CodePoint, CodePoint, StateId)] {
        &self.ranges
    }

    pub fn accept(&self) -> Option<AcceptTag> {
        self.accept
    }

    /// States that can consume input or accept. Only these distinguish one
    /// epsilon closure from another.
    pub fn is_significant(&self) -> bool {
        !self.ranges.is_empty() || self.accept.is_some()
    }
}

/// Arena-backed nondeterministic automaton.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nfa {
    pub(crate) states: Vec<NfaState>,
    start: StateId,
    end: Option<StateId>,
}

impl Default for Nfa {
    fn default() -> Self {
        Self::new()
    }
}

impl Nfa {
    /// Automaton holding only its start state.
    pub fn new() -> Self {
        Self {
            states: vec![NfaState::default()],
            start: 0,
            end: None,
        }
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    /// Shared end state, once [`build`] has linked the rule exits.
    pub fn end(&self) -> Option<StateId> {
        self.end
    }

    pub fn states(&self) -> &[NfaState] {
        &self.states
    }

    pub fn state(&self, id: StateId) -> &NfaState {
        &self.states[id as usize]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn add_state(&mut self) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(NfaState::default());
        id
    }

    pub fn add_epsilon(&mut self, from: StateId, to: StateId) {
        let edges = &mut self.ensure_state_mut(from).epsilon;
        if let Err(at) = edges.binary_search(&to) {
            edges.insert(at, to);
        }
    }

    pub fn add_range(&mut self, from: StateId, lo: CodePoint, hi: CodePoint, to: StateId) {
        self.ensure_state_mut(from).ranges.push((lo, hi, to));
    }

    pub fn set_accept(&mut self, id: StateId, tag: AcceptTag) {
        let state = self.ensure_state_mut(id);
        ensure_untagged(state, id);
        state.accept = Some(tag);
    }

    /// Every state reachable from `seeds` through epsilon edges alone,
    /// seeds included. Sorted by id.
    pub fn epsilon_closure(&self, seeds: impl IntoIterator<Item = StateId>) -> Vec<StateId> {
        let mut seen: HashSet<StateId> = HashSet::new();
        let mut stack: Vec<StateId> = seeds.into_iter().filter(|&s| seen.insert(s)).collect();

        while let Some(id) = stack.pop() {
            for &next in &self.state(id).epsilon {
                if seen.insert(next) {
                    stack.push(next);
                }
            }
        }

        let mut closure: Vec<StateId> = seen.into_iter().collect();
        closure.sort_unstable();
        closure
    }

    /// States reachable from `from` over any edge.
    pub fn reachable(&self, from: StateId) -> Vec<bool> {
        let mut seen = vec![false; self.states.len()];
        let mut stack = vec![from];
        seen[from as usize] = true;
        while let Some(id) = stack.pop() {
            let state = self.state(id);
            let targets = state
                .epsilon
                .iter()
                .copied()
                .chain(state.ranges.iter().map(|&(_, _, to)| to));
            for next in targets {
                if !seen[next as usize] {
                    seen[next as usize] = true;
                    stack.push(next);
                }
            }
        }
        seen
    }
}

/// Build the automaton for `group`'s effective rules.
///
/// Rule `k` of the effective order gets its own entry state, linked from the
/// start by an epsilon edge, and its exit is tagged `AcceptTag::Rule(k)`.
///
/// # Panics
/// If `group` was not issued by `registry`.
pub fn build(registry: &Registry, group: GroupId) -> Nfa {
    ensure_group(registry, group);

    let mut nfa = Nfa::new();
    let rules = registry.effective_rules(group);
    let mut exits = Vec::with_capacity(rules.len());

    for (priority, rule) in rules.iter().enumerate() {
        let entry = nfa.add_state();
        nfa.add_epsilon(nfa.start, entry);
        let exit = compile(&mut nfa, entry, rule.pattern());
        nfa.set_accept(exit, AcceptTag::Rule(priority as u32));
        exits.push(exit);
    }

    let end = nfa.add_state();
    nfa.set_accept(end, AcceptTag::Sentinel);
    for exit in exits {
        nfa.add_epsilon(exit, end);
    }
    nfa.end = Some(end);
    nfa
}

/// Compile `pattern` starting at `entry`; returns the exit state.
///
/// Every state created here is reachable from `entry`, except the fresh
/// state returned for `Never`.
pub fn compile(nfa: &mut Nfa, entry: StateId, pattern: &Pattern) -> StateId {
    match pattern {
        Pattern::Never => nfa.add_state(),
        Pattern::Epsilon => entry,
        Pattern::CodeRange(lo, hi) => {
            let exit = nfa.add_state();
            nfa.add_range(entry, *lo, *hi, exit);
            exit
        }
        Pattern::Concat(first, second) => {
            let middle = compile(nfa, entry, first);
            compile(nfa, middle, second)
        }
        Pattern::Repeat(body) => {
            let loop_entry = nfa.add_state();
            let body_exit = compile(nfa, loop_entry, body);
            let loop_exit = nfa.add_state();
            nfa.add_epsilon(entry, loop_entry);
            nfa.add_epsilon(entry, loop_exit);
            nfa.add_epsilon(body_exit, loop_exit);
            nfa.add_epsilon(loop_exit, loop_entry);
            loop_exit
        }
        Pattern::Alt(left, right) => {
            let left_exit = compile(nfa, entry, left);
            let right_exit = compile(nfa, entry, right);
            let join = nfa.add_state();
            nfa.add_epsilon(left_exit, join);
            nfa.add_epsilon(right_exit, join);
            join
        }
    }
}

/// One line per state, edges indented below it.
impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, state) in self.states.iter().enumerate() {
            write!(f, "N{id}")?;
            if id as StateId == self.start {
                f.write_str(" start")?;
            }
            if let Some(tag) = state.accept {
                write!(f, " accept {tag}")?;
            }
            writeln!(f)?;

            if !state.epsilon.is_empty() {
                let targets: Vec<String> = state.epsilon.iter().map(|t| format!("N{t}")).collect();
                writeln!(f, "  eps -> {}", targets.join(", "))?;
            }
            for &(lo, hi, to) in &state.ranges {
                if lo > hi {
                    writeln!(f, "  never -> N{to}")?;
                } else {
                    writeln!(f, "  {} -> N{to}", format_range(lo, hi))?;
                }
            }
        }
        Ok(())
    }
}
