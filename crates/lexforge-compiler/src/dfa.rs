//! Subset construction.
//!
//! A DFA state stands for the set of NFA states the automaton may be in.
//! Its identity is the closure restricted to significant states (those with
//! range edges or an accept tag): states that only forward epsilon edges
//! cannot change what happens next, so closures that differ only in such
//! states collapse into one DFA state.
//!
//! Layout of the result:
//! - `S0` is the sink: non-accepting, one self-loop over the whole alphabet
//! - `S1` is the start state
//! - every state's transitions partition `0..=MAX_CODE_POINT`

use std::fmt;

use indexmap::IndexMap;

use lexforge_artifact::format_range;
use lexforge_core::{CodePoint, MAX_CODE_POINT};

use crate::error::CompileError;
use crate::invariants::ensure_unlimited;
use crate::nfa::{AcceptTag, Nfa, StateId};

/// Index into [`Dfa::states`].
pub type DfaStateId = u32;

pub const SINK: DfaStateId = 0;
pub const START: DfaStateId = 1;

/// Determinization settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DfaConfig {
    /// Maximum number of DFA states, sink included. `None` means unbounded.
    pub state_limit: Option<usize>,
}

impl DfaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state_limit(mut self, limit: usize) -> Self {
        self.state_limit = Some(limit);
        self
    }
}

/// One disjoint range of a state's transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DfaTransition {
    pub lo: CodePoint,
    pub hi: CodePoint,
    pub target: DfaStateId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DfaState {
    /// Significant NFA states, sorted. Empty only for the sink (and for a
    /// start state with no rules behind it).
    sources: Vec<StateId>,
    /// Sorted, disjoint, covering the alphabet. Adjacent ranges never share
    /// a target.
    transitions: Vec<DfaTransition>,
    accept: Option<AcceptTag>,
}

impl DfaState {
    pub fn sources(&self) -> &[StateId] {
        &self.sources
    }

    pub fn transitions(&self) -> &[DfaTransition] {
        &self.transitions
    }

    pub fn accept(&self) -> Option<AcceptTag> {
        self.accept
    }

    /// Rule priority this state accepts, ignoring the sentinel.
    pub fn accepted_rule(&self) -> Option<u32> {
        self.accept.and_then(AcceptTag::rule)
    }
}

/// Deterministic automaton with total transitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    states: Vec<DfaState>,
}

impl Dfa {
    pub fn states(&self) -> &[DfaState] {
        &self.states
    }

    pub fn state(&self, id: DfaStateId) -> &DfaState {
        &self.states[id as usize]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn start(&self) -> DfaStateId {
        START
    }

    pub fn sink(&self) -> DfaStateId {
        SINK
    }

    /// Successor of `state` on `cp`. Code points past the alphabet go to the sink.
    pub fn step(&self, state: DfaStateId, cp: CodePoint) -> DfaStateId {
        let transitions = &self.state(state).transitions;
        let i = transitions.partition_point(|t| t.hi < cp);
        match transitions.get(i) {
            Some(t) if t.lo <= cp => t.target,
            _ => SINK,
        }
    }

    /// State reached from `state` after consuming all of `input`.
    pub fn run_from(&self, state: DfaStateId, input: &str) -> DfaStateId {
        input
            .chars()
            .fold(state, |current, c| self.step(current, c as CodePoint))
    }

    /// State reached from the start after consuming all of `input`.
    pub fn run(&self, input: &str) -> DfaStateId {
        self.run_from(START, input)
    }
}

/// Determinize without a state limit. Never fails.
pub fn determinize(nfa: &Nfa) -> Dfa {
    let mut builder = Builder::new(nfa, None);
    ensure_unlimited(builder.try_run());
    builder.finish()
}

/// Determinize under `config`.
pub fn determinize_with(nfa: &Nfa, config: &DfaConfig) -> Result<Dfa, CompileError> {
    let mut builder = Builder::new(nfa, config.state_limit);
    builder.try_run()?;
    Ok(builder.finish())
}

struct Builder<'n> {
    nfa: &'n Nfa,
    limit: Option<usize>,
    /// Source set to DFA state id, in discovery order.
    ids: IndexMap<Vec<StateId>, DfaStateId>,
    states: Vec<DfaState>,
}

impl<'n> Builder<'n> {
    fn new(nfa: &'n Nfa, limit: Option<usize>) -> Self {
        let mut builder = Self {
            nfa,
            limit,
            ids: IndexMap::new(),
            states: Vec::new(),
        };

        builder.ids.insert(Vec::new(), SINK);
        builder.states.push(DfaState {
            sources: Vec::new(),
            transitions: vec![DfaTransition {
                lo: 0,
                hi: MAX_CODE_POINT,
                target: SINK,
            }],
            accept: None,
        });

        // The start state is always S1, even when nothing can be matched
        // from it and its source set coincides with the sink's.
        let sources = builder.significant_closure([nfa.start()]);
        if !sources.is_empty() {
            builder.ids.insert(sources.clone(), START);
        }
        let accept = builder.resolve_accept(&sources);
        builder.states.push(DfaState {
            sources,
            transitions: Vec::new(),
            accept,
        });
        builder
    }

    /// Worklist loop: states are processed in discovery order and newly
    /// discovered states are appended, so `states` doubles as the queue.
    fn try_run(&mut self) -> Result<(), CompileError> {
        self.check_limit()?;
        let mut next = START as usize;
        while next < self.states.len() {
            let transitions = self.transitions_of(next as DfaStateId)?;
            self.states[next].transitions = transitions;
            next += 1;
        }
        Ok(())
    }

    fn finish(self) -> Dfa {
        Dfa {
            states: self.states,
        }
    }

    fn check_limit(&self) -> Result<(), CompileError> {
        match self.limit {
            Some(limit) if self.states.len() > limit => {
                Err(CompileError::StateLimitExceeded { limit })
            }
            _ => Ok(()),
        }
    }

    fn significant_closure(&self, seeds: impl IntoIterator<Item = StateId>) -> Vec<StateId> {
        self.nfa
            .epsilon_closure(seeds)
            .into_iter()
            .filter(|&id| self.nfa.state(id).is_significant())
            .collect()
    }

    fn resolve_accept(&self, sources: &[StateId]) -> Option<AcceptTag> {
        sources
            .iter()
            .filter_map(|&id| self.nfa.state(id).accept())
            .min()
    }

    fn intern(&mut self, sources: Vec<StateId>) -> Result<DfaStateId, CompileError> {
        if let Some(&id) = self.ids.get(&sources) {
            return Ok(id);
        }
        let id = self.states.len() as DfaStateId;
        let accept = self.resolve_accept(&sources);
        self.ids.insert(sources.clone(), id);
        self.states.push(DfaState {
            sources,
            transitions: Vec::new(),
            accept,
        });
        self.check_limit()?;
        Ok(id)
    }

    /// Partition the alphabet by the range edges leaving `id`'s members and
    /// map every piece to the closure of its targets.
    fn transitions_of(&mut self, id: DfaStateId) -> Result<Vec<DfaTransition>, CompileError> {
        let nfa = self.nfa;
        let edges: Vec<(CodePoint, CodePoint, StateId)> = self.states[id as usize]
            .sources
            .iter()
            .flat_map(|&s| nfa.state(s).ranges().iter().copied())
            .filter(|&(lo, hi, _)| lo <= hi && lo <= MAX_CODE_POINT)
            .map(|(lo, hi, to)| (lo, hi.min(MAX_CODE_POINT), to))
            .collect();

        // Piece i covers boundaries[i]..boundaries[i + 1].
        let mut boundaries: Vec<CodePoint> = edges
            .iter()
            .flat_map(|&(lo, hi, _)| [lo, hi + 1])
            .collect();
        boundaries.sort_unstable();
        boundaries.dedup();

        let mut targets: Vec<Vec<StateId>> = vec![Vec::new(); boundaries.len().saturating_sub(1)];
        for &(lo, hi, to) in &edges {
            let first = boundaries.partition_point(|&b| b < lo);
            let last = boundaries.partition_point(|&b| b <= hi);
            for piece in &mut targets[first..last] {
                piece.push(to);
            }
        }

        let mut transitions = Vec::new();
        let mut covered: CodePoint = 0;
        for (i, piece) in targets.into_iter().enumerate() {
            if piece.is_empty() {
                continue;
            }
            let lo = boundaries[i];
            let hi = boundaries[i + 1] - 1;
            if lo > covered {
                push_merged(&mut transitions, covered, lo - 1, SINK);
            }
            let target = self.intern(self.significant_closure(piece))?;
            push_merged(&mut transitions, lo, hi, target);
            covered = hi + 1;
        }
        if covered <= MAX_CODE_POINT {
            push_merged(&mut transitions, covered, MAX_CODE_POINT, SINK);
        }
        Ok(transitions)
    }
}

/// Append `lo..=hi -> target`, extending the previous range when it is
/// adjacent and shares the target.
fn push_merged(transitions: &mut Vec<DfaTransition>, lo: CodePoint, hi: CodePoint, target: DfaStateId) {
    if let Some(last) = transitions.last_mut()
        && last.target == target
        && last.hi + 1 == lo
    {
        last.hi = hi;
        return;
    }
    transitions.push(DfaTransition { lo, hi, target });
}

/// Same layout as the artifact dump: sink-bound ranges are omitted.
impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, state) in self.states.iter().enumerate() {
            let id = id as DfaStateId;
            write!(f, "S{id}")?;
            if id == START {
                f.write_str(" start")?;
            }
            if id == SINK {
                f.write_str(" sink")?;
            }
            if let Some(tag) = state.accept {
                write!(f, " accept {tag}")?;
            }
            writeln!(f)?;

            if id == SINK {
                continue;
            }
            for t in state.transitions.iter().filter(|t| t.target != SINK) {
                writeln!(f, "  {} -> S{}", format_range(t.lo, t.hi), t.target)?;
            }
        }
        Ok(())
    }
}
