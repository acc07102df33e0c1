//! Artifact data types.
//!
//! One [`GroupArtifact`] per lexical group. Each holds the group's DFA as a
//! list of dispatch entries whose transition tables partition the whole
//! alphabet, plus the action bindings a runtime needs to fire rules.

use serde::{Deserialize, Serialize};

use lexforge_core::{Action, CodePoint, MAX_CODE_POINT};

use crate::error::ArtifactError;

/// Generated description of every group of a lexer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexerArtifact {
    /// Index of the group the runtime starts in.
    pub initial: u32,
    /// Indexed by group index.
    pub groups: Vec<GroupArtifact>,
}

/// Dispatch tables and bindings for one group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupArtifact {
    pub index: u32,
    pub name: String,
    pub parent: Option<u32>,
    pub start: u32,
    /// Non-accepting state every unmatched code point leads to.
    pub sink: u32,
    pub states: Vec<StateEntry>,
    /// Rule tag to action, in effective rule order.
    pub bindings: Vec<Binding>,
    pub on_exit: Option<Binding>,
}

/// One DFA state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEntry {
    pub id: u32,
    /// Sorted, disjoint and covering `0..=MAX_CODE_POINT`.
    pub transitions: Vec<Transition>,
    /// Tag of the rule this state accepts, if any.
    pub action: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub lo: CodePoint,
    pub hi: CodePoint,
    pub target: u32,
}

impl Transition {
    pub fn contains(&self, cp: CodePoint) -> bool {
        self.lo <= cp && cp <= self.hi
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub tag: String,
    pub action: Action,
}

impl LexerArtifact {
    pub fn group(&self, index: u32) -> Option<&GroupArtifact> {
        self.groups.get(index as usize)
    }

    pub fn group_by_name(&self, name: &str) -> Option<&GroupArtifact> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Total number of DFA states across all groups.
    pub fn state_count(&self) -> usize {
        self.groups.iter().map(|g| g.states.len()).sum()
    }

    /// Check the structural invariants a runtime relies on.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.group(self.initial).is_none() {
            return Err(malformed(format!(
                "initial group {} out of range ({} groups)",
                self.initial,
                self.groups.len()
            )));
        }
        for (i, group) in self.groups.iter().enumerate() {
            if group.index as usize != i {
                return Err(malformed(format!(
                    "group at position {i} claims index {}",
                    group.index
                )));
            }
            if let Some(parent) = group.parent
                && self.group(parent).is_none()
            {
                return Err(malformed(format!(
                    "group{i}: parent {parent} out of range"
                )));
            }
            group.validate()?;
        }
        Ok(())
    }
}

impl GroupArtifact {
    pub fn state(&self, id: u32) -> &StateEntry {
        &self.states[id as usize]
    }

    /// Successor of `state` on `cp`. Code points outside the alphabet go to the sink.
    pub fn next_state(&self, state: u32, cp: CodePoint) -> u32 {
        let transitions = &self.state(state).transitions;
        let i = transitions.partition_point(|t| t.hi < cp);
        match transitions.get(i) {
            Some(t) if t.contains(cp) => t.target,
            _ => self.sink,
        }
    }

    /// Action bound to `tag`.
    pub fn binding(&self, tag: &str) -> Option<&Action> {
        self.bindings
            .iter()
            .find(|b| b.tag == tag)
            .map(|b| &b.action)
    }

    pub fn accepting_states(&self) -> impl Iterator<Item = &StateEntry> {
        self.states.iter().filter(|s| s.action.is_some())
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        let count = self.states.len() as u32;
        let name = format!("group{}", self.index);
        if self.start >= count || self.sink >= count {
            return Err(malformed(format!(
                "{name}: start {} / sink {} out of range ({count} states)",
                self.start, self.sink
            )));
        }
        if self.state(self.sink).action.is_some() {
            return Err(malformed(format!("{name}: sink state accepts")));
        }
        for (i, state) in self.states.iter().enumerate() {
            if state.id as usize != i {
                return Err(malformed(format!(
                    "{name}: state at position {i} claims id {}",
                    state.id
                )));
            }
            let mut expected_lo = 0;
            for t in &state.transitions {
                if t.lo != expected_lo || t.hi < t.lo || t.hi > MAX_CODE_POINT {
                    return Err(malformed(format!(
                        "{name}: S{i} transitions do not partition the alphabet at {expected_lo:#x}"
                    )));
                }
                if t.target >= count {
                    return Err(malformed(format!(
                        "{name}: S{i} targets missing state {}",
                        t.target
                    )));
                }
                expected_lo = t.hi + 1;
            }
            if expected_lo != MAX_CODE_POINT + 1 {
                return Err(malformed(format!(
                    "{name}: S{i} transitions stop at {expected_lo:#x}"
                )));
            }
            if let Some(tag) = &state.action
                && self.binding(tag).is_none()
            {
                return Err(malformed(format!("{name}: S{i} accepts unbound tag {tag}")));
            }
        }
        Ok(())
    }
}

fn malformed(message: String) -> ArtifactError {
    ArtifactError::Malformed(message)
}
