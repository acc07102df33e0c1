//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use lexforge_core::{Group, GroupId, Registry};

use crate::error::CompileError;
use crate::nfa::{Nfa, NfaState, StateId};

pub(crate) fn ensure_group(registry: &Registry, id: GroupId) -> &Group {
    registry
        .group(id)
        .unwrap_or_else(|| panic!("{id} not found (registry holds {} groups)", registry.len()))
}

impl Nfa {
    pub(crate) fn ensure_state_mut(&mut self, id: StateId) -> &mut NfaState {
        let len = self.len();
        self.states
            .get_mut(id as usize)
            .unwrap_or_else(|| panic!("NFA state N{id} not found (automaton holds {len} states)"))
    }
}

pub(crate) fn ensure_untagged(state: &NfaState, id: StateId) {
    assert!(
        state.accept.is_none(),
        "NFA state N{id} already accepts {:?}",
        state.accept
    );
}

/// Only the state limit can fail determinization.
pub(crate) fn ensure_unlimited(result: Result<(), CompileError>) {
    if let Err(e) = result {
        panic!("determinization without a state limit failed: {e}");
    }
}
