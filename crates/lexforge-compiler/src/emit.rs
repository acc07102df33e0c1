//! DFA to artifact lowering.
//!
//! Rule tags are derived from the generated group's index and the rule's
//! position in that group's effective order, so an inherited rule gets a
//! different tag in every group that inherits it.

use lexforge_artifact::{Binding, GroupArtifact, StateEntry, Transition};
use lexforge_core::{GroupId, Registry, exit_tag, rule_tag};

use crate::dfa::Dfa;
use crate::invariants::ensure_group;

/// Lower `dfa`, built for `group`, into a dispatch description.
///
/// # Panics
/// If `group` was not issued by `registry`.
pub fn emit(dfa: &Dfa, registry: &Registry, group: GroupId) -> GroupArtifact {
    let definition = ensure_group(registry, group);
    let index = group.get();

    let states = dfa
        .states()
        .iter()
        .enumerate()
        .map(|(id, state)| StateEntry {
            id: id as u32,
            transitions: state
                .transitions()
                .iter()
                .map(|t| Transition {
                    lo: t.lo,
                    hi: t.hi,
                    target: t.target,
                })
                .collect(),
            action: state.accepted_rule().map(|k| rule_tag(index, k)),
        })
        .collect();

    let bindings = registry
        .effective_rules(group)
        .into_iter()
        .enumerate()
        .map(|(k, rule)| Binding {
            tag: rule_tag(index, k as u32),
            action: rule.action().clone(),
        })
        .collect();

    let on_exit = definition.on_exit().map(|action| Binding {
        tag: exit_tag(index),
        action: action.clone(),
    });

    GroupArtifact {
        index,
        name: definition.name().to_string(),
        parent: definition.parent().map(GroupId::get),
        start: dfa.start(),
        sink: dfa.sink(),
        states,
        bindings,
        on_exit,
    }
}
