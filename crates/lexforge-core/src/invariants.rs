//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::registry::{Group, GroupId, Registry};

impl Registry {
    pub(crate) fn ensure_group(&self, id: GroupId) -> &Group {
        self.group(id).unwrap_or_else(|| {
            panic!(
                "Registry: {id} not found \
                 (group ids must come from the registry that issued them)"
            )
        })
    }

    pub(crate) fn ensure_group_mut(&mut self, id: GroupId) -> &mut Group {
        let len = self.len();
        self.groups.get_mut(id.index()).unwrap_or_else(|| {
            panic!("Registry: {id} not found (registry holds {len} groups)")
        })
    }
}
