use crate::registry::GroupId;

/// Attaching `parent` to `group` would make the group hierarchy cyclic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot make {parent} the parent of {group}: {group} is already an ancestor of {parent}")]
pub struct CyclicGroupError {
    pub group: GroupId,
    pub parent: GroupId,
}
