//! Rule groups and the registry that owns them.
//!
//! Groups form a forest through non-owning `parent` indices. A group's
//! effective rules are its own rules followed by its parent's effective
//! rules, so earlier declarations (and closer groups) take priority.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CyclicGroupError;
use crate::pattern::Pattern;

/// Index of a group inside its [`Registry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u32);

impl GroupId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group{}", self.0)
    }
}

/// Opaque handler body bound to a rule or a group exit.
///
/// The generator never interprets it; it is forwarded verbatim into the
/// emitted artifact for the scanning runtime.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(String);

impl Action {
    pub fn new(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Action {
    fn from(body: &str) -> Self {
        Self::new(body)
    }
}

impl From<String> for Action {
    fn from(body: String) -> Self {
        Self(body)
    }
}

/// A pattern bound to an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    group: GroupId,
    ordinal: u32,
    pattern: Pattern,
    action: Action,
}

impl Rule {
    /// Group that declared this rule.
    pub fn group(&self) -> GroupId {
        self.group
    }

    /// Declaration order within the owning group, starting at 0.
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn action(&self) -> &Action {
        &self.action
    }
}

/// A lexical context: an ordered list of rules plus an optional parent.
#[derive(Clone, Debug)]
pub struct Group {
    id: GroupId,
    name: String,
    rules: Vec<Rule>,
    parent: Option<GroupId>,
    on_exit: Option<Action>,
}

impl Group {
    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules declared directly on this group, in declaration order.
    pub fn own_rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn parent(&self) -> Option<GroupId> {
        self.parent
    }

    /// Callback the runtime invokes when leaving this group's context.
    pub fn on_exit(&self) -> Option<&Action> {
        self.on_exit.as_ref()
    }
}

/// Owns every group of a lexer definition.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    pub(crate) groups: Vec<Group>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a group with no rules and no parent.
    pub fn new_group(&mut self, name: impl Into<String>, on_exit: Option<Action>) -> GroupId {
        let id = GroupId::new(self.groups.len() as u32);
        self.groups.push(Group {
            id,
            name: name.into(),
            rules: Vec::new(),
            parent: None,
            on_exit,
        });
        id
    }

    pub fn set_on_exit(&mut self, group: GroupId, on_exit: Option<Action>) {
        self.ensure_group_mut(group).on_exit = on_exit;
    }

    /// Make `parent` the parent of `group`.
    ///
    /// Fails without touching either group if `group` is reachable from
    /// `parent` through existing parent links (including `parent == group`).
    pub fn set_parent(&mut self, group: GroupId, parent: GroupId) -> Result<(), CyclicGroupError> {
        self.ensure_group(group);
        if self.lineage(parent).any(|ancestor| ancestor == group) {
            return Err(CyclicGroupError { group, parent });
        }
        self.ensure_group_mut(group).parent = Some(parent);
        Ok(())
    }

    pub fn clear_parent(&mut self, group: GroupId) {
        self.ensure_group_mut(group).parent = None;
    }

    /// Append a rule to `group`, assigning the next ordinal.
    pub fn add_rule(
        &mut self,
        group: GroupId,
        pattern: Pattern,
        action: impl Into<Action>,
    ) -> &Rule {
        let target = self.ensure_group_mut(group);
        let ordinal = target.rules.len() as u32;
        target.rules.push(Rule {
            group,
            ordinal,
            pattern,
            action: action.into(),
        });
        &target.rules[ordinal as usize]
    }

    /// Start defining a rule; the rule is added once an action is bound.
    pub fn rule(&mut self, group: GroupId, pattern: impl Into<Pattern>) -> RuleBuilder<'_> {
        self.ensure_group(group);
        RuleBuilder {
            registry: self,
            group,
            pattern: pattern.into(),
        }
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.index())
    }

    /// First group with the given name.
    pub fn group_by_name(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// `group` followed by its ancestors, child to root.
    pub fn lineage(&self, group: GroupId) -> impl Iterator<Item = GroupId> + '_ {
        std::iter::successors(Some(group), |&id| self.ensure_group(id).parent)
    }

    /// Own rules first, then inherited rules from parent to root.
    ///
    /// Position in this sequence is the rule's priority when the group's
    /// automaton is built.
    pub fn effective_rules(&self, group: GroupId) -> Vec<&Rule> {
        self.lineage(group)
            .flat_map(|id| self.ensure_group(id).rules.iter())
            .collect()
    }
}

/// Pending rule created by [`Registry::rule`].
#[must_use = "rule not added, call .bind_action()"]
pub struct RuleBuilder<'r> {
    registry: &'r mut Registry,
    group: GroupId,
    pattern: Pattern,
}

impl<'r> RuleBuilder<'r> {
    pub fn bind_action(self, action: impl Into<Action>) -> &'r Rule {
        self.registry.add_rule(self.group, self.pattern, action)
    }
}
