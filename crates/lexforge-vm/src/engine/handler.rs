//! Host callbacks.

use std::ops::Range;

use lexforge_core::Action;

use super::error::RuntimeError;

/// Group change requested by a fired rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Stay in the current group.
    Continue,
    /// Enter the group with this index.
    Push(u32),
    /// Leave the current group, running its exit binding.
    Pop,
}

/// The longest match found at one position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    pub group: u32,
    pub group_name: &'a str,
    pub tag: &'a str,
    pub action: &'a Action,
    pub text: &'a str,
    /// Byte range into the input.
    pub span: Range<usize>,
}

/// A group left through [`Transition::Pop`] that has an exit binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExitMatch<'a> {
    pub group: u32,
    pub group_name: &'a str,
    pub tag: &'a str,
    pub action: &'a Action,
    /// Byte offset right after the rule that popped the group.
    pub offset: usize,
}

/// Interprets the actions the scanner fires.
pub trait Handler {
    fn on_rule(&mut self, m: &RuleMatch<'_>) -> Result<Transition, RuntimeError>;

    fn on_exit(&mut self, _m: &ExitMatch<'_>) -> Result<(), RuntimeError> {
        Ok(())
    }
}

impl<F> Handler for F
where
    F: FnMut(&RuleMatch<'_>) -> Result<Transition, RuntimeError>,
{
    fn on_rule(&mut self, m: &RuleMatch<'_>) -> Result<Transition, RuntimeError> {
        self(m)
    }
}
