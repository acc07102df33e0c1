#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for lexforge lexer definitions.
//!
//! Two layers:
//! - **Pattern algebra** (`Pattern`): immutable expression trees over code point ranges
//! - **Rule groups** (`Registry`): patterns bound to actions, organized into
//!   lexical contexts that inherit rules from a parent group
//!
//! Everything here is definition-time data. Automaton construction lives in
//! `lexforge-compiler`; nothing derived from it is stored back on a group.

mod colors;
mod error;
mod invariants;
pub mod pattern;
pub mod registry;
pub mod utils;

#[cfg(test)]
mod pattern_tests;

pub use colors::Colors;
pub use error::CyclicGroupError;
pub use pattern::{CodePoint, MAX_CODE_POINT, Pattern};
pub use registry::{Action, Group, GroupId, Registry, Rule, RuleBuilder};
pub use utils::{escape_code_point, exit_tag, rule_tag};
