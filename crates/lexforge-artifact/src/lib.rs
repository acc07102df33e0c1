#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Lexer artifact format.
//!
//! The artifact is the contract between the generator and any scanning
//! runtime or code-emission backend:
//! - `format`: per-group DFA tables, rule bindings and exit bindings
//! - `container`: JSON encoding and the checksummed binary container
//! - `dump`: human-readable listing for debugging

pub mod container;
pub mod dump;
mod error;
pub mod format;

#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod test_utils;

pub use container::{HEADER_SIZE, Header, MAGIC, VERSION};
pub use dump::{dump, dump_group, format_range};
pub use error::ArtifactError;
pub use format::{Binding, GroupArtifact, LexerArtifact, StateEntry, Transition};
