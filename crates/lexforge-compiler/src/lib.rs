//! lexforge compiler: from lexer definitions to artifacts.
//!
//! Pipeline, per group:
//! - `parser` - definition language to a [`Registry`](lexforge_core::Registry)
//! - `nfa` - Thompson-style NFA over the group's effective rules
//! - `dfa` - subset construction with interval partitioning
//! - `emit` - DFA plus bindings to a [`GroupArtifact`](lexforge_artifact::GroupArtifact)
//! - `generator` - drives the pipeline for one group or a whole registry
//! - `diagnostics` - definition errors and their rendering

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod dfa;
pub mod diagnostics;
pub mod emit;
mod error;
pub mod generator;
mod invariants;
pub mod nfa;
pub mod parser;

#[cfg(test)]
mod oracle_tests;
#[cfg(test)]
pub mod test_utils;

pub use dfa::{Dfa, DfaConfig, DfaState, DfaStateId, determinize, determinize_with};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity, Span};
pub use emit::emit;
pub use error::CompileError;
pub use generator::Generator;
pub use nfa::{AcceptTag, Nfa, NfaState, StateId};
pub use parser::{Definition, parse, parse_with_diagnostics};

/// Errors that can occur while turning definition text into an artifact.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("definition parsing failed with {} errors", .0.error_count())]
    DefinitionParseError(Diagnostics),

    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// Result type for definition-to-artifact operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse `source` and generate the artifact for every group.
pub fn compile_definition(source: &str) -> Result<lexforge_artifact::LexerArtifact> {
    let definition = parse(source)?;
    Ok(definition.generator().generate_all()?)
}
