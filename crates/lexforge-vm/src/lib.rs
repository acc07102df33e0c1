#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Reference scanning runtime for lexforge artifacts.
//!
//! Runs a [`LexerArtifact`](lexforge_artifact::LexerArtifact) over text with
//! maximal munch, leaving context switches to a [`Handler`].

pub mod engine;

#[cfg(test)]
mod test_utils;

pub use engine::{
    ExitMatch, Handler, NoopTracer, PrintTracer, RuleMatch, RuntimeError, ScanLimits,
    ScanOutcome, Scanner, ScriptHandler, Token, Tracer, Transition, Verbosity, tokenize,
};
