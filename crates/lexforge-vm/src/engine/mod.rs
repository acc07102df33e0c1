//! Scanning engine.
//!
//! The scanner walks one group's DFA at a time, fires the longest accepted
//! rule through a [`Handler`] and applies the group change the handler asks
//! for.

mod error;
mod handler;
mod invariants;
mod scanner;
mod script;
mod trace;


pub use error::RuntimeError;
pub use handler::{ExitMatch, Handler, RuleMatch, Transition};
pub use scanner::{ScanLimits, ScanOutcome, Scanner};
pub use script::{ScriptHandler, Token, tokenize};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
