use lexforge_core::GroupId;

/// Errors raised while generating automata for a registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("{0} is not defined in this registry")]
    UnknownGroup(GroupId),

    #[error("registry has no groups")]
    NoGroups,

    /// Determinization produced more states than the configured limit.
    #[error("DFA state limit exceeded ({limit} states)")]
    StateLimitExceeded { limit: usize },
}
