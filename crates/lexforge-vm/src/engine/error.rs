//! Errors that can occur while scanning.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// No rule of the current group matches a non-empty prefix at `offset`.
    #[error("no rule of group {group} matches at offset {offset}")]
    NoMatch { group: u32, offset: usize },

    /// A rule at `offset` popped the last group.
    #[error("rule at offset {offset} pops the last group")]
    GroupStackUnderflow { offset: usize },

    #[error("group stack exceeds {limit} groups")]
    GroupDepthExceeded { limit: u32 },

    #[error("{0}")]
    InvalidArtifact(String),

    #[error("group {0} is not in the artifact")]
    UnknownGroup(u32),

    /// Too many code points examined, backtracking included.
    #[error("scan step limit exceeded ({0} steps)")]
    StepLimitExceeded(u64),

    #[error("group {group} accepts tag `{tag}` but binds no action to it")]
    UnboundTag { group: u32, tag: String },

    /// A handler rejected an action body.
    #[error("action at offset {offset}: {message}")]
    Action { offset: usize, message: String },
}
