use super::Span;

/// Diagnostic kinds, lexical problems first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Lexical
    UnterminatedString,
    UnterminatedClass,
    InvalidEscape,
    InvalidClassRange,
    UnexpectedToken,

    // Something required is missing
    ExpectedGroupName,
    ExpectedOpenBrace,
    ExpectedPattern,
    ExpectedAction,
    UnclosedGroup,
    UnclosedParen,
    NestingTooDeep,

    // Valid syntax, invalid definition
    DuplicateGroup,
    UnknownParent,
    CyclicParent,
    MultipleInitial,
    NoGroups,

    // Warnings
    EmptyGroup,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::EmptyGroup => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Hint attached to every diagnostic of this kind.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidEscape => Some(r#"valid escapes: \n \r \t \\ \' \" \[ \] \- \^ \u{HEX}"#),
            Self::ExpectedAction => Some(r#"e.g., `[0-9]+ => "token number"`"#),
            Self::CyclicParent => Some("a group cannot inherit from its own descendant"),
            _ => None,
        }
    }

    /// Base message, used when no detail is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnterminatedString => "unterminated string",
            Self::UnterminatedClass => "unterminated character class",
            Self::InvalidEscape => "invalid escape",
            Self::InvalidClassRange => "invalid class range",
            Self::UnexpectedToken => "unexpected token",

            Self::ExpectedGroupName => "expected group name",
            Self::ExpectedOpenBrace => "expected `{`",
            Self::ExpectedPattern => "expected a pattern",
            Self::ExpectedAction => "expected `=>` followed by an action string",
            Self::UnclosedGroup => "missing closing `}`",
            Self::UnclosedParen => "missing closing `)`",
            Self::NestingTooDeep => "patterns are nested too deeply",

            Self::DuplicateGroup => "duplicate group",
            Self::UnknownParent => "unknown parent group",
            Self::CyclicParent => "cyclic group inheritance",
            Self::MultipleInitial => "more than one group is marked `initial`",
            Self::NoGroups => "definition declares no groups",

            Self::EmptyGroup => "group has no rules",
        }
    }

    /// Template for messages with detail. `{}` is replaced by the detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::DuplicateGroup => "group `{}` is already defined".to_string(),
            Self::UnknownParent => "`{}` is not a group".to_string(),
            Self::CyclicParent => "cyclic group inheritance: {}".to_string(),
            Self::EmptyGroup => "group `{}` has no rules".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RelatedInfo {
    pub(crate) span: Span,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub(crate) fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// Range underlined in output.
    pub(crate) span: Span,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind, span: Span) -> Self {
        Self {
            kind,
            span,
            message: kind.fallback_message().to_string(),
            related: Vec::new(),
            hints: kind.default_hint().map(str::to_string).into_iter().collect(),
        }
    }

    pub(crate) fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub(crate) fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub(crate) fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            self.span.start,
            self.span.end,
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message, related.span.start, related.span.end
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}
