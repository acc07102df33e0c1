//! Generation entry point.

use lexforge_artifact::{GroupArtifact, LexerArtifact};
use lexforge_core::{GroupId, Registry};

use crate::dfa::{Dfa, DfaConfig, determinize_with};
use crate::emit::emit;
use crate::error::CompileError;
use crate::nfa::{self, Nfa};

/// Drives NFA construction, determinization and emission for the groups of
/// a registry.
///
/// Borrowing the registry freezes it for as long as the generator lives.
///
/// ```
/// use lexforge_compiler::Generator;
/// use lexforge_core::{Pattern, Registry};
///
/// let mut registry = Registry::new();
/// let main = registry.new_group("main", None);
/// let _ = registry
///     .rule(main, Pattern::many1(Pattern::char_range('0', '9')))
///     .bind_action("token number");
///
/// let artifact = Generator::new(&registry).generate(main).unwrap();
/// assert_eq!(artifact.bindings[0].tag, "group0_rule0");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Generator<'r> {
    registry: &'r Registry,
    config: DfaConfig,
    initial: Option<GroupId>,
}

impl<'r> Generator<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            config: DfaConfig::default(),
            initial: None,
        }
    }

    /// Fail generation of any group whose DFA exceeds `limit` states.
    pub fn state_limit(mut self, limit: usize) -> Self {
        self.config.state_limit = Some(limit);
        self
    }

    /// Group a scanner starts in. Defaults to the first group.
    pub fn initial(mut self, group: GroupId) -> Self {
        self.initial = Some(group);
        self
    }

    pub fn config(&self) -> &DfaConfig {
        &self.config
    }

    pub fn nfa(&self, group: GroupId) -> Result<Nfa, CompileError> {
        self.check_group(group)?;
        Ok(nfa::build(self.registry, group))
    }

    pub fn dfa(&self, group: GroupId) -> Result<Dfa, CompileError> {
        let nfa = self.nfa(group)?;
        determinize_with(&nfa, &self.config)
    }

    /// Artifact for a single group.
    pub fn generate(&self, group: GroupId) -> Result<GroupArtifact, CompileError> {
        let dfa = self.dfa(group)?;
        Ok(emit(&dfa, self.registry, group))
    }

    /// Artifacts for every group, indexed by group index.
    pub fn generate_all(&self) -> Result<LexerArtifact, CompileError> {
        if self.registry.is_empty() {
            return Err(CompileError::NoGroups);
        }
        let initial = self.initial.unwrap_or(GroupId::new(0));
        self.check_group(initial)?;

        let groups = self
            .registry
            .groups()
            .map(|group| self.generate(group.id()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LexerArtifact {
            initial: initial.get(),
            groups,
        })
    }

    fn check_group(&self, group: GroupId) -> Result<(), CompileError> {
        match self.registry.group(group) {
            Some(_) => Ok(()),
            None => Err(CompileError::UnknownGroup(group)),
        }
    }
}
