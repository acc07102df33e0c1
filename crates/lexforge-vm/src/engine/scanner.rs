//! Maximal-munch scanner over a lexer artifact.

use lexforge_artifact::{GroupArtifact, LexerArtifact};
use lexforge_core::CodePoint;

use super::error::RuntimeError;
use super::handler::{ExitMatch, Handler, RuleMatch, Transition};
use super::invariants::ensure_top;
use super::trace::{NoopTracer, Tracer};

/// Runtime limits for a scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanLimits {
    /// Maximum group stack depth, initial group included (default: 1,024).
    pub(crate) max_depth: u32,
    /// Maximum code points examined (default: 100,000,000).
    pub(crate) step_limit: u64,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            max_depth: 1024,
            step_limit: 100_000_000,
        }
    }
}

impl ScanLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn step_limit(mut self, steps: u64) -> Self {
        self.step_limit = steps;
        self
    }

    pub fn get_max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn get_step_limit(&self) -> u64 {
        self.step_limit
    }
}

/// Result of a scan that consumed its whole input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Code points examined, backtracking included.
    pub steps: u64,
    /// Group stack at end of input, bottom first.
    pub stack: Vec<u32>,
}

/// Executes an artifact over input text.
///
/// The artifact is only borrowed, so one artifact can back any number of
/// scanners.
#[derive(Clone, Copy, Debug)]
pub struct Scanner<'a> {
    artifact: &'a LexerArtifact,
    limits: ScanLimits,
}

impl<'a> Scanner<'a> {
    /// Scanner over an artifact that already passed [`LexerArtifact::validate`].
    ///
    /// Artifacts from the generator and the decoders qualify. Scanning a
    /// hand-built artifact with out-of-range state ids panics; use
    /// [`Scanner::try_new`] for those.
    pub fn new(artifact: &'a LexerArtifact) -> Self {
        Self {
            artifact,
            limits: ScanLimits::default(),
        }
    }

    /// Validate `artifact`, then build a scanner over it.
    pub fn try_new(artifact: &'a LexerArtifact) -> Result<Self, RuntimeError> {
        artifact
            .validate()
            .map_err(|e| RuntimeError::InvalidArtifact(e.to_string()))?;
        Ok(Self::new(artifact))
    }

    pub fn limits(mut self, limits: ScanLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn artifact(&self) -> &'a LexerArtifact {
        self.artifact
    }

    /// Scan `input` to the end, firing every match through `handler`.
    pub fn scan<H: Handler>(&self, input: &str, handler: &mut H) -> Result<ScanOutcome, RuntimeError> {
        self.scan_with(input, handler, &mut NoopTracer)
    }

    /// Scan with a tracer for debugging.
    ///
    /// The tracer is generic, so `NoopTracer` calls are optimized away.
    pub fn scan_with<H: Handler, T: Tracer>(
        &self,
        input: &str,
        handler: &mut H,
        tracer: &mut T,
    ) -> Result<ScanOutcome, RuntimeError> {
        let initial = self.group(self.artifact.initial)?;
        let mut stack = vec![initial.index];
        let mut steps = 0;
        let mut pos = 0;
        tracer.trace_enter_group(initial, 0);

        while pos < input.len() {
            let group = self.group(ensure_top(&stack))?;
            let Some((end, tag)) = self.longest_match(group, input, pos, &mut steps, tracer)? else {
                tracer.trace_fail(group, pos);
                return Err(RuntimeError::NoMatch {
                    group: group.index,
                    offset: pos,
                });
            };
            let action = group.binding(tag).ok_or_else(|| RuntimeError::UnboundTag {
                group: group.index,
                tag: tag.to_string(),
            })?;

            let m = RuleMatch {
                group: group.index,
                group_name: &group.name,
                tag,
                action,
                text: &input[pos..end],
                span: pos..end,
            };
            tracer.trace_fire(&m);

            match handler.on_rule(&m)? {
                Transition::Continue => {}
                Transition::Push(index) => {
                    let next = self.group(index)?;
                    if stack.len() >= self.limits.max_depth as usize {
                        return Err(RuntimeError::GroupDepthExceeded {
                            limit: self.limits.max_depth,
                        });
                    }
                    stack.push(index);
                    tracer.trace_enter_group(next, end);
                }
                Transition::Pop => {
                    if stack.len() == 1 {
                        return Err(RuntimeError::GroupStackUnderflow { offset: pos });
                    }
                    stack.pop();
                    if let Some(exit) = &group.on_exit {
                        handler.on_exit(&ExitMatch {
                            group: group.index,
                            group_name: &group.name,
                            tag: &exit.tag,
                            action: &exit.action,
                            offset: end,
                        })?;
                    }
                    tracer.trace_exit_group(group, end);
                }
            }
            pos = end;
        }

        Ok(ScanOutcome { steps, stack })
    }

    fn group(&self, index: u32) -> Result<&'a GroupArtifact, RuntimeError> {
        self.artifact
            .group(index)
            .ok_or(RuntimeError::UnknownGroup(index))
    }

    /// End offset and tag of the longest non-empty accepted prefix of
    /// `input[pos..]`.
    fn longest_match<T: Tracer>(
        &self,
        group: &'a GroupArtifact,
        input: &str,
        pos: usize,
        steps: &mut u64,
        tracer: &mut T,
    ) -> Result<Option<(usize, &'a str)>, RuntimeError> {
        let mut state = group.start;
        let mut best = None;

        for (i, ch) in input[pos..].char_indices() {
            *steps += 1;
            if *steps > self.limits.step_limit {
                return Err(RuntimeError::StepLimitExceeded(self.limits.step_limit));
            }

            let offset = pos + i;
            state = group.next_state(state, ch as CodePoint);
            tracer.trace_step(offset, ch, state);
            if state == group.sink {
                break;
            }
            if let Some(tag) = group.state(state).action.as_deref() {
                let end = offset + ch.len_utf8();
                tracer.trace_candidate(end, tag);
                best = Some((end, tag));
            }
        }

        Ok(best)
    }
}
