//! Tracing infrastructure for debugging scans.
//!
//! `NoopTracer` methods are `#[inline(always)]` empty functions, so a scan
//! without tracing carries no tracing cost. `PrintTracer` keeps its own
//! group-name stack for labels instead of reading scanner state.

use lexforge_artifact::GroupArtifact;
use lexforge_core::{Colors, escape_code_point};

use super::handler::RuleMatch;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Default: fired rules, group changes, failures.
    #[default]
    Default,
    /// Verbose (-v): also every accepting position passed on the way.
    Verbose,
    /// Very verbose (-vv): also every DFA step.
    VeryVerbose,
}

/// Scanner instrumentation.
///
/// Each method is called at a specific point during a scan:
/// - `trace_enter_group` - at the start and after every push
/// - `trace_exit_group` - after a pop and its exit binding
/// - `trace_step` - after the DFA consumed one code point
/// - `trace_candidate` - when the state reached accepts
/// - `trace_fire` - before the handler sees the longest match
/// - `trace_fail` - when no rule matches
pub trait Tracer {
    fn trace_enter_group(&mut self, group: &GroupArtifact, offset: usize);

    fn trace_exit_group(&mut self, group: &GroupArtifact, offset: usize);

    /// `offset` is where `ch` starts.
    fn trace_step(&mut self, offset: usize, ch: char, state: u32);

    /// `end` is the byte offset right after the accepted prefix.
    fn trace_candidate(&mut self, end: usize, tag: &str);

    fn trace_fire(&mut self, m: &RuleMatch<'_>);

    fn trace_fail(&mut self, group: &GroupArtifact, offset: usize);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_enter_group(&mut self, _group: &GroupArtifact, _offset: usize) {}

    #[inline(always)]
    fn trace_exit_group(&mut self, _group: &GroupArtifact, _offset: usize) {}

    #[inline(always)]
    fn trace_step(&mut self, _offset: usize, _ch: char, _state: u32) {}

    #[inline(always)]
    fn trace_candidate(&mut self, _end: usize, _tag: &str) {}

    #[inline(always)]
    fn trace_fire(&mut self, _m: &RuleMatch<'_>) {}

    #[inline(always)]
    fn trace_fail(&mut self, _group: &GroupArtifact, _offset: usize) {}
}

const STEP: &str = "·";
const CANDIDATE: &str = "?";
const FIRE: &str = "●";
const EXIT: &str = "◼";
const FAIL: &str = "✗";

/// Longest text shown for a match before it is elided.
const TEXT_WIDTH: usize = 24;

/// Tracer that collects a readable scan log.
///
/// Lines are grouped under a label per group; returning from a group
/// repeats the caller's label.
pub struct PrintTracer<'s> {
    source: &'s str,
    verbosity: Verbosity,
    lines: Vec<String>,
    /// Names of the groups on the scanner's stack.
    groups: Vec<String>,
    /// Width of the offset column.
    offset_width: usize,
    colors: Colors,
}

impl<'s> PrintTracer<'s> {
    pub fn new(source: &'s str, verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            source,
            verbosity,
            lines: Vec::new(),
            groups: Vec::new(),
            offset_width: source.len().to_string().len(),
            colors,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    pub fn print(&self) {
        for line in &self.lines {
            println!("{line}");
        }
    }

    fn push_line(&mut self, offset: usize, symbol: &str, content: &str) {
        let line = format!("  {offset:>w$} {symbol} {content}", w = self.offset_width);
        self.lines.push(line);
    }

    /// Push a group label, with an empty line separator (except for the first).
    fn push_label(&mut self, name: &str) {
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        let c = self.colors;
        self.lines.push(format!("{}{name}{}:", c.blue, c.reset));
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_enter_group(&mut self, group: &GroupArtifact, _offset: usize) {
        self.push_label(&group.name);
        self.groups.push(group.name.clone());
    }

    fn trace_exit_group(&mut self, group: &GroupArtifact, offset: usize) {
        let c = self.colors;
        let content = format!("{}{}{}", c.blue, group.name, c.reset);
        self.push_line(offset, EXIT, &content);
        self.groups.pop();
        if let Some(caller) = self.groups.last().cloned() {
            self.push_label(&caller);
        }
    }

    fn trace_step(&mut self, offset: usize, ch: char, state: u32) {
        if self.verbosity != Verbosity::VeryVerbose {
            return;
        }
        let c = self.colors;
        let content = format!(
            "{}'{}'{} -> S{state}",
            c.dim,
            escape_code_point(ch as u32),
            c.reset
        );
        self.push_line(offset, STEP, &content);
    }

    fn trace_candidate(&mut self, end: usize, tag: &str) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        self.push_line(end, CANDIDATE, tag);
    }

    fn trace_fire(&mut self, m: &RuleMatch<'_>) {
        let c = self.colors;
        let content = format!(
            "{}{}{} {}{:?}{} => {}",
            c.blue,
            m.tag,
            c.reset,
            c.green,
            truncate_text(m.text, TEXT_WIDTH),
            c.reset,
            m.action.as_str()
        );
        self.push_line(m.span.start, FIRE, &content);
    }

    fn trace_fail(&mut self, group: &GroupArtifact, offset: usize) {
        let c = self.colors;
        let next = self
            .source
            .get(offset..)
            .and_then(|rest| rest.chars().next())
            .map(String::from)
            .unwrap_or_default();
        let content = format!(
            "{}no rule of {} matches{} {:?}",
            c.red, group.name, c.reset, next
        );
        self.push_line(offset, FAIL, &content);
    }
}

/// Cut `text` to at most `max` chars, marking the cut with `…`.
fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
