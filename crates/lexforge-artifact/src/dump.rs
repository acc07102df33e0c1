//! Human-readable artifact dump for debugging and documentation.
//!
//! Transitions into the sink are omitted; every code point not listed under
//! a state leads to the sink.

use std::fmt::Write as _;

use lexforge_core::{CodePoint, Colors, MAX_CODE_POINT, escape_code_point};

use crate::format::{GroupArtifact, LexerArtifact};

/// Generate a human-readable dump of every group.
pub fn dump(artifact: &LexerArtifact, colors: Colors) -> String {
    let mut out = String::new();
    for (i, group) in artifact.groups.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_group(&mut out, group, group.index == artifact.initial, colors);
    }
    out
}

/// Dump of the group at `index`, if the artifact has one.
pub fn dump_group(artifact: &LexerArtifact, index: u32, colors: Colors) -> Option<String> {
    let group = artifact.group(index)?;
    let mut out = String::new();
    write_group(&mut out, group, index == artifact.initial, colors);
    Some(out)
}

/// Render a code point range in definition-language syntax.
pub fn format_range(lo: CodePoint, hi: CodePoint) -> String {
    if lo == 0 && hi == MAX_CODE_POINT {
        ".".to_string()
    } else if lo == hi {
        format!("'{}'", escape_code_point(lo))
    } else {
        format!("[{}-{}]", escape_code_point(lo), escape_code_point(hi))
    }
}

fn write_group(out: &mut String, group: &GroupArtifact, initial: bool, c: Colors) {
    write!(out, "{}group{} {}{}", c.blue, group.index, group.name, c.reset).unwrap();
    if let Some(parent) = group.parent {
        write!(out, " {}extends group{parent}{}", c.dim, c.reset).unwrap();
    }
    if initial {
        write!(out, " {}(initial){}", c.dim, c.reset).unwrap();
    }
    out.push('\n');

    if let Some(exit) = &group.on_exit {
        writeln!(
            out,
            "  on_exit {}{}{} = {:?}",
            c.blue,
            exit.tag,
            c.reset,
            exit.action.as_str()
        )
        .unwrap();
    }

    if !group.bindings.is_empty() {
        out.push_str("  rules\n");
        for binding in &group.bindings {
            writeln!(
                out,
                "    {}{}{} = {:?}",
                c.blue,
                binding.tag,
                c.reset,
                binding.action.as_str()
            )
            .unwrap();
        }
    }

    out.push_str("  states\n");
    for state in &group.states {
        write!(out, "    S{}", state.id).unwrap();
        if state.id == group.start {
            out.push_str(" start");
        }
        if state.id == group.sink {
            write!(out, " {}sink{}", c.red, c.reset).unwrap();
        }
        if let Some(tag) = &state.action {
            write!(out, " {}accept {tag}{}", c.blue, c.reset).unwrap();
        }
        out.push('\n');

        if state.id == group.sink {
            continue;
        }
        for t in state.transitions.iter().filter(|t| t.target != group.sink) {
            writeln!(
                out,
                "      {}{}{} {}->{} S{}",
                c.green,
                format_range(t.lo, t.hi),
                c.reset,
                c.dim,
                c.reset,
                t.target
            )
            .unwrap();
        }
    }
}
