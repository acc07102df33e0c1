//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands,
//! visible or hidden (via `.hide(true)`).

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Definition file (positional).
pub fn def_path_arg() -> Arg {
    Arg::new("def_path")
        .value_name("DEF")
        .value_parser(value_parser!(PathBuf))
        .help("Lexer definition file (use \"-\" for stdin)")
}

/// Inline definition text (-d/--def).
pub fn def_text_arg() -> Arg {
    Arg::new("def_text")
        .short('d')
        .long("def")
        .value_name("TEXT")
        .help("Inline definition text")
}

/// Input file to scan (positional).
pub fn source_path_arg() -> Arg {
    Arg::new("source_path")
        .value_name("SOURCE")
        .value_parser(value_parser!(PathBuf))
        .help("Input file to scan (use \"-\" for stdin)")
}

/// Inline input text (-s/--source).
pub fn source_text_arg() -> Arg {
    Arg::new("source_text")
        .short('s')
        .long("source")
        .value_name("TEXT")
        .help("Inline input text")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Pipeline stage to dump (--stage).
pub fn stage_arg() -> Arg {
    Arg::new("stage")
        .long("stage")
        .value_name("STAGE")
        .default_value("artifact")
        .value_parser(["nfa", "dfa", "artifact"])
        .help("Pipeline stage to show")
}

/// Restrict output to one group (-g/--group).
pub fn group_arg() -> Arg {
    Arg::new("group")
        .short('g')
        .long("group")
        .value_name("NAME")
        .help("Only show this group")
}

/// Artifact encoding (--format).
pub fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .default_value("json")
        .value_parser(["json", "binary"])
        .help("Artifact encoding")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON")
}

/// Print tokens as JSON (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print tokens as JSON")
}

/// DFA state limit per group (--state-limit).
pub fn state_limit_arg() -> Arg {
    Arg::new("state_limit")
        .long("state-limit")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Fail if a group's DFA exceeds N states")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for verbose, -vv for very verbose)")
}

/// Group stack limit (--max-depth).
pub fn max_depth_arg() -> Arg {
    Arg::new("max_depth")
        .long("max-depth")
        .value_name("N")
        .default_value("1024")
        .value_parser(value_parser!(u32))
        .help("Maximum group stack depth")
}

/// Scan step limit (--step-limit).
pub fn step_limit_arg() -> Arg {
    Arg::new("step_limit")
        .long("step-limit")
        .value_name("N")
        .default_value("100000000")
        .value_parser(value_parser!(u64))
        .help("Maximum code points examined, backtracking included")
}
