//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Unified flags: commands accept each other's flags without error
//! 2. Help visibility: hidden flags don't appear in --help
//! 3. Positional shifting: -d shifts the first positional to the input
//! 4. Params extraction: correct fields are extracted from ArgMatches

use std::path::PathBuf;

use super::dispatch::shift_positional_to_source;
use super::*;
use crate::cli::commands::{
    check_command, dump_command, emit_command, scan_command, trace_command,
};

#[test]
fn check_accepts_scan_flags() {
    let result = check_command().try_get_matches_from([
        "check",
        "lexer.lex",
        "input.txt",
        "--json",
        "--max-depth",
        "8",
        "-vv",
    ]);
    assert!(result.is_ok(), "check should accept scan flags: {:?}", result.err());

    let params = CheckParams::from_matches(&result.unwrap());
    assert_eq!(params.def_path, Some(PathBuf::from("lexer.lex")));
    assert!(!params.strict);
}

#[test]
fn dump_accepts_source_positional() {
    let result = dump_command().try_get_matches_from(["dump", "lexer.lex", "input.txt"]);
    assert!(result.is_ok(), "dump should accept source positional: {:?}", result.err());

    let params = DumpParams::from_matches(&result.unwrap());
    assert_eq!(params.def_path, Some(PathBuf::from("lexer.lex")));
    assert_eq!(params.stage, "artifact");
    assert_eq!(params.group, None);
}

#[test]
fn dump_extracts_stage_and_group() {
    let m = dump_command()
        .try_get_matches_from(["dump", "lexer.lex", "--stage", "dfa", "-g", "string"])
        .unwrap();
    let params = DumpParams::from_matches(&m);
    assert_eq!(params.stage, "dfa");
    assert_eq!(params.group.as_deref(), Some("string"));
}

#[test]
fn dump_rejects_unknown_stage() {
    let result = dump_command().try_get_matches_from(["dump", "lexer.lex", "--stage", "ast"]);
    assert!(result.is_err());
}

#[test]
fn emit_extracts_format_and_output() {
    let m = emit_command()
        .try_get_matches_from([
            "emit",
            "lexer.lex",
            "--format",
            "binary",
            "-o",
            "out.lxfa",
            "--state-limit",
            "64",
        ])
        .unwrap();
    let params = EmitParams::from_matches(&m);
    assert_eq!(params.format, "binary");
    assert_eq!(params.output, Some(PathBuf::from("out.lxfa")));
    assert_eq!(params.state_limit, Some(64));
    assert!(!params.compact);
}

#[test]
fn scan_accepts_verbose_flag() {
    let result = scan_command().try_get_matches_from(["scan", "lexer.lex", "input.txt", "-vv"]);
    assert!(result.is_ok(), "scan should accept -vv: {:?}", result.err());

    let params = ScanParams::from_matches(&result.unwrap());
    assert_eq!(params.source_path, Some(PathBuf::from("input.txt")));
    assert_eq!(params.max_depth, 1024);
    assert_eq!(params.step_limit, 100_000_000);
}

#[test]
fn trace_accepts_json_flag() {
    let result =
        trace_command().try_get_matches_from(["trace", "lexer.lex", "-s", "abc", "--json", "-v"]);
    assert!(result.is_ok(), "trace should accept --json: {:?}", result.err());

    let params = TraceParams::from_matches(&result.unwrap());
    assert_eq!(params.source_text.as_deref(), Some("abc"));
    assert_eq!(params.verbose, 1);
}

#[test]
fn scan_shifts_positional_with_inline_definition() {
    let m = scan_command()
        .try_get_matches_from(["scan", "-d", "group g { 'a' => \"skip\" }", "input.txt"])
        .unwrap();
    let params = ScanParams::from_matches(&m);
    assert_eq!(params.def_path, None);
    assert_eq!(params.source_path, Some(PathBuf::from("input.txt")));
}

#[test]
fn trace_shifts_positional_with_inline_definition() {
    let m = trace_command()
        .try_get_matches_from(["trace", "-d", "group g { 'a' => \"skip\" }", "input.txt"])
        .unwrap();
    let params = TraceParams::from_matches(&m);
    assert_eq!(params.def_path, None);
    assert_eq!(params.source_path, Some(PathBuf::from("input.txt")));
}

#[test]
fn shift_only_applies_to_a_single_positional() {
    let def = Some(PathBuf::from("a.lex"));
    let src = Some(PathBuf::from("b.txt"));

    assert_eq!(
        shift_positional_to_source(true, def.clone(), src.clone()),
        (def.clone(), src.clone())
    );
    assert_eq!(
        shift_positional_to_source(false, def.clone(), None),
        (def.clone(), None)
    );
    assert_eq!(shift_positional_to_source(true, def.clone(), None), (None, def));
}

#[test]
fn scan_limits_are_extracted() {
    let m = scan_command()
        .try_get_matches_from([
            "scan",
            "lexer.lex",
            "-s",
            "x",
            "--max-depth",
            "4",
            "--step-limit",
            "99",
            "--json",
            "--color",
            "never",
        ])
        .unwrap();
    let params = ScanParams::from_matches(&m);
    assert_eq!(params.max_depth, 4);
    assert_eq!(params.step_limit, 99);
    assert!(params.json);
    assert_eq!(params.color, ColorChoice::Never);
}

#[test]
fn check_help_hides_runtime_flags() {
    let help = check_command().render_help().to_string();
    assert!(help.contains("--strict"));
    assert!(!help.contains("--source"));
    assert!(!help.contains("--max-depth"));
    assert!(!help.contains("--json"));
}

#[test]
fn scan_help_hides_verbose() {
    let help = scan_command().render_help().to_string();
    assert!(help.contains("--json"));
    assert!(help.contains("--step-limit"));
    assert!(!help.contains("Verbosity level"));
}

#[test]
fn trace_help_hides_json() {
    let help = trace_command().render_help().to_string();
    assert!(help.contains("Verbosity level"));
    assert!(!help.contains("--json"));
}

#[test]
fn subcommand_is_required() {
    assert!(build_cli().try_get_matches_from(["lexforge"]).is_err());
}
