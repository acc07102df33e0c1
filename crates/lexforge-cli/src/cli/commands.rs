//! Command builders for the CLI.
//!
//! Every command accepts the same definition input (`DEF`, `-d`). Commands
//! that do not scan still accept the input flags hidden, and `scan`/`trace`
//! accept each other's flags, so a command line can switch subcommands
//! without edits.

use clap::Command;

use super::args::*;

/// Add hidden input args (for commands that don't scan).
fn with_hidden_source_args(cmd: Command) -> Command {
    cmd.arg(source_path_arg().hide(true))
        .arg(source_text_arg().hide(true))
}

/// Add hidden runtime args (for commands that don't scan).
fn with_hidden_runtime_args(cmd: Command) -> Command {
    cmd.arg(max_depth_arg().hide(true))
        .arg(step_limit_arg().hide(true))
        .arg(verbose_arg().hide(true))
        .arg(json_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("lexforge")
        .about("Lexer generator with inheritable lexical groups")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(dump_command())
        .subcommand(emit_command())
        .subcommand(scan_command())
        .subcommand(trace_command())
}

/// Validate a definition.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a lexer definition")
        .override_usage(
            "\
  lexforge check <DEF>
  lexforge check -d <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  lexforge check lexer.lex                    # diagnostics only
  lexforge check lexer.lex --strict           # warnings fail too
  lexforge check -d 'group g { "a" => "skip" }'"#,
        )
        .arg(def_path_arg())
        .arg(def_text_arg())
        .arg(strict_arg())
        .arg(state_limit_arg())
        .arg(color_arg());

    with_hidden_runtime_args(with_hidden_source_args(cmd))
}

/// Show the automata or the artifact.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show the NFA, DFA or artifact of a definition")
        .override_usage(
            "\
  lexforge dump <DEF> [--stage <STAGE>] [--group <NAME>]
  lexforge dump -d <TEXT> [--stage <STAGE>]",
        )
        .after_help(
            r#"EXAMPLES:
  lexforge dump lexer.lex                     # artifact listing
  lexforge dump lexer.lex --stage nfa         # Thompson NFA per group
  lexforge dump lexer.lex --stage dfa -g str  # one group's DFA"#,
        )
        .arg(def_path_arg())
        .arg(def_text_arg())
        .arg(stage_arg())
        .arg(group_arg())
        .arg(state_limit_arg())
        .arg(color_arg());

    with_hidden_runtime_args(with_hidden_source_args(cmd))
}

/// Write the artifact.
pub fn emit_command() -> Command {
    let cmd = Command::new("emit")
        .about("Generate the lexer artifact")
        .override_usage(
            "\
  lexforge emit <DEF> [--format <FORMAT>] [-o <FILE>]
  lexforge emit -d <TEXT> [--format <FORMAT>] [-o <FILE>]",
        )
        .after_help(
            r#"EXAMPLES:
  lexforge emit lexer.lex                     # pretty JSON to stdout
  lexforge emit lexer.lex --compact           # single-line JSON
  lexforge emit lexer.lex --format binary -o lexer.lxfa"#,
        )
        .arg(def_path_arg())
        .arg(def_text_arg())
        .arg(format_arg())
        .arg(output_file_arg())
        .arg(compact_arg())
        .arg(state_limit_arg())
        .arg(color_arg());

    with_hidden_runtime_args(with_hidden_source_args(cmd))
}

/// Tokenize input with the reference runtime.
pub fn scan_command() -> Command {
    let cmd = Command::new("scan")
        .about("Tokenize input with the reference runtime")
        .override_usage(
            "\
  lexforge scan <DEF> <SOURCE>
  lexforge scan <DEF> -s <TEXT>
  lexforge scan -d <TEXT> <SOURCE>",
        )
        .after_help(
            r#"EXAMPLES:
  lexforge scan lexer.lex input.txt           # two positional files
  lexforge scan lexer.lex -s 'x = 1'          # inline input
  lexforge scan -d '...' input.txt --json     # inline definition"#,
        )
        .arg(def_path_arg())
        .arg(source_path_arg())
        .arg(def_text_arg())
        .arg(source_text_arg())
        .arg(json_arg())
        .arg(max_depth_arg())
        .arg(step_limit_arg())
        .arg(state_limit_arg())
        .arg(color_arg());

    cmd.arg(verbose_arg().hide(true))
}

/// Trace a scan for debugging.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Trace a scan step by step")
        .override_usage(
            "\
  lexforge trace <DEF> <SOURCE> [-v|-vv]
  lexforge trace <DEF> -s <TEXT>
  lexforge trace -d <TEXT> <SOURCE>",
        )
        .after_help(
            r#"EXAMPLES:
  lexforge trace lexer.lex input.txt          # fired rules and group changes
  lexforge trace lexer.lex -s 'x' -v          # plus accepting positions
  lexforge trace lexer.lex -s 'x' -vv         # plus every DFA step"#,
        )
        .arg(def_path_arg())
        .arg(source_path_arg())
        .arg(def_text_arg())
        .arg(source_text_arg())
        .arg(verbose_arg())
        .arg(max_depth_arg())
        .arg(step_limit_arg())
        .arg(state_limit_arg())
        .arg(color_arg());

    cmd.arg(json_arg().hide(true))
}
