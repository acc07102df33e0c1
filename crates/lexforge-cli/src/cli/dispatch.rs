//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `from_matches()` pulls the relevant fields and ignores hidden ones
//! - `From<*Params>` impls bridge dispatch to the command handlers
//! - positional shifting for scan/trace (`-d` moves the first positional to the input)

use std::path::PathBuf;

use clap::ArgMatches;
use lexforge_vm::Verbosity;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::dump::{DumpArgs, Stage};
use crate::commands::emit::{EmitArgs, Format};
use crate::commands::scan::ScanArgs;
use crate::commands::trace::TraceArgs;

pub struct CheckParams {
    pub def_path: Option<PathBuf>,
    pub def_text: Option<String>,
    pub strict: bool,
    pub state_limit: Option<usize>,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            def_path: m.get_one::<PathBuf>("def_path").cloned(),
            def_text: m.get_one::<String>("def_text").cloned(),
            strict: m.get_flag("strict"),
            state_limit: m.get_one::<usize>("state_limit").copied(),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            def_path: p.def_path,
            def_text: p.def_text,
            strict: p.strict,
            state_limit: p.state_limit,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub def_path: Option<PathBuf>,
    pub def_text: Option<String>,
    pub stage: String,
    pub group: Option<String>,
    pub state_limit: Option<usize>,
    pub color: ColorChoice,
    // Note: source_path, source_text, json, verbose, max_depth, step_limit
    // are parsed but not extracted (unified flags)
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            def_path: m.get_one::<PathBuf>("def_path").cloned(),
            def_text: m.get_one::<String>("def_text").cloned(),
            stage: m
                .get_one::<String>("stage")
                .cloned()
                .unwrap_or_else(|| "artifact".to_string()),
            group: m.get_one::<String>("group").cloned(),
            state_limit: m.get_one::<usize>("state_limit").copied(),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        let stage = match p.stage.as_str() {
            "nfa" => Stage::Nfa,
            "dfa" => Stage::Dfa,
            _ => Stage::Artifact,
        };
        Self {
            def_path: p.def_path,
            def_text: p.def_text,
            stage,
            group: p.group,
            state_limit: p.state_limit,
            color: p.color.should_colorize(),
        }
    }
}

pub struct EmitParams {
    pub def_path: Option<PathBuf>,
    pub def_text: Option<String>,
    pub format: String,
    pub output: Option<PathBuf>,
    pub compact: bool,
    pub state_limit: Option<usize>,
    pub color: ColorChoice,
}

impl EmitParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            def_path: m.get_one::<PathBuf>("def_path").cloned(),
            def_text: m.get_one::<String>("def_text").cloned(),
            format: m
                .get_one::<String>("format")
                .cloned()
                .unwrap_or_else(|| "json".to_string()),
            output: m.get_one::<PathBuf>("output").cloned(),
            compact: m.get_flag("compact"),
            state_limit: m.get_one::<usize>("state_limit").copied(),
            color: parse_color(m),
        }
    }
}

impl From<EmitParams> for EmitArgs {
    fn from(p: EmitParams) -> Self {
        let format = match p.format.as_str() {
            "binary" => Format::Binary,
            _ => Format::Json,
        };
        Self {
            def_path: p.def_path,
            def_text: p.def_text,
            format,
            output: p.output,
            compact: p.compact,
            state_limit: p.state_limit,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ScanParams {
    pub def_path: Option<PathBuf>,
    pub def_text: Option<String>,
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub json: bool,
    pub max_depth: u32,
    pub step_limit: u64,
    pub state_limit: Option<usize>,
    pub color: ColorChoice,
    // Note: verbose is parsed but not extracted (unified flags)
}

impl ScanParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let def_path = m.get_one::<PathBuf>("def_path").cloned();
        let def_text = m.get_one::<String>("def_text").cloned();
        let source_path = m.get_one::<PathBuf>("source_path").cloned();

        let (def_path, source_path) =
            shift_positional_to_source(def_text.is_some(), def_path, source_path);

        Self {
            def_path,
            def_text,
            source_path,
            source_text: m.get_one::<String>("source_text").cloned(),
            json: m.get_flag("json"),
            max_depth: m.get_one::<u32>("max_depth").copied().unwrap_or(1024),
            step_limit: m
                .get_one::<u64>("step_limit")
                .copied()
                .unwrap_or(100_000_000),
            state_limit: m.get_one::<usize>("state_limit").copied(),
            color: parse_color(m),
        }
    }
}

impl From<ScanParams> for ScanArgs {
    fn from(p: ScanParams) -> Self {
        Self {
            def_path: p.def_path,
            def_text: p.def_text,
            source_path: p.source_path,
            source_text: p.source_text,
            json: p.json,
            max_depth: p.max_depth,
            step_limit: p.step_limit,
            state_limit: p.state_limit,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub def_path: Option<PathBuf>,
    pub def_text: Option<String>,
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub verbose: u8,
    pub max_depth: u32,
    pub step_limit: u64,
    pub state_limit: Option<usize>,
    pub color: ColorChoice,
    // Note: json is parsed but not extracted (unified flags)
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let def_path = m.get_one::<PathBuf>("def_path").cloned();
        let def_text = m.get_one::<String>("def_text").cloned();
        let source_path = m.get_one::<PathBuf>("source_path").cloned();

        let (def_path, source_path) =
            shift_positional_to_source(def_text.is_some(), def_path, source_path);

        Self {
            def_path,
            def_text,
            source_path,
            source_text: m.get_one::<String>("source_text").cloned(),
            verbose: m.get_count("verbose"),
            max_depth: m.get_one::<u32>("max_depth").copied().unwrap_or(1024),
            step_limit: m
                .get_one::<u64>("step_limit")
                .copied()
                .unwrap_or(100_000_000),
            state_limit: m.get_one::<usize>("state_limit").copied(),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        };
        Self {
            def_path: p.def_path,
            def_text: p.def_text,
            source_path: p.source_path,
            source_text: p.source_text,
            verbosity,
            max_depth: p.max_depth,
            step_limit: p.step_limit,
            state_limit: p.state_limit,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// When -d is used with a single positional arg, shift it from the
/// definition to the input. This enables: `lexforge scan -d '...' input.txt`
pub(super) fn shift_positional_to_source(
    has_def_text: bool,
    def_path: Option<PathBuf>,
    source_path: Option<PathBuf>,
) -> (Option<PathBuf>, Option<PathBuf>) {
    if has_def_text && def_path.is_some() && source_path.is_none() {
        (None, def_path)
    } else {
        (def_path, source_path)
    }
}
