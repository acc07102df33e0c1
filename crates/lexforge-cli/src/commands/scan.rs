use std::path::PathBuf;

use lexforge_artifact::LexerArtifact;
use lexforge_vm::{RuntimeError, ScanLimits, Scanner, ScriptHandler, Token};

use super::def_loader::{generate, load_all, prepare};

pub struct ScanArgs {
    pub def_path: Option<PathBuf>,
    pub def_text: Option<String>,
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub json: bool,
    pub max_depth: u32,
    pub step_limit: u64,
    pub state_limit: Option<usize>,
    pub color: bool,
}

pub fn run(args: ScanArgs) {
    let (loaded, input) = load_all(
        args.def_path.as_deref(),
        args.def_text.as_deref(),
        args.source_path.as_deref(),
        args.source_text.as_deref(),
    );

    let definition = prepare(&loaded, false, args.color);
    let artifact = generate(&definition, args.state_limit);
    let limits = ScanLimits::new()
        .max_depth(args.max_depth)
        .step_limit(args.step_limit);

    match scan(&artifact, &input, limits) {
        Ok(tokens) => print!("{}", render_tokens(&tokens, args.json)),
        Err(e) => {
            let name = input_name(args.source_path.as_ref());
            eprintln!("{}", render_error(&e, &input, &name));
            std::process::exit(1);
        }
    }
}

pub fn scan(
    artifact: &LexerArtifact,
    input: &str,
    limits: ScanLimits,
) -> Result<Vec<Token>, RuntimeError> {
    let mut handler = ScriptHandler::new(artifact);
    Scanner::new(artifact)
        .limits(limits)
        .scan(input, &mut handler)?;
    Ok(handler.into_tokens())
}

/// One token per line, or a JSON array.
pub fn render_tokens(tokens: &[Token], json: bool) -> String {
    if json {
        let values: Vec<serde_json::Value> = tokens
            .iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "text": t.text,
                    "start": t.span.start,
                    "end": t.span.end,
                    "group": t.group,
                })
            })
            .collect();
        let mut out = serde_json::to_string_pretty(&values).unwrap_or_default();
        out.push('\n');
        return out;
    }

    tokens.iter().map(|t| format!("{}\n", t)).collect()
}

/// `error: ...` plus the input position when the error has one.
pub fn render_error(error: &RuntimeError, input: &str, name: &str) -> String {
    let offset = match error {
        RuntimeError::NoMatch { offset, .. }
        | RuntimeError::GroupStackUnderflow { offset }
        | RuntimeError::Action { offset, .. } => Some(*offset),
        _ => None,
    };
    match offset {
        Some(offset) => {
            let (line, col) = line_col(input, offset);
            format!("error: {}\n  --> {}:{}:{}", error, name, line, col)
        }
        None => format!("error: {}", error),
    }
}

/// 1-based line and column (in chars) of a byte offset.
pub fn line_col(input: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(input.len());
    let before = input.get(..offset).unwrap_or(input);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}

pub fn input_name(source_path: Option<&PathBuf>) -> String {
    match source_path {
        Some(path) if path.as_os_str() == "-" => "<stdin>".to_string(),
        Some(path) => path.display().to_string(),
        None => "<source>".to_string(),
    }
}
