use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use lexforge_artifact::LexerArtifact;

use super::def_loader::{generate, load_definition, prepare};

/// Artifact encoding written by `emit`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Json,
    Binary,
}

pub struct EmitArgs {
    pub def_path: Option<PathBuf>,
    pub def_text: Option<String>,
    pub format: Format,
    pub output: Option<PathBuf>,
    pub compact: bool,
    pub state_limit: Option<usize>,
    pub color: bool,
}

pub fn run(args: EmitArgs) {
    let loaded = match load_definition(args.def_path.as_deref(), args.def_text.as_deref()) {
        Ok(loaded) => loaded,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };

    let definition = prepare(&loaded, false, args.color);
    let artifact = generate(&definition, args.state_limit);
    let bytes = encode(&artifact, args.format, args.compact);

    let result = match &args.output {
        Some(path) => {
            fs::write(path, &bytes).map_err(|e| format!("failed to write '{}': {}", path.display(), e))
        }
        None if args.format == Format::Binary && io::stdout().is_terminal() => {
            Err("refusing to write a binary artifact to a terminal; use -o <FILE>".to_string())
        }
        None => io::stdout()
            .write_all(&bytes)
            .map_err(|e| format!("failed to write stdout: {}", e)),
    };

    if let Err(msg) = result {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    }
}

/// Encoded artifact. JSON output ends with a newline.
pub fn encode(artifact: &LexerArtifact, format: Format, compact: bool) -> Vec<u8> {
    match format {
        Format::Json => {
            let mut json = artifact.to_json(!compact);
            json.push('\n');
            json.into_bytes()
        }
        Format::Binary => artifact.to_bytes(),
    }
}
