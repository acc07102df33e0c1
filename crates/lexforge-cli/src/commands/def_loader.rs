//! Loading definitions and inputs, and the parse/generate steps every
//! command shares.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use lexforge_artifact::LexerArtifact;
use lexforge_compiler::{Definition, parse_with_diagnostics};

/// Definition text plus the name diagnostics refer to it by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDefinition {
    pub name: String,
    pub source: String,
}

pub fn load_definition(
    def_path: Option<&Path>,
    def_text: Option<&str>,
) -> Result<LoadedDefinition, String> {
    if let Some(text) = def_text {
        return Ok(LoadedDefinition {
            name: "<def>".to_string(),
            source: text.to_string(),
        });
    }

    if let Some(path) = def_path {
        if path.as_os_str() == "-" {
            return Ok(LoadedDefinition {
                name: "<stdin>".to_string(),
                source: read_stdin()?,
            });
        }
        return Ok(LoadedDefinition {
            name: path.to_string_lossy().into_owned(),
            source: read_file(path)?,
        });
    }

    Err("definition is required: use positional argument or -d/--def".to_string())
}

pub fn load_input(source_path: Option<&Path>, source_text: Option<&str>) -> Result<String, String> {
    if let Some(text) = source_text {
        return Ok(text.to_string());
    }

    if let Some(path) = source_path {
        if path.as_os_str() == "-" {
            return read_stdin();
        }
        return read_file(path);
    }

    Err("input is required: use positional argument or -s/--source".to_string())
}

fn read_stdin() -> Result<String, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {}", e))?;
    Ok(buf)
}

fn read_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}

/// Parse the definition, printing diagnostics. Exits on errors, and on
/// warnings when `strict` is set.
pub fn prepare(loaded: &LoadedDefinition, strict: bool, color: bool) -> Definition {
    let (definition, diagnostics) = parse_with_diagnostics(&loaded.source);

    if !diagnostics.is_empty() {
        let rendered = diagnostics
            .printer()
            .source(&loaded.source)
            .path(&loaded.name)
            .colored(color)
            .render();
        eprint!("{}", rendered);
    }

    let failed = diagnostics.has_errors() || (strict && diagnostics.has_warnings());
    if failed {
        std::process::exit(1);
    }
    definition
}

/// Generate the artifact for every group of `definition`. Exits on failure.
pub fn generate(definition: &Definition, state_limit: Option<usize>) -> LexerArtifact {
    let mut generator = definition.generator();
    if let Some(limit) = state_limit {
        generator = generator.state_limit(limit);
    }
    match generator.generate_all() {
        Ok(artifact) => artifact,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Definition and input in one go, for the commands that scan.
pub fn load_all(
    def_path: Option<&Path>,
    def_text: Option<&str>,
    source_path: Option<&Path>,
    source_text: Option<&str>,
) -> (LoadedDefinition, String) {
    let loaded = load_definition(def_path, def_text).unwrap_or_else(|msg| {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    });
    let input = load_input(source_path, source_text).unwrap_or_else(|msg| {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    });
    (loaded, input)
}
