use lexforge_artifact::LexerArtifact;
use lexforge_compiler::compile_definition;

/// Compile a definition, panicking with its diagnostics on failure.
pub fn compile(source: &str) -> LexerArtifact {
    match compile_definition(source) {
        Ok(artifact) => artifact,
        Err(lexforge_compiler::Error::DefinitionParseError(diagnostics)) => {
            panic!("definition failed to parse:\n{}", diagnostics.render(source))
        }
        Err(e) => panic!("definition failed to compile: {e}"),
    }
}
