//! Trace a scan for debugging.

use std::path::PathBuf;

use lexforge_core::Colors;
use lexforge_vm::{PrintTracer, RuntimeError, ScanLimits, Scanner, ScriptHandler, Verbosity};

use super::def_loader::{generate, load_all, prepare};
use super::scan::{input_name, render_error, render_tokens};

pub struct TraceArgs {
    pub def_path: Option<PathBuf>,
    pub def_text: Option<String>,
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub verbosity: Verbosity,
    pub max_depth: u32,
    pub step_limit: u64,
    pub state_limit: Option<usize>,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
    let (loaded, input) = load_all(
        args.def_path.as_deref(),
        args.def_text.as_deref(),
        args.source_path.as_deref(),
        args.source_text.as_deref(),
    );

    let definition = prepare(&loaded, false, args.color);
    let artifact = generate(&definition, args.state_limit);
    let colors = Colors::new(args.color);

    let scanner = Scanner::new(&artifact).limits(
        ScanLimits::new()
            .max_depth(args.max_depth)
            .step_limit(args.step_limit),
    );
    let mut handler = ScriptHandler::new(&artifact);
    let mut tracer = PrintTracer::new(&input, args.verbosity, colors);

    match scanner.scan_with(&input, &mut handler, &mut tracer) {
        Ok(_) => tracer.print(),
        Err(e @ RuntimeError::NoMatch { .. }) => {
            tracer.print();
            let name = input_name(args.source_path.as_ref());
            eprintln!("{}", render_error(&e, &input, &name));
            std::process::exit(1);
        }
        Err(e) => {
            tracer.print();
            eprintln!("runtime error: {}", e);
            std::process::exit(2);
        }
    }

    println!("{}---{}", colors.dim, colors.reset);
    print!("{}", render_tokens(handler.tokens(), false));
}
