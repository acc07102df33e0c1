use std::path::PathBuf;

use super::def_loader::{generate, load_definition, prepare};

pub struct CheckArgs {
    pub def_path: Option<PathBuf>,
    pub def_text: Option<String>,
    pub strict: bool,
    pub state_limit: Option<usize>,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let loaded = match load_definition(args.def_path.as_deref(), args.def_text.as_deref()) {
        Ok(loaded) => loaded,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };

    let definition = prepare(&loaded, args.strict, args.color);

    // Generation catches state blowups the parser cannot see.
    generate(&definition, args.state_limit);

    // Silent on success (like cargo check)
}
