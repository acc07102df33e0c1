use std::fmt::Write as _;
use std::path::PathBuf;

use lexforge_artifact::{dump, dump_group};
use lexforge_compiler::{Definition, Generator};
use lexforge_core::{Colors, GroupId};

use super::def_loader::{load_definition, prepare};

/// Pipeline stage shown by `dump`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Stage {
    Nfa,
    Dfa,
    #[default]
    Artifact,
}

pub struct DumpArgs {
    pub def_path: Option<PathBuf>,
    pub def_text: Option<String>,
    pub stage: Stage,
    pub group: Option<String>,
    pub state_limit: Option<usize>,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let loaded = match load_definition(args.def_path.as_deref(), args.def_text.as_deref()) {
        Ok(loaded) => loaded,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };

    let definition = prepare(&loaded, false, args.color);
    let colors = Colors::new(args.color);

    match render(
        &definition,
        args.stage,
        args.group.as_deref(),
        args.state_limit,
        colors,
    ) {
        Ok(out) => print!("{}", out),
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    }
}

/// Listing of `stage` for every group, or only for `group`.
pub fn render(
    definition: &Definition,
    stage: Stage,
    group: Option<&str>,
    state_limit: Option<usize>,
    colors: Colors,
) -> Result<String, String> {
    let mut generator = definition.generator();
    if let Some(limit) = state_limit {
        generator = generator.state_limit(limit);
    }

    let selected: Vec<GroupId> = match group {
        Some(name) => match definition.group(name) {
            Some(id) => vec![id],
            None => return Err(format!("no group named `{}`", name)),
        },
        None => definition.registry().groups().map(|g| g.id()).collect(),
    };

    if stage == Stage::Artifact {
        let artifact = generator.generate_all().map_err(|e| e.to_string())?;
        return match group {
            None => Ok(dump(&artifact, colors)),
            Some(_) => {
                let index = selected[0].get();
                dump_group(&artifact, index, colors).ok_or_else(|| format!("no group {index}"))
            }
        };
    }

    let mut out = String::new();
    for (i, &id) in selected.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_automaton(&mut out, definition, &generator, id, stage, colors)?;
    }
    Ok(out)
}

fn write_automaton(
    out: &mut String,
    definition: &Definition,
    generator: &Generator<'_>,
    id: GroupId,
    stage: Stage,
    c: Colors,
) -> Result<(), String> {
    let name = definition
        .registry()
        .group(id)
        .map(|g| g.name())
        .unwrap_or_default();
    writeln!(out, "{}group{} {}{}", c.blue, id.get(), name, c.reset).unwrap();

    let body = match stage {
        Stage::Nfa => generator.nfa(id).map(|nfa| nfa.to_string()),
        _ => generator.dfa(id).map(|dfa| dfa.to_string()),
    };
    let body = body.map_err(|e| format!("group `{}`: {}", name, e))?;
    for line in body.lines() {
        writeln!(out, "  {}", line).unwrap();
    }
    Ok(())
}
