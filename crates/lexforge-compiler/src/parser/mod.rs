//! Definition language front-end.
//!
//! ```text
//! # comments start with '#'
//! group main {
//!     [a-z_] [a-z0-9_]*   => "token ident"
//!     '"'                 => "token quote; push string"
//!     [ \t\n]+            => "skip"
//! }
//!
//! group string extends main on_exit "token string_end" {
//!     [^"\\]+             => "token chunk"
//!     '"'                 => "pop"
//! }
//! ```
//!
//! Parsing runs in two passes: the grammar collects group declarations, then
//! the groups are registered so that `extends` may name a group declared
//! further down.

mod grammar;
mod lexer;
mod literal;

#[cfg(test)]
mod grammar_tests;
#[cfg(test)]
mod literal_tests;

use indexmap::IndexMap;

use lexforge_core::{Action, GroupId, Registry};

use crate::diagnostics::{DiagnosticKind, Diagnostics, Span};
use crate::generator::Generator;
use crate::{Error, Result};

pub use grammar::{GroupDecl, MAX_NESTING, Parser, RuleDecl};
pub use lexer::{Token, TokenKind, lex};
pub use literal::{class_pattern, string_pattern, unescape};

/// A parsed lexer definition.
#[derive(Debug, Clone)]
pub struct Definition {
    registry: Registry,
    initial: GroupId,
}

impl Definition {
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn into_registry(self) -> Registry {
        self.registry
    }

    /// Group the scanner starts in: the one marked `initial`, else the first.
    pub fn initial(&self) -> GroupId {
        self.initial
    }

    pub fn group(&self, name: &str) -> Option<GroupId> {
        self.registry.group_by_name(name).map(|g| g.id())
    }

    /// Generator over this definition's registry, starting in its initial group.
    pub fn generator(&self) -> Generator<'_> {
        Generator::new(&self.registry).initial(self.initial)
    }
}

/// Parse `source`, failing if any error was reported.
pub fn parse(source: &str) -> Result<Definition> {
    let (definition, diagnostics) = parse_with_diagnostics(source);
    if diagnostics.has_errors() {
        return Err(Error::DefinitionParseError(diagnostics));
    }
    Ok(definition)
}

/// Parse `source`, returning whatever could be registered alongside every
/// diagnostic, warnings included.
pub fn parse_with_diagnostics(source: &str) -> (Definition, Diagnostics) {
    let tokens = lex(source);
    let (decls, mut diagnostics) = Parser::new(source, tokens).parse();
    let definition = register(&decls, &mut diagnostics);
    (definition, diagnostics)
}

/// Turn declarations into a registry, reporting definition-level problems.
fn register(decls: &[GroupDecl], diagnostics: &mut Diagnostics) -> Definition {
    let mut registry = Registry::new();
    let mut declared: IndexMap<&str, (GroupId, Span)> = IndexMap::new();
    let mut ids: Vec<Option<GroupId>> = Vec::with_capacity(decls.len());

    for decl in decls {
        if let Some(&(_, first)) = declared.get(decl.name.as_str()) {
            diagnostics
                .report(DiagnosticKind::DuplicateGroup, decl.name_span)
                .message(&decl.name)
                .related_to("first defined here", first)
                .emit();
            ids.push(None);
            continue;
        }
        let id = registry.new_group(&decl.name, decl.on_exit.as_deref().map(Action::from));
        for rule in &decl.rules {
            registry.add_rule(id, rule.pattern.clone(), rule.action.as_str());
        }
        declared.insert(&decl.name, (id, decl.name_span));
        ids.push(Some(id));
    }

    for (decl, id) in decls.iter().zip(&ids) {
        let (Some(id), Some((parent_name, parent_span))) = (id, &decl.parent) else {
            continue;
        };
        let Some(&(parent, _)) = declared.get(parent_name.as_str()) else {
            diagnostics
                .report(DiagnosticKind::UnknownParent, *parent_span)
                .message(parent_name)
                .emit();
            continue;
        };
        if registry.set_parent(*id, parent).is_err() {
            let detail = format!("`{}` is already an ancestor of `{parent_name}`", decl.name);
            diagnostics
                .report(DiagnosticKind::CyclicParent, *parent_span)
                .message(detail)
                .emit();
        }
    }

    for (decl, id) in decls.iter().zip(&ids) {
        if id.is_some() && decl.rules.is_empty() && decl.parent.is_none() {
            diagnostics
                .report(DiagnosticKind::EmptyGroup, decl.name_span)
                .message(&decl.name)
                .emit();
        }
    }

    let mut marked = decls
        .iter()
        .zip(&ids)
        .filter_map(|(decl, id)| Some(((*id)?, decl.initial?)));
    let initial = marked.next().map(|(id, _)| id);
    for (_, span) in marked {
        diagnostics
            .report(DiagnosticKind::MultipleInitial, span)
            .emit();
    }

    if decls.is_empty() {
        diagnostics
            .report(DiagnosticKind::NoGroups, Span::at(0))
            .emit();
    }

    Definition {
        registry,
        initial: initial.unwrap_or(GroupId::new(0)),
    }
}
