//! Reference handler that reads action bodies as commands.
//!
//! An action body is a `;`-separated list of commands:
//! - `token NAME` - emit a token named `NAME` covering the match
//! - `push GROUP` - enter the group named `GROUP`
//! - `pop` - leave the current group
//! - `skip` - emit nothing
//!
//! At most one `push` or `pop` per body. Exit bindings may only emit tokens.

use std::fmt;
use std::ops::Range;

use lexforge_artifact::LexerArtifact;

use super::error::RuntimeError;
use super::handler::{ExitMatch, Handler, RuleMatch, Transition};
use super::scanner::Scanner;

/// A token emitted by a `token` command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub name: String,
    /// Matched text. Empty for tokens emitted on group exit.
    pub text: String,
    pub span: Range<usize>,
    /// Group the emitting rule or exit binding belongs to.
    pub group: u32,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{} {} {:?}",
            self.span.start, self.span.end, self.name, self.text
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Command<'a> {
    Token(&'a str),
    Push(&'a str),
    Pop,
    Skip,
}

pub(super) fn parse_commands(body: &str) -> Result<Vec<Command<'_>>, String> {
    body.split(';')
        .map(str::trim)
        .filter(|cmd| !cmd.is_empty())
        .map(|cmd| {
            let words: Vec<&str> = cmd.split_whitespace().collect();
            match words.as_slice() {
                ["token", name] => Ok(Command::Token(*name)),
                ["push", group] => Ok(Command::Push(*group)),
                ["pop"] => Ok(Command::Pop),
                ["skip"] => Ok(Command::Skip),
                _ => Err(format!("unknown command `{cmd}`")),
            }
        })
        .collect()
}

fn action_error(offset: usize, message: impl Into<String>) -> RuntimeError {
    RuntimeError::Action {
        offset,
        message: message.into(),
    }
}

/// Collects tokens and resolves `push` targets by group name.
#[derive(Clone, Debug)]
pub struct ScriptHandler<'a> {
    artifact: &'a LexerArtifact,
    tokens: Vec<Token>,
}

impl<'a> ScriptHandler<'a> {
    pub fn new(artifact: &'a LexerArtifact) -> Self {
        Self {
            artifact,
            tokens: Vec::new(),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

impl Handler for ScriptHandler<'_> {
    fn on_rule(&mut self, m: &RuleMatch<'_>) -> Result<Transition, RuntimeError> {
        let offset = m.span.start;
        let commands = parse_commands(m.action.as_str()).map_err(|e| action_error(offset, e))?;

        let mut transition = Transition::Continue;
        for command in commands {
            let next = match command {
                Command::Token(name) => {
                    self.tokens.push(Token {
                        name: name.to_string(),
                        text: m.text.to_string(),
                        span: m.span.clone(),
                        group: m.group,
                    });
                    continue;
                }
                Command::Skip => continue,
                Command::Pop => Transition::Pop,
                Command::Push(name) => {
                    let group = self
                        .artifact
                        .group_by_name(name)
                        .ok_or_else(|| action_error(offset, format!("unknown group `{name}`")))?;
                    Transition::Push(group.index)
                }
            };
            if transition != Transition::Continue {
                return Err(action_error(offset, "more than one group change"));
            }
            transition = next;
        }
        Ok(transition)
    }

    fn on_exit(&mut self, m: &ExitMatch<'_>) -> Result<(), RuntimeError> {
        let commands = parse_commands(m.action.as_str()).map_err(|e| action_error(m.offset, e))?;
        for command in commands {
            match command {
                Command::Token(name) => self.tokens.push(Token {
                    name: name.to_string(),
                    text: String::new(),
                    span: m.offset..m.offset,
                    group: m.group,
                }),
                Command::Skip => {}
                Command::Push(_) | Command::Pop => {
                    return Err(action_error(m.offset, "exit actions cannot change groups"));
                }
            }
        }
        Ok(())
    }
}

/// Scan `input` with a [`ScriptHandler`] and return its tokens.
pub fn tokenize(artifact: &LexerArtifact, input: &str) -> Result<Vec<Token>, RuntimeError> {
    let mut handler = ScriptHandler::new(artifact);
    Scanner::new(artifact).scan(input, &mut handler)?;
    Ok(handler.into_tokens())
}
