//! Recursive-descent parser producing group declarations.
//!
//! Grammar:
//!
//! ```text
//! definition := group*
//! group      := "initial"? "group" IDENT ("extends" IDENT)? ("on_exit" STR)? "{" rule* "}"
//! rule       := alt "=>" STR
//! alt        := concat ("|" concat)*
//! concat     := postfix+
//! postfix    := atom ("*" | "+" | "?")*
//! atom       := STR | CLASS | "." | "never" | "eps" | "(" alt ")"
//! ```
//!
//! Errors are reported to [`Diagnostics`] and parsing resumes at the next
//! rule or group, so one pass surfaces as many problems as possible.

use lexforge_core::Pattern;

use super::lexer::{Token, TokenKind};
use super::literal::{class_pattern, string_pattern, string_value};
use crate::diagnostics::{DiagnosticKind, Diagnostics, Span};

/// Maximum nesting of parenthesized patterns.
pub const MAX_NESTING: u32 = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDecl {
    pub name: String,
    pub name_span: Span,
    /// Span of the `initial` keyword, when present.
    pub initial: Option<Span>,
    pub parent: Option<(String, Span)>,
    pub on_exit: Option<String>,
    pub rules: Vec<RuleDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDecl {
    pub pattern: Pattern,
    pub action: String,
    pub span: Span,
}

pub struct Parser<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    pos: usize,
    depth: u32,
    diagnostics: Diagnostics,
}

impl<'s> Parser<'s> {
    pub fn new(source: &'s str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            depth: 0,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn parse(mut self) -> (Vec<GroupDecl>, Diagnostics) {
        let mut groups = Vec::new();
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::GroupKw | TokenKind::InitialKw => {
                    if let Some(group) = self.group() {
                        groups.push(group);
                    }
                }
                _ => {
                    self.unexpected(token, "expected `group`");
                    self.bump();
                }
            }
        }
        (groups, self.diagnostics)
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek_kind() == Some(kind) {
            self.bump()
        } else {
            None
        }
    }

    /// Span of the current token, or an empty span at end of input.
    fn here(&self) -> Span {
        match self.peek() {
            Some(token) => token.span,
            None => Span::at(self.source.len()),
        }
    }

    fn text(&self, token: Token) -> &'s str {
        token.text(self.source)
    }

    fn unexpected(&mut self, token: Token, expected: &str) {
        let detail = format!("found {}, {expected}", token.kind.describe());
        self.diagnostics
            .report(DiagnosticKind::UnexpectedToken, token.span)
            .message(detail)
            .emit();
    }

    fn report(&mut self, kind: DiagnosticKind, span: Span) {
        self.diagnostics.report(kind, span).emit();
    }

    fn at_group_start(&self) -> bool {
        matches!(
            self.peek_kind(),
            Some(TokenKind::GroupKw | TokenKind::InitialKw)
        )
    }

    /// Skip to the next group declaration.
    fn recover_group(&mut self) {
        while self.peek().is_some() && !self.at_group_start() {
            self.bump();
        }
    }

    /// Skip past the current rule: through its `=> STR`, or up to the end of
    /// the enclosing group.
    fn recover_rule(&mut self) {
        while let Some(kind) = self.peek_kind() {
            match kind {
                TokenKind::RBrace | TokenKind::GroupKw | TokenKind::InitialKw => break,
                TokenKind::Arrow => {
                    self.bump();
                    self.eat(TokenKind::Str);
                    break;
                }
                _ => {
                    self.bump();
                }
            }
        }
    }

    fn group(&mut self) -> Option<GroupDecl> {
        let initial = self.eat(TokenKind::InitialKw).map(|t| t.span);
        if self.eat(TokenKind::GroupKw).is_none() {
            match self.peek() {
                Some(token) => self.unexpected(token, "expected `group` after `initial`"),
                None => self.report(DiagnosticKind::ExpectedGroupName, self.here()),
            }
            self.bump();
            self.recover_group();
            return None;
        }

        let Some(name) = self.eat(TokenKind::Ident) else {
            self.report(DiagnosticKind::ExpectedGroupName, self.here());
            self.recover_group();
            return None;
        };

        let mut parent = None;
        if self.eat(TokenKind::ExtendsKw).is_some() {
            match self.eat(TokenKind::Ident) {
                Some(token) => parent = Some((self.text(token).to_string(), token.span)),
                None => {
                    self.report(DiagnosticKind::ExpectedGroupName, self.here());
                    self.recover_group();
                    return None;
                }
            }
        }

        let mut on_exit = None;
        if self.eat(TokenKind::OnExitKw).is_some() {
            match self.eat(TokenKind::Str) {
                Some(token) => {
                    let text = self.text(token);
                    on_exit = Some(string_value(text, token.span.start as usize, &mut self.diagnostics));
                }
                None => {
                    self.diagnostics
                        .report(DiagnosticKind::ExpectedAction, self.here())
                        .message("`on_exit` takes an action string")
                        .emit();
                    self.recover_group();
                    return None;
                }
            }
        }

        let Some(open) = self.eat(TokenKind::LBrace) else {
            self.report(DiagnosticKind::ExpectedOpenBrace, self.here());
            self.recover_group();
            return None;
        };

        let mut rules = Vec::new();
        loop {
            match self.peek_kind() {
                Some(TokenKind::RBrace) => {
                    self.bump();
                    break;
                }
                None | Some(TokenKind::GroupKw | TokenKind::InitialKw) => {
                    self.report(DiagnosticKind::UnclosedGroup, open.span);
                    break;
                }
                Some(_) => {
                    if let Some(rule) = self.rule() {
                        rules.push(rule);
                    }
                }
            }
        }

        Some(GroupDecl {
            name: self.text(name).to_string(),
            name_span: name.span,
            initial,
            parent,
            on_exit,
            rules,
        })
    }

    fn rule(&mut self) -> Option<RuleDecl> {
        let start = self.here();
        let Some(pattern) = self.alt() else {
            self.recover_rule();
            return None;
        };

        if self.eat(TokenKind::Arrow).is_none() {
            self.report(DiagnosticKind::ExpectedAction, self.here());
            self.recover_rule();
            return None;
        }
        let Some(action) = self.eat(TokenKind::Str) else {
            self.report(DiagnosticKind::ExpectedAction, self.here());
            return None;
        };

        let text = self.text(action);
        let action_text = string_value(text, action.span.start as usize, &mut self.diagnostics);
        Some(RuleDecl {
            pattern,
            action: action_text,
            span: start.cover(action.span),
        })
    }

    fn alt(&mut self) -> Option<Pattern> {
        let mut alternatives = vec![self.concat()?];
        while self.eat(TokenKind::Pipe).is_some() {
            alternatives.push(self.concat()?);
        }
        Some(Pattern::choice(alternatives))
    }

    fn concat(&mut self) -> Option<Pattern> {
        let mut items = Vec::new();
        while self.peek_kind().is_some_and(is_atom_start) {
            items.push(self.postfix()?);
        }
        if items.is_empty() {
            match self.peek() {
                Some(token) if token.kind == TokenKind::Garbage => {
                    let detail = format!("`{}`", self.text(token));
                    self.diagnostics
                        .report(DiagnosticKind::UnexpectedToken, token.span)
                        .message(detail)
                        .emit();
                }
                _ => self.report(DiagnosticKind::ExpectedPattern, self.here()),
            }
            return None;
        }
        Some(Pattern::seq(items))
    }

    /// A run of postfix operators collapses into one: `p++` is `p+`, `p??`
    /// is `p?`, and any other mix is `p*`.
    fn postfix(&mut self) -> Option<Pattern> {
        let pattern = self.atom()?;
        let mut op: Option<TokenKind> = None;
        while let Some(kind @ (TokenKind::Star | TokenKind::Plus | TokenKind::Question)) =
            self.peek_kind()
        {
            self.bump();
            op = match op {
                None => Some(kind),
                Some(prev) if prev == kind => Some(kind),
                Some(_) => Some(TokenKind::Star),
            };
        }
        Some(match op {
            Some(TokenKind::Star) => Pattern::repeat(pattern),
            Some(TokenKind::Plus) => Pattern::many1(pattern),
            Some(TokenKind::Question) => Pattern::opt(pattern),
            _ => pattern,
        })
    }

    fn atom(&mut self) -> Option<Pattern> {
        let token = self.bump()?;
        let offset = token.span.start as usize;
        match token.kind {
            TokenKind::Str => Some(string_pattern(
                self.text(token),
                offset,
                &mut self.diagnostics,
            )),
            TokenKind::Class => Some(class_pattern(
                self.text(token),
                offset,
                &mut self.diagnostics,
            )),
            TokenKind::UnterminatedStr => {
                self.report(DiagnosticKind::UnterminatedString, token.span);
                None
            }
            TokenKind::UnterminatedClass => {
                self.report(DiagnosticKind::UnterminatedClass, token.span);
                None
            }
            TokenKind::Dot => Some(Pattern::any()),
            TokenKind::NeverKw => Some(Pattern::never()),
            TokenKind::EpsKw => Some(Pattern::epsilon()),
            TokenKind::LParen => {
                if self.depth >= MAX_NESTING {
                    self.diagnostics
                        .report(DiagnosticKind::NestingTooDeep, token.span)
                        .emit();
                    return None;
                }
                self.depth += 1;
                let inner = self.alt();
                self.depth -= 1;
                let inner = inner?;
                if self.eat(TokenKind::RParen).is_none() {
                    self.report(DiagnosticKind::UnclosedParen, token.span);
                    return None;
                }
                Some(inner)
            }
            _ => {
                self.unexpected(token, "expected a pattern");
                None
            }
        }
    }
}

fn is_atom_start(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Str
            | TokenKind::UnterminatedStr
            | TokenKind::Class
            | TokenKind::UnterminatedClass
            | TokenKind::Dot
            | TokenKind::NeverKw
            | TokenKind::EpsKw
            | TokenKind::LParen
    )
}
