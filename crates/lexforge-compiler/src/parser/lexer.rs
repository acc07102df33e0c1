//! Lexer for the definition language.
//!
//! Produces span-based tokens; text is sliced from the source when needed.
//! Whitespace and comments are dropped, and consecutive characters no rule
//! matches are coalesced into one `Garbage` token.

use logos::Logos;

use crate::diagnostics::Span;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[token("group")]
    GroupKw,
    #[token("extends")]
    ExtendsKw,
    #[token("on_exit")]
    OnExitKw,
    #[token("initial")]
    InitialKw,
    #[token("never")]
    NeverKw,
    #[token("eps")]
    EpsKw,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("|")]
    Pipe,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("?")]
    Question,
    #[token(".")]
    Dot,
    #[token("=>")]
    Arrow,

    /// Quoted text including its quotes.
    #[regex(r#""(?:[^"\\\n]|\\.)*""#)]
    #[regex(r"'(?:[^'\\\n]|\\.)*'")]
    Str,
    /// A quote with no closing quote on the same line.
    #[regex(r#""(?:[^"\\\n]|\\.)*"#, allow_greedy = true)]
    #[regex(r"'(?:[^'\\\n]|\\.)*", allow_greedy = true)]
    UnterminatedStr,

    /// Character class including its brackets.
    #[regex(r"\[(?:[^\]\\\n]|\\.)*\]")]
    Class,
    #[regex(r"\[(?:[^\]\\\n]|\\.)*", allow_greedy = true)]
    UnterminatedClass,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,
    #[regex(r"#[^\n]*", allow_greedy = true)]
    Comment,

    /// Coalesced lexer errors.
    Garbage,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }

    /// How the token is named in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::GroupKw => "`group`",
            TokenKind::ExtendsKw => "`extends`",
            TokenKind::OnExitKw => "`on_exit`",
            TokenKind::InitialKw => "`initial`",
            TokenKind::NeverKw => "`never`",
            TokenKind::EpsKw => "`eps`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Pipe => "`|`",
            TokenKind::Star => "`*`",
            TokenKind::Plus => "`+`",
            TokenKind::Question => "`?`",
            TokenKind::Dot => "`.`",
            TokenKind::Arrow => "`=>`",
            TokenKind::Str | TokenKind::UnterminatedStr => "string",
            TokenKind::Class | TokenKind::UnterminatedClass => "character class",
            TokenKind::Ident => "identifier",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comment => "comment",
            TokenKind::Garbage => "unrecognized input",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Slice of `source` this token covers.
    #[inline]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.range()]
    }
}

/// Tokenize `source`, dropping trivia.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(TokenKind::Garbage, Span::new(start, end)));
                }
                if !kind.is_trivia() {
                    tokens.push(Token::new(kind, lexer.span().into()));
                }
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(TokenKind::Garbage, Span::new(start, source.len())));
                }
                break;
            }
        }
    }

    tokens
}
