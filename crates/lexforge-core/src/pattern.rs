//! Pattern algebra.
//!
//! A [`Pattern`] describes the shape of a lexical rule. The six primitive
//! variants are all the automaton builder understands; the convenience
//! constructors (`literal`, `none_of`, `many1`, ...) expand into them.

use std::fmt;
use std::ops::{BitOr, Shr};

use crate::utils::escape_code_point;

/// A single input symbol: a Unicode scalar value widened to `u32`.
pub type CodePoint = u32;

/// Largest code point of the alphabet. Every automaton is total over
/// `0..=MAX_CODE_POINT`.
pub const MAX_CODE_POINT: CodePoint = char::MAX as CodePoint;

/// Immutable expression tree describing a lexical shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Matches nothing.
    Never,
    /// Matches the empty string.
    Epsilon,
    /// Matches one code point in `lo..=hi`. `lo > hi` matches nothing.
    CodeRange(CodePoint, CodePoint),
    /// Matches the first pattern followed by the second.
    Concat(Box<Pattern>, Box<Pattern>),
    /// Zero or more repetitions.
    Repeat(Box<Pattern>),
    /// Either pattern.
    Alt(Box<Pattern>, Box<Pattern>),
}

impl Pattern {
    pub fn never() -> Self {
        Pattern::Never
    }

    pub fn epsilon() -> Self {
        Pattern::Epsilon
    }

    pub fn range(lo: CodePoint, hi: CodePoint) -> Self {
        Pattern::CodeRange(lo, hi)
    }

    pub fn concat(first: Pattern, second: Pattern) -> Self {
        Pattern::Concat(Box::new(first), Box::new(second))
    }

    pub fn repeat(body: Pattern) -> Self {
        Pattern::Repeat(Box::new(body))
    }

    pub fn alt(left: Pattern, right: Pattern) -> Self {
        Pattern::Alt(Box::new(left), Box::new(right))
    }

    /// A single character.
    pub fn char(c: char) -> Self {
        Pattern::CodeRange(c as CodePoint, c as CodePoint)
    }

    /// An inclusive character range.
    pub fn char_range(lo: char, hi: char) -> Self {
        Pattern::CodeRange(lo as CodePoint, hi as CodePoint)
    }

    /// Any single code point.
    pub fn any() -> Self {
        Pattern::CodeRange(0, MAX_CODE_POINT)
    }

    /// The exact character sequence `text`. The empty string is `Epsilon`.
    pub fn literal(text: &str) -> Self {
        Self::seq(text.chars().map(Self::char))
    }

    /// Alias of [`Pattern::literal`].
    pub fn all_of(text: &str) -> Self {
        Self::literal(text)
    }

    /// Any one character of `chars`. The empty set is `Never`.
    pub fn any_of(chars: &str) -> Self {
        Self::choice(chars.chars().map(Self::char))
    }

    /// Any one code point that is not in `chars`.
    pub fn none_of(chars: &str) -> Self {
        let mut excluded: Vec<CodePoint> = chars.chars().map(|c| c as CodePoint).collect();
        excluded.sort_unstable();
        excluded.dedup();

        let mut ranges = Vec::new();
        let mut next = 0;
        for cp in excluded {
            if cp > next {
                ranges.push(Pattern::CodeRange(next, cp - 1));
            }
            next = cp + 1;
        }
        if next <= MAX_CODE_POINT {
            ranges.push(Pattern::CodeRange(next, MAX_CODE_POINT));
        }
        Self::choice(ranges)
    }

    /// Any one code point except `c`.
    pub fn not(c: char) -> Self {
        let mut buf = [0u8; 4];
        Self::none_of(c.encode_utf8(&mut buf))
    }

    /// One or more repetitions.
    pub fn many1(body: Pattern) -> Self {
        Self::concat(body.clone(), Self::repeat(body))
    }

    /// Zero or one occurrence.
    pub fn opt(body: Pattern) -> Self {
        Self::alt(body, Pattern::Epsilon)
    }

    /// Concatenation of all patterns as a balanced tree, so the depth grows
    /// with the logarithm of the count. Up to three patterns nest to the
    /// left. Empty input is `Epsilon`.
    pub fn seq(patterns: impl IntoIterator<Item = Pattern>) -> Self {
        balanced(patterns.into_iter().collect(), Self::concat).unwrap_or(Pattern::Epsilon)
    }

    /// Alternation of all patterns, balanced like [`Pattern::seq`]. Empty
    /// input is `Never`.
    pub fn choice(patterns: impl IntoIterator<Item = Pattern>) -> Self {
        balanced(patterns.into_iter().collect(), Self::alt).unwrap_or(Pattern::Never)
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Pattern::Never | Pattern::Epsilon | Pattern::CodeRange(..) => 1,
            Pattern::Repeat(body) => 1 + body.size(),
            Pattern::Concat(a, b) | Pattern::Alt(a, b) => 1 + a.size() + b.size(),
        }
    }

    /// Binding strength used by `Display` to decide where parentheses go.
    fn precedence(&self) -> u8 {
        match self {
            Pattern::Alt(..) => 0,
            Pattern::Concat(..) => 1,
            Pattern::Repeat(..) => 2,
            Pattern::Never | Pattern::Epsilon | Pattern::CodeRange(..) => 3,
        }
    }

    fn fmt_with(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        if self.precedence() < min {
            f.write_str("(")?;
            self.fmt_with(f, 0)?;
            return f.write_str(")");
        }

        match self {
            Pattern::Never => f.write_str("never"),
            Pattern::Epsilon => f.write_str("eps"),
            Pattern::CodeRange(lo, hi) if lo > hi => f.write_str("never"),
            Pattern::CodeRange(0, MAX_CODE_POINT) => f.write_str("."),
            Pattern::CodeRange(lo, hi) if lo == hi => {
                write!(f, "'{}'", escape_code_point(*lo))
            }
            Pattern::CodeRange(lo, hi) => {
                write!(f, "[{}-{}]", escape_code_point(*lo), escape_code_point(*hi))
            }
            Pattern::Concat(a, b) => {
                a.fmt_with(f, 1)?;
                f.write_str(" ")?;
                b.fmt_with(f, 2)
            }
            Pattern::Repeat(body) => {
                body.fmt_with(f, 3)?;
                f.write_str("*")
            }
            Pattern::Alt(a, b) => {
                a.fmt_with(f, 0)?;
                f.write_str(" | ")?;
                b.fmt_with(f, 1)
            }
        }
    }
}

/// Join `items` pairwise into a tree of depth `ceil(log2(len))`. The left
/// half takes the odd item.
fn balanced(mut items: Vec<Pattern>, join: fn(Pattern, Pattern) -> Pattern) -> Option<Pattern> {
    if items.len() <= 1 {
        return items.pop();
    }
    let right = items.split_off(items.len() - items.len() / 2);
    let left = balanced(items, join)?;
    let right = balanced(right, join)?;
    Some(join(left, right))
}

/// Renders the pattern in definition-language syntax.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with(f, 0)
    }
}

impl BitOr for Pattern {
    type Output = Pattern;

    fn bitor(self, rhs: Pattern) -> Pattern {
        Pattern::alt(self, rhs)
    }
}

impl Shr for Pattern {
    type Output = Pattern;

    fn shr(self, rhs: Pattern) -> Pattern {
        Pattern::concat(self, rhs)
    }
}

impl From<char> for Pattern {
    fn from(c: char) -> Self {
        Pattern::char(c)
    }
}

impl From<&str> for Pattern {
    fn from(text: &str) -> Self {
        Pattern::literal(text)
    }
}
