//! Decoding of string and class literals.

use lexforge_core::{CodePoint, MAX_CODE_POINT, Pattern};

use crate::diagnostics::{DiagnosticKind, Diagnostics, Span};

/// One decoded character with its position in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub ch: char,
    /// Written as an escape; never treated as class syntax.
    pub escaped: bool,
    pub span: Span,
}

/// Decode the escapes in `body`, which starts at byte `offset` of the source.
///
/// Invalid escapes are reported and dropped.
pub fn unescape(body: &str, offset: usize, diagnostics: &mut Diagnostics) -> Vec<Unit> {
    let mut units = Vec::new();
    let mut chars = body.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let start = offset + i;
        if c != '\\' {
            units.push(Unit {
                ch: c,
                escaped: false,
                span: Span::new(start, start + c.len_utf8()),
            });
            continue;
        }

        let Some((j, e)) = chars.next() else {
            diagnostics
                .report(DiagnosticKind::InvalidEscape, Span::new(start, start + 1))
                .message("trailing `\\`")
                .emit();
            break;
        };
        let mut end = offset + j + e.len_utf8();

        let decoded = match e {
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            '\\' | '\'' | '"' | '[' | ']' | '-' | '^' => Some(e),
            'u' => {
                let mut hex = String::new();
                let mut closed = false;
                if let Some((k, _)) = chars.next_if(|&(_, c)| c == '{') {
                    end = offset + k + 1;
                    while let Some((k, h)) = chars.next_if(|&(_, c)| c == '}' || c.is_ascii_hexdigit()) {
                        end = offset + k + 1;
                        if h == '}' {
                            closed = true;
                            break;
                        }
                        hex.push(h);
                    }
                }
                if closed && !hex.is_empty() && hex.len() <= 6 {
                    u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
                } else {
                    None
                }
            }
            _ => None,
        };

        match decoded {
            Some(ch) => units.push(Unit {
                ch,
                escaped: true,
                span: Span::new(start, end),
            }),
            None => {
                let text = &body[start - offset..end - offset];
                diagnostics
                    .report(DiagnosticKind::InvalidEscape, Span::new(start, end))
                    .message(format!("`{text}`"))
                    .emit();
            }
        }
    }

    units
}

/// Pattern for a quoted literal. `token` includes the quotes.
pub fn string_pattern(token: &str, offset: usize, diagnostics: &mut Diagnostics) -> Pattern {
    let body = &token[1..token.len() - 1];
    let units = unescape(body, offset + 1, diagnostics);
    Pattern::seq(units.into_iter().map(|u| Pattern::char(u.ch)))
}

/// Decoded text of a quoted literal (for actions). `token` includes the quotes.
pub fn string_value(token: &str, offset: usize, diagnostics: &mut Diagnostics) -> String {
    let body = &token[1..token.len() - 1];
    unescape(body, offset + 1, diagnostics)
        .into_iter()
        .map(|u| u.ch)
        .collect()
}

/// Pattern for a character class. `token` includes the brackets.
///
/// `a-z` is a range; `-` first or last is literal, as is any escaped char.
pub fn class_pattern(token: &str, offset: usize, diagnostics: &mut Diagnostics) -> Pattern {
    let body = &token[1..token.len() - 1];
    let (negated, body, body_offset) = match body.strip_prefix('^') {
        Some(rest) => (true, rest, offset + 2),
        None => (false, body, offset + 1),
    };
    let units = unescape(body, body_offset, diagnostics);

    let mut ranges: Vec<(CodePoint, CodePoint)> = Vec::new();
    let mut i = 0;
    while i < units.len() {
        let lo = units[i];
        let is_range = i + 2 < units.len() && {
            let dash = units[i + 1];
            dash.ch == '-' && !dash.escaped
        };
        if !is_range {
            ranges.push((lo.ch as CodePoint, lo.ch as CodePoint));
            i += 1;
            continue;
        }

        let hi = units[i + 2];
        if lo.ch > hi.ch {
            diagnostics
                .report(DiagnosticKind::InvalidClassRange, lo.span.cover(hi.span))
                .message(format!("`{}` sorts after `{}`", lo.ch.escape_debug(), hi.ch.escape_debug()))
                .emit();
        } else {
            ranges.push((lo.ch as CodePoint, hi.ch as CodePoint));
        }
        i += 3;
    }

    let ranges = if negated {
        complement(ranges)
    } else {
        normalize(ranges)
    };
    Pattern::choice(ranges.into_iter().map(|(lo, hi)| Pattern::range(lo, hi)))
}

/// Sort and merge overlapping or adjacent ranges.
fn normalize(mut ranges: Vec<(CodePoint, CodePoint)>) -> Vec<(CodePoint, CodePoint)> {
    ranges.sort_unstable();
    let mut merged: Vec<(CodePoint, CodePoint)> = Vec::with_capacity(ranges.len());
    for (lo, hi) in ranges {
        if let Some(last) = merged.last_mut()
            && lo <= last.1.saturating_add(1)
        {
            last.1 = last.1.max(hi);
            continue;
        }
        merged.push((lo, hi));
    }
    merged
}

/// Ranges of the alphabet not covered by `ranges`.
fn complement(ranges: Vec<(CodePoint, CodePoint)>) -> Vec<(CodePoint, CodePoint)> {
    let mut gaps = Vec::new();
    let mut next = 0;
    for (lo, hi) in normalize(ranges) {
        if lo > next {
            gaps.push((next, lo - 1));
        }
        next = hi + 1;
    }
    if next <= MAX_CODE_POINT {
        gaps.push((next, MAX_CODE_POINT));
    }
    gaps
}
