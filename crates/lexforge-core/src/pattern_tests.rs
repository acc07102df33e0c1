use crate::pattern::{MAX_CODE_POINT, Pattern};

fn depth(p: &Pattern) -> usize {
    match p {
        Pattern::Concat(a, b) | Pattern::Alt(a, b) => 1 + depth(a).max(depth(b)),
        Pattern::Repeat(body) => 1 + depth(body),
        Pattern::Never | Pattern::Epsilon | Pattern::CodeRange(..) => 0,
    }
}

#[test]
fn literal_of_three_nests_left() {
    let p = Pattern::literal("abc");
    let expected = Pattern::concat(
        Pattern::concat(Pattern::char('a'), Pattern::char('b')),
        Pattern::char('c'),
    );
    assert_eq!(p, expected);
}

#[test]
fn literal_of_four_pairs_halves() {
    let p = Pattern::literal("abcd");
    let expected = Pattern::concat(
        Pattern::concat(Pattern::char('a'), Pattern::char('b')),
        Pattern::concat(Pattern::char('c'), Pattern::char('d')),
    );
    assert_eq!(p, expected);
    assert_eq!(p.to_string(), "'a' 'b' ('c' 'd')");
}

#[test]
fn long_literal_stays_shallow() {
    let text = "a".repeat(100_000);
    let p = Pattern::literal(&text);
    assert_eq!(depth(&p), 17);
    assert_eq!(p.size(), 2 * 100_000 - 1);
    assert!(p.to_string().len() > 300_000);
    drop(p);
}

#[test]
fn long_choice_stays_shallow() {
    let p = Pattern::choice((0..50_000).map(|i| Pattern::range(i, i)));
    assert_eq!(depth(&p), 16);
    let q = Pattern::seq(std::iter::repeat_n(Pattern::any(), 5));
    assert_eq!(depth(&q), 3);
}

#[test]
fn empty_literal_is_epsilon() {
    assert_eq!(Pattern::literal(""), Pattern::Epsilon);
}

#[test]
fn empty_choice_is_never() {
    assert_eq!(Pattern::any_of(""), Pattern::Never);
    assert_eq!(Pattern::choice(Vec::new()), Pattern::Never);
}

#[test]
fn operators_build_alt_and_concat() {
    let p = Pattern::char('a') | Pattern::char('b') >> Pattern::char('c');
    // `>>` binds tighter than `|` in Rust.
    let expected = Pattern::alt(
        Pattern::char('a'),
        Pattern::concat(Pattern::char('b'), Pattern::char('c')),
    );
    assert_eq!(p, expected);
}

#[test]
fn none_of_produces_complement_ranges() {
    let p = Pattern::none_of("db");
    let expected = Pattern::choice([
        Pattern::range(0, 'b' as u32 - 1),
        Pattern::range('c' as u32, 'c' as u32),
        Pattern::range('e' as u32, MAX_CODE_POINT),
    ]);
    assert_eq!(p, expected);
}

#[test]
fn none_of_nothing_is_any() {
    assert_eq!(Pattern::none_of(""), Pattern::any());
}

#[test]
fn not_nul_starts_at_one() {
    assert_eq!(Pattern::not('\0'), Pattern::range(1, MAX_CODE_POINT));
}

#[test]
fn many1_and_opt_expand_to_primitives() {
    let digit = Pattern::char_range('0', '9');
    assert_eq!(
        Pattern::many1(digit.clone()),
        Pattern::concat(digit.clone(), Pattern::repeat(digit.clone()))
    );
    assert_eq!(
        Pattern::opt(digit.clone()),
        Pattern::alt(digit, Pattern::Epsilon)
    );
}

#[test]
fn size_counts_nodes() {
    assert_eq!(Pattern::Never.size(), 1);
    assert_eq!(Pattern::literal("ab").size(), 3);
    assert_eq!(Pattern::repeat(Pattern::literal("ab")).size(), 4);
}

#[test]
fn display_concat_and_repeat() {
    let p = Pattern::repeat(Pattern::literal("ab"));
    insta::assert_snapshot!(p.to_string(), @"('a' 'b')*");
}

#[test]
fn display_parenthesizes_alt_inside_concat() {
    let p = (Pattern::char('a') | Pattern::char('b')) >> Pattern::char('c');
    insta::assert_snapshot!(p.to_string(), @"('a' | 'b') 'c'");
}

#[test]
fn display_ranges_and_specials() {
    assert_eq!(Pattern::many1(Pattern::char_range('0', '9')).to_string(), "[0-9] [0-9]*");
    assert_eq!(Pattern::opt(Pattern::char('x')).to_string(), "'x' | eps");
    assert_eq!(Pattern::any().to_string(), ".");
    assert_eq!(Pattern::never().to_string(), "never");
    assert_eq!(Pattern::range(5, 1).to_string(), "never");
}

#[test]
fn display_escapes_code_points() {
    assert_eq!(Pattern::char('\n').to_string(), r"'\n'");
    assert_eq!(Pattern::char('-').to_string(), r"'\-'");
    assert_eq!(Pattern::char('é').to_string(), r"'\u{E9}'");
}

#[test]
fn right_nested_concat_keeps_parens() {
    let p = Pattern::concat(Pattern::char('a'), Pattern::literal("bc"));
    assert_eq!(p.to_string(), "'a' ('b' 'c')");
}
