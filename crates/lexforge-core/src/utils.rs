//! Naming and escaping helpers shared by the compiler, artifact and runtime.

use crate::pattern::CodePoint;

/// Identifier of a rule's action in a generated group.
///
/// `ordinal` is the rule's position in the group's effective rule order.
/// Downstream tooling looks these names up verbatim.
///
/// # Examples
/// ```
/// use lexforge_core::rule_tag;
/// assert_eq!(rule_tag(2, 0), "group2_rule0");
/// ```
pub fn rule_tag(group: u32, ordinal: u32) -> String {
    format!("group{group}_rule{ordinal}")
}

/// Identifier of a group's exit callback.
///
/// # Examples
/// ```
/// use lexforge_core::exit_tag;
/// assert_eq!(exit_tag(1), "group1_on_exit");
/// ```
pub fn exit_tag(group: u32) -> String {
    format!("group{group}_on_exit")
}

/// Render a code point the way the definition language reads it back.
///
/// Printable ASCII is kept verbatim, syntax characters are backslash-escaped,
/// everything else becomes `\u{HEX}`.
pub fn escape_code_point(cp: CodePoint) -> String {
    match cp {
        0x0A => "\\n".to_string(),
        0x0D => "\\r".to_string(),
        0x09 => "\\t".to_string(),
        _ => match char::from_u32(cp) {
            Some(c @ ('\\' | '\'' | '"' | '[' | ']' | '-' | '^')) => format!("\\{c}"),
            Some(c) if (' '..='~').contains(&c) => c.to_string(),
            _ => format!("\\u{{{cp:X}}}"),
        },
    }
}
