//! Neutralizing block-level Markdown syntax.
//!
//! Inline rendering should only produce span-level markup. CommonMark has no
//! inline-only entry point, so line-leading block markers are escaped with a
//! backslash before parsing; the parser then sees nothing but paragraphs.

use std::borrow::Cow;

/// Escapes every line-leading block marker in `text`.
///
/// Leading spaces and tabs are dropped from each line, so nothing parses as
/// indented code.
///
/// # Example
///
/// ```rust
/// use quire_markup::inline::neutralize_blocks;
///
/// assert_eq!(neutralize_blocks("# hi\n- item"), "\\# hi\n\\- item");
/// assert_eq!(neutralize_blocks("**bold**"), "**bold**");
/// ```
pub fn neutralize_blocks(text: &str) -> Cow<'_, str> {
    if !text.split('\n').any(needs_rewrite) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for line in text.split_inclusive('\n') {
        let rest = line.trim_start_matches([' ', '\t']);
        if let Some(at) = marker_offset(rest) {
            out.push_str(&rest[..at]);
            out.push('\\');
            out.push_str(&rest[at..]);
        } else {
            out.push_str(rest);
        }
    }
    Cow::Owned(out)
}

fn needs_rewrite(line: &str) -> bool {
    line.starts_with([' ', '\t']) || marker_offset(line).is_some()
}

/// Byte offset of the character that must be escaped, if any.
fn marker_offset(line: &str) -> Option<usize> {
    let body = line.trim_end_matches(['\n', '\r']);
    let first = body.chars().next()?;

    match first {
        // ATX heading, block quote, fenced code
        '#' | '>' => Some(0),
        '`' | '~' if body.starts_with("```") || body.starts_with("~~~") => Some(0),
        // Bullet list item or thematic break / setext underline
        '-' | '+' | '*' | '_' | '=' => {
            let after = body[1..].chars().next();
            let is_item = matches!(first, '-' | '+' | '*')
                && after.is_none_or(|c| c == ' ' || c == '\t');
            if is_item || is_rule(body, first) {
                Some(0)
            } else {
                None
            }
        }
        // Ordered list item: up to nine digits then `.` or `)`
        '0'..='9' => {
            let digits = body.bytes().take_while(u8::is_ascii_digit).count();
            let item = body[digits..]
                .strip_prefix(['.', ')'])
                .is_some_and(|after| after.chars().next().is_none_or(|c| c == ' ' || c == '\t'));
            (digits <= 9 && item).then_some(digits)
        }
        // Link reference definition
        '[' if body.contains("]:") => Some(0),
        _ => None,
    }
}

/// A line made only of `marker` and spaces: a thematic break needs three,
/// a setext underline (`=` or `-`) needs one.
fn is_rule(body: &str, marker: char) -> bool {
    let count = body.chars().filter(|&c| c == marker).count();
    let only = body.chars().all(|c| c == marker || c == ' ' || c == '\t');
    let needed = if matches!(marker, '=' | '-') { 1 } else { 3 };
    only && count >= needed
}
