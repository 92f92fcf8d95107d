//! Byte-level helpers shared by the tag scanner and the tag tokenizer.
//!
//! Every delimiter the scanner cares about (`<`, `>`, `"`, `'`, `=`, `/`) is
//! ASCII, so searching bytes and slicing at the resulting offsets always
//! lands on UTF-8 character boundaries.

/// Opener of a comment tag.
pub const COMMENT_OPEN: &str = "<!--";

/// Terminator of a comment tag.
pub const COMMENT_CLOSE: &str = "-->";

/// Characters allowed in tag and attribute names: ASCII word characters
/// (`[A-Za-z0-9_]`) and `-`.
#[must_use]
pub const fn is_name_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-'
}

/// Offset of the first byte at or after `from` that is not a name character.
#[must_use]
pub fn end_of_name(input: &str, from: usize) -> usize {
    input.as_bytes()[from..]
        .iter()
        .position(|&byte| !is_name_char(byte))
        .map_or(input.len(), |len| from + len)
}

/// Offset of the first `>` at or after `from` that is not inside a
/// double-quoted run.
///
/// Every `"` toggles the quoted state. Single quotes are not tracked.
#[must_use]
pub fn find_unquoted_tag_end(input: &str, from: usize) -> Option<usize> {
    let mut in_quotes = false;
    for (index, &byte) in input.as_bytes().iter().enumerate().skip(from) {
        match byte {
            b'"' => in_quotes = !in_quotes,
            b'>' if !in_quotes => return Some(index),
            _ => {}
        }
    }
    None
}

/// Offset of `needle` at or after `from`.
#[must_use]
pub fn find_from(input: &str, from: usize, needle: &str) -> Option<usize> {
    input.get(from..)?.find(needle).map(|offset| from + offset)
}
