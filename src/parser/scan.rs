//! Position-based scanning primitives over an in-memory byte slice.
//!
//! All functions take the text and explicit positions and return positions;
//! none of them hold a cursor. Positions are byte offsets into the text, and
//! `end` bounds (exclusively) the span a caller is working in.

/// Returns `true` for ASCII space, tab, newline and carriage return.
#[inline]
pub fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Returns the first position at or after `pos` (and before `end`) that is not whitespace,
/// or `end` if there is none.
pub fn skip_whitespace(text: &[u8], pos: usize, end: usize) -> usize {
    let end = end.min(text.len());
    (pos..end).find(|&i| !is_whitespace(text[i])).unwrap_or(end)
}

/// Returns the position of the first `target` byte in `pos..end`, if any.
///
/// # Examples
/// ```
/// use bracetree::parser::scan::find_byte;
///
/// let text = b"\"Pukeko\" $ { \"Weka\" }";
/// assert_eq!(find_byte(text, 0, text.len(), b'$'), Some(9));
/// assert_eq!(find_byte(text, 10, text.len(), b'$'), None);
/// ```
pub fn find_byte(text: &[u8], pos: usize, end: usize, target: u8) -> Option<usize> {
    let end = end.min(text.len());
    if pos >= end {
        return None;
    }
    text[pos..end].iter().position(|&b| b == target).map(|offset| pos + offset)
}

/// Finds the delimiter closing the one at the start of `text`.
///
/// `text[0]` must be `open`. Scanning tracks the nesting depth, incrementing on
/// each `open` and decrementing on each `close`; the match is the first `close`
/// that brings the depth back to zero. Nested pairs are skipped over, so the
/// result is never simply the first `close`.
///
/// # Returns
/// * `Some(position)` - Position of the matching `close` within `text`
/// * `None` - If `text` does not start with `open`, or the delimiters never balance
///
/// # Examples
/// ```
/// use bracetree::parser::scan::match_balanced;
///
/// assert_eq!(match_balanced(b'{', b'}', b"{ a { b } c } d"), Some(12));
/// assert_eq!(match_balanced(b'{', b'}', b"{ a { b }"), None);
/// assert_eq!(match_balanced(b'{', b'}', b"a { b }"), None);
/// ```
pub fn match_balanced(open: u8, close: u8, text: &[u8]) -> Option<usize> {
    if text.first() != Some(&open) {
        return None;
    }

    let mut depth: usize = 0;
    for (position, &byte) in text.iter().enumerate() {
        if byte == open {
            depth += 1;
        } else if byte == close {
            depth -= 1;
            if depth == 0 {
                return Some(position);
            }
        }
    }

    None // reached end without balancing
}

/// Returns up to `k` bytes from `pos` as a string, for error context.
///
/// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
pub fn context_at(text: &[u8], pos: usize, k: usize) -> String {
    let start = pos.min(text.len());
    let end = (start + k).min(text.len());
    String::from_utf8_lossy(&text[start..end]).into_owned()
}
