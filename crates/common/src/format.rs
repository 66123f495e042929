//! Display formatting helpers shared by all views.

use crate::types::ObjectId;

/// Maximum repr length shown inside grid cells.
pub const MAX_REPR_LENGTH_IN_GRID: usize = 100;

/// Render an object id to its short display form.
pub fn format_object_id(id: ObjectId) -> String {
    format!("{:#x}", id.0)
}

/// Shorten a repr string to at most `max_len` characters, marking the cut
/// with an ellipsis. Reprs at or under the limit pass through unchanged.
pub fn shorten_repr(repr: &str, max_len: usize) -> String {
    if repr.chars().count() <= max_len {
        return repr.to_string();
    }
    let mut short: String = repr.chars().take(max_len.saturating_sub(1)).collect();
    short.push('…');
    short
}

/// Decode a standard single-line string literal (`'...'` or `"..."`) back
/// into its content.
///
/// This is only a fallback for backends that do not supply raw string
/// content as a distinct field: repr round-tripping is fragile, so anything
/// outside the standard literal grammar yields `None` and the caller is
/// expected to degrade gracefully.
pub fn decode_str_literal(literal: &str) -> Option<String> {
    let literal = literal.trim();
    let mut chars = literal.chars();
    let quote = chars.next()?;
    if quote != '\'' && quote != '"' {
        return None;
    }
    if literal.len() < 2 || !literal.ends_with(quote) {
        return None;
    }

    let inner = &literal[1..literal.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == quote {
            // unescaped closing quote inside the body means the trailing
            // quote we stripped was not the terminator
            return None;
        }
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'x' => {
                let hi = chars.next()?;
                let lo = chars.next()?;
                let code = u32::from_str_radix(&format!("{hi}{lo}"), 16).ok()?;
                out.push(char::from_u32(code)?);
            }
            'u' => {
                let digits: String = chars.by_ref().take(4).collect();
                if digits.len() != 4 {
                    return None;
                }
                let code = u32::from_str_radix(&digits, 16).ok()?;
                out.push(char::from_u32(code)?);
            }
            _ => return None,
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_object_id_matches_backend_convention() {
        assert_eq!(format_object_id(ObjectId(255)), "0xff");
    }

    #[test]
    fn shorten_repr_passes_short_reprs_through() {
        assert_eq!(shorten_repr("[1, 2, 3]", 100), "[1, 2, 3]");
    }

    #[test]
    fn shorten_repr_caps_and_marks() {
        let long = "x".repeat(150);
        let short = shorten_repr(&long, 100);
        assert_eq!(short.chars().count(), 100);
        assert!(short.ends_with('…'));
    }

    #[test]
    fn decodes_plain_literals() {
        assert_eq!(decode_str_literal("'hi'").as_deref(), Some("hi"));
        assert_eq!(decode_str_literal("\"hi\"").as_deref(), Some("hi"));
        assert_eq!(decode_str_literal("''").as_deref(), Some(""));
    }

    #[test]
    fn decodes_standard_escapes() {
        assert_eq!(decode_str_literal(r"'a\nb\tc'").as_deref(), Some("a\nb\tc"));
        assert_eq!(decode_str_literal(r"'it\'s'").as_deref(), Some("it's"));
        assert_eq!(decode_str_literal(r"'\x41é'").as_deref(), Some("Aé"));
    }

    #[test]
    fn rejects_malformed_literals() {
        assert_eq!(decode_str_literal("hi"), None);
        assert_eq!(decode_str_literal("'unterminated"), None);
        assert_eq!(decode_str_literal("'bad\\q'"), None);
        assert_eq!(decode_str_literal("'a'b'"), None);
    }
}
