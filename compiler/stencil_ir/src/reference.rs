//! Reference normalization.
//!
//! Maps a raw reference token to the attribute name it asks for. Attribute
//! discovery runs on raw tokens, so the same rules apply whether the token
//! came from template text or from a directive argument.

/// Canonical attribute name of a raw reference token.
///
/// Rules, in order:
/// 1. Every leading `\\` pair is a literal backslash and is stripped.
/// 2. A single remaining `\` marks an escaped reference: `None` unless
///    `include_escaped`, in which case it is stripped too.
/// 3. The rest must start with `$` (optionally `$!`).
/// 4. `${...}`: the text between the braces; a `.` or a second `{` before
///    the closing brace makes the token malformed (`None`).
/// 5. `$name`: the longest prefix up to the first `{`, `}` or `.`.
///
/// Empty names yield `None`.
///
/// ```
/// use stencil_ir::normalize_reference;
///
/// assert_eq!(normalize_reference("${YEAR}", false).as_deref(), Some("YEAR"));
/// assert_eq!(normalize_reference("$user.name", false).as_deref(), Some("user"));
/// assert_eq!(normalize_reference("\\$X", false), None);
/// assert_eq!(normalize_reference("\\$X", true).as_deref(), Some("X"));
/// assert_eq!(normalize_reference("${a.b}", true), None);
/// ```
pub fn normalize_reference(raw: &str, include_escaped: bool) -> Option<String> {
    let mut text = raw;
    while let Some(rest) = text.strip_prefix("\\\\") {
        text = rest;
    }
    if let Some(rest) = text.strip_prefix('\\') {
        if !include_escaped {
            return None;
        }
        text = rest;
    }

    let text = text.strip_prefix('$')?;
    let text = text.strip_prefix('!').unwrap_or(text);

    let name = if let Some(inner) = text.strip_prefix('{') {
        let close = inner.find(['}', '.', '{'])?;
        if inner.as_bytes()[close] != b'}' {
            return None;
        }
        &inner[..close]
    } else {
        let end = text.find(['{', '}', '.']).unwrap_or(text.len());
        &text[..end]
    };

    (!name.is_empty()).then(|| name.to_owned())
}

/// First byte of an identifier: ASCII letter or `_`.
#[inline]
pub fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// Identifier continuation: ASCII alphanumeric or `_`.
#[inline]
pub fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[cfg(test)]
mod tests;
