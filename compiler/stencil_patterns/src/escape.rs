//! Regex escaping for literal template text.

/// Characters with a meaning outside a character class. `\` and `^` are
/// included so any literal text yields a valid pattern.
const METACHARACTERS: &[char] = &[
    '\\', '^', '|', '.', '*', '+', '?', '$', '(', ')', '[', ']', '{', '}',
];

/// Append `text` to `out` so that it matches itself.
///
/// Each character is escaped at most once, in a single pass.
pub fn escape_literal(text: &str, out: &mut String) {
    out.reserve(text.len());
    for c in text.chars() {
        if METACHARACTERS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
}
