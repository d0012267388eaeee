//! Template text to pattern.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::escape::escape_literal;
use crate::segment::{split_placeholders, Segment};
use crate::{PatternError, TemplatePattern};

/// Matches one rendered attribute value.
const CAPTURE: &str = r"([^\n]*)";

/// License headers say "with" and "by" interchangeably.
const WITH_SYNONYMS: &str = "(?:with|by)";

/// Derive the pattern recognising rendered instances of `text`.
///
/// The text is trimmed, its literal parts escaped, and each `${name}` for
/// the supplied names replaced: the leftmost by a capturing group, later
/// ones by a backreference to it. Names absent from the text contribute
/// nothing. Offsets in the result index `text` as given, before trimming.
///
/// Fails with [`PatternError::Syntax`] if `text` does not parse.
pub fn derive_pattern<S: AsRef<str>>(
    text: &str,
    names: &[S],
) -> Result<TemplatePattern, PatternError> {
    stencil_parse::parse(text)?;

    let trimmed = text.trim();
    let leading = text.len() - text.trim_start().len();
    let names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    let segments = split_placeholders(trimmed, &names);

    let mut body = String::with_capacity(trimmed.len() + trimmed.len() / 2);
    let mut groups: FxHashMap<&str, usize> = FxHashMap::default();
    let mut offset_to_attribute = BTreeMap::new();
    for segment in segments {
        match segment {
            Segment::Literal { text, .. } => escape_literal(text, &mut body),
            Segment::Capture { name, offset } => {
                // Group 1 is the whole template.
                groups.insert(name, groups.len() + 2);
                body.push_str(CAPTURE);
                let offset = u32::try_from(leading + offset).unwrap_or(u32::MAX);
                offset_to_attribute.insert(offset, name.to_owned());
            }
            Segment::Backref { name } => {
                if let Some(group) = groups.get(name) {
                    body.push_str("(?:\\");
                    body.push_str(&group.to_string());
                    body.push(')');
                }
            }
        }
    }
    let body = body.replace("with", WITH_SYNONYMS);

    tracing::debug!(
        groups = groups.len(),
        names = names.len(),
        "derived template pattern"
    );
    TemplatePattern::compile(&body, offset_to_attribute)
}
