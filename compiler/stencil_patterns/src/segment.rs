//! Splitting trimmed template text at attribute placeholders.

/// A piece of the template text, in textual order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Literal { text: &'a str, offset: usize },
    /// Leftmost `${name}`; `offset` is its position in the split text.
    Capture { name: &'a str, offset: usize },
    /// Any later `${name}`.
    Backref { name: &'a str },
}

/// Split `text` at every `${name}` for each name, in the order given.
///
/// Placeholders are matched exactly, braces included, so `NAME` never
/// matches inside `${NAMESPACE}`. Empty names are ignored.
pub(crate) fn split_placeholders<'a>(text: &'a str, names: &[&'a str]) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    push_literal(&mut segments, text, 0);

    for &name in names {
        if name.is_empty() {
            continue;
        }
        let placeholder = format!("${{{name}}}");
        let mut captured = false;
        let mut next = Vec::with_capacity(segments.len());
        for segment in segments {
            let Segment::Literal { text, offset } = segment else {
                next.push(segment);
                continue;
            };
            let mut rest = 0;
            for (index, _) in text.match_indices(placeholder.as_str()) {
                push_literal(&mut next, &text[rest..index], offset + rest);
                if captured {
                    next.push(Segment::Backref { name });
                } else {
                    next.push(Segment::Capture {
                        name,
                        offset: offset + index,
                    });
                    captured = true;
                }
                rest = index + placeholder.len();
            }
            push_literal(&mut next, &text[rest..], offset + rest);
        }
        segments = next;
    }
    segments
}

fn push_literal<'a>(segments: &mut Vec<Segment<'a>>, text: &'a str, offset: usize) {
    if !text.is_empty() {
        segments.push(Segment::Literal { text, offset });
    }
}

#[cfg(test)]
mod tests;
