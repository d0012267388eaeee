//! Recursive descent parser for template text.
//!
//! Recognises literal text, `$` references (with their escaping backslashes),
//! comments, unparsed blocks, and the directive subset: `#set`, `#parse`,
//! `#if`/`#elseif`/`#else`, `#foreach`, plus the remaining core directives
//! as opaque [`Node::Other`](stencil_ir::Node::Other) nodes. A `#` that does
//! not start a recognised directive is plain text.

mod directive;
mod error;
mod expr;
mod parser;

pub use directive::DirectiveKind;
pub use error::ParseError;

use stencil_ir::{Document, Node};

/// Parse a whole template.
pub fn parse(text: &str) -> Result<Document, ParseError> {
    let nodes = parse_fragment(text, 0)?;
    tracing::trace!(nodes = nodes.len(), bytes = text.len(), "parsed template");
    Ok(Document { nodes })
}

/// Parse template text that starts at byte `base` of some enclosing text.
///
/// Spans in the result are relative to the enclosing text. Used for the
/// content of double-quoted strings in directive arguments.
pub(crate) fn parse_fragment(text: &str, base: u32) -> Result<Vec<Node>, ParseError> {
    if u32::try_from(text.len()).is_err() {
        return Err(ParseError::too_large(text.len()));
    }
    let buffer = stencil_lexer_core::SourceBuffer::new(text);
    parser::Parser::new(buffer.cursor(), base).parse_top_level()
}
