//! Parse errors.
//!
//! A malformed template is never partially accepted: attribute lists and
//! rendered text built from a bad tree would be silently wrong.

use stencil_diagnostic::{Diagnostic, ErrorCode};
use stencil_ir::Span;

use crate::DirectiveKind;

/// A template that is not well-formed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic =
            Diagnostic::error(self.code, self.message.clone()).with_span(self.span);
        match self.code {
            ErrorCode::E0001 => diagnostic.with_note("close the reference with `}`"),
            ErrorCode::E1004 => diagnostic.with_note("close the block with `#end`"),
            _ => diagnostic,
        }
    }

    pub(crate) fn too_large(len: usize) -> Self {
        ParseError::new(
            ErrorCode::E0005,
            format!("template is {len} bytes; the limit is 4 GiB"),
            Span::DUMMY,
        )
    }

    pub(crate) fn unterminated_reference(span: Span) -> Self {
        ParseError::new(ErrorCode::E0001, "unterminated `${` reference", span)
    }

    pub(crate) fn unterminated_string(span: Span) -> Self {
        ParseError::new(ErrorCode::E0002, "unterminated string literal", span)
    }

    pub(crate) fn unterminated_comment(span: Span) -> Self {
        ParseError::new(ErrorCode::E0003, "unterminated `#*` comment", span)
    }

    pub(crate) fn unterminated_unparsed(span: Span) -> Self {
        ParseError::new(ErrorCode::E0004, "unterminated `#[[` block", span)
    }

    pub(crate) fn unexpected(found: &str, context: &str, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1001,
            format!("unexpected `{found}` in {context}"),
            span,
        )
    }

    pub(crate) fn expected_expression(span: Span) -> Self {
        ParseError::new(ErrorCode::E1002, "expected an expression", span)
    }

    pub(crate) fn unclosed_args(directive: DirectiveKind, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1003,
            format!("`#{}(` is missing its closing `)`", directive.name()),
            span,
        )
    }

    pub(crate) fn missing_end(directive: DirectiveKind, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1004,
            format!("`#{}` is missing its `#end`", directive.name()),
            span,
        )
    }

    pub(crate) fn stray(directive: DirectiveKind, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1005,
            format!("`#{}` without an open block", directive.name()),
            span,
        )
    }

    pub(crate) fn expected_reference(directive: DirectiveKind, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1006,
            format!("`#{}` expects a `$reference` here", directive.name()),
            span,
        )
    }

    pub(crate) fn invalid_int(text: &str, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1007,
            format!("integer literal `{text}` is out of range"),
            span,
        )
    }
}
