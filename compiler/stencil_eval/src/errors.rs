//! Render errors and their constructors.
//!
//! Rendering does not stop the host: a failed render reports what was
//! produced up to the failure in `partial_output`, and the caller decides
//! whether to surface it.

use stencil_diagnostic::{Diagnostic, ErrorCode};
use stencil_ir::Span;
use stencil_parse::ParseError;

use crate::Value;

/// Evaluation-time failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RenderError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Option<Span>,
    /// Output produced before the failure.
    pub partial_output: String,
}

impl RenderError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        RenderError {
            code,
            message: message.into(),
            span: None,
            partial_output: String::new(),
        }
    }

    /// Attach a location unless one is already set.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span.get_or_insert(span);
        self
    }

    #[must_use]
    pub fn with_partial_output(mut self, output: String) -> Self {
        self.partial_output = output;
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code, self.message.clone());
        match self.span {
            Some(span) => diagnostic.with_span(span),
            None => diagnostic,
        }
    }
}

/// A syntax error in the template being rendered keeps its code and location.
impl From<ParseError> for RenderError {
    fn from(error: ParseError) -> Self {
        RenderError::new(error.code, error.message).with_span(error.span)
    }
}

// Directive errors

pub fn unsupported_directive(name: &str) -> RenderError {
    RenderError::new(
        ErrorCode::E6001,
        format!("`#{name}` is not supported by the renderer"),
    )
}

pub fn include_not_found(path: &str) -> RenderError {
    RenderError::new(ErrorCode::E6005, format!("template `{path}` not found"))
}

/// `chain` is the include stack, outermost first, ending with the re-entered template.
pub fn recursive_include(chain: &[String]) -> RenderError {
    let first = chain.last().map_or("", String::as_str);
    RenderError::new(
        ErrorCode::E6003,
        format!("template `{first}` includes itself: {}", chain.join(" -> ")),
    )
}

/// A syntax error in a template reached through `#parse` or `#evaluate`.
pub fn included_syntax_error(path: &str, error: &ParseError) -> RenderError {
    RenderError::new(error.code, format!("in `{path}`: {}", error.message))
}

pub fn not_iterable(value: &Value) -> RenderError {
    RenderError::new(
        ErrorCode::E6004,
        format!("cannot iterate over a {}", value.type_name()),
    )
}

pub fn property_assignment(name: &str, value: &Value) -> RenderError {
    RenderError::new(
        ErrorCode::E6002,
        format!("cannot set a property on `${name}`, which is a {}", value.type_name()),
    )
}

// Operator errors

pub fn binary_type_mismatch(op: &str, left: &Value, right: &Value) -> RenderError {
    RenderError::new(
        ErrorCode::E6002,
        format!(
            "cannot apply `{op}` to {} and {}",
            left.type_name(),
            right.type_name()
        ),
    )
}

pub fn unary_type_mismatch(op: &str, operand: &Value) -> RenderError {
    RenderError::new(
        ErrorCode::E6002,
        format!("cannot apply `{op}` to {}", operand.type_name()),
    )
}

pub fn integer_overflow(op: &str) -> RenderError {
    RenderError::new(ErrorCode::E6002, format!("integer overflow in `{op}`"))
}

pub fn range_bound_not_int(value: &Value) -> RenderError {
    RenderError::new(
        ErrorCode::E6002,
        format!("range bounds must be integers, found {}", value.type_name()),
    )
}

pub fn range_too_large(lo: i64, hi: i64, limit: u64) -> RenderError {
    RenderError::new(
        ErrorCode::E6002,
        format!("range [{lo}..{hi}] has more than {limit} elements"),
    )
}
