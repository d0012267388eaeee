//! Diagnostics for template errors.
//!
//! Every failure the engine reports carries an [`ErrorCode`] (searchable,
//! explainable with `stencil explain`), a message, and where possible the
//! [`Span`](stencil_ir::Span) of the offending text. [`Diagnostic::render`]
//! prints it against the template source.

mod diagnostic;
mod error_code;
pub mod span_utils;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
