//! Stencil Patterns - recognise rendered instances of a template.
//!
//! A template's literal text is fixed; only its `${NAME}` placeholders vary
//! between renders. [`derive_pattern`] turns the text into a regular
//! expression where each attribute's first placeholder is a capturing group
//! and every later placeholder of the same attribute is a backreference to
//! it, so a document that disagrees with itself is not accepted.
//!
//! ```text
//! Copyright (c) ${YEAR} by ${AUTHOR}.
//! (?s).*(Copyright \(c\) ([^\n]*) by ([^\n]*)\.).*
//! ```
//!
//! Group 1 is the whole template; attribute groups follow in textual order.

mod derive;
mod error;
mod escape;
mod pattern;
mod segment;

pub use derive::derive_pattern;
pub use error::PatternError;
pub use escape::escape_literal;
pub use pattern::{HeaderMatch, TemplatePattern};
