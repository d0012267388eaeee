//! Shared types for the Stencil template engine.
//!
//! - [`Span`]: byte ranges into template text
//! - [`Node`] / [`Expr`]: the syntax tree produced by `stencil_parse`
//! - [`Reference`]: a variable reference with its exact raw token
//! - [`normalize_reference`]: raw token to canonical attribute name
//! - [`Template`] / [`TemplateResolver`]: named templates and include lookup
//! - [`Visitor`]: read-only tree traversal

mod ast;
mod reference;
mod span;
mod template;
pub mod visitor;

pub use ast::{BinaryOp, Document, Expr, ExprKind, IfBranch, Node, Reference, UnaryOp};
pub use reference::{is_ident_continue, is_ident_start, normalize_reference};
pub use span::Span;
pub use template::{NoIncludes, Template, TemplateResolver};
pub use visitor::Visitor;
