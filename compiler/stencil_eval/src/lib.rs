//! Stencil Eval - renders template trees against a property map.
//!
//! # Architecture
//!
//! - `Value`: the dynamic values templates see (strings, integers, booleans,
//!   lists, maps)
//! - `Environment`: property map plus a scope stack for `#set` and
//!   `#foreach` bindings
//! - `evaluate_binary` / `evaluate_unary`: enum-based operator dispatch
//! - `Renderer`: walks a `Document`, resolving `#parse` through a
//!   `TemplateResolver` with an include stack guarding against cycles
//!
//! Reference output follows the template language's escaping rule: with `n`
//! backslashes before a reference that resolves, `n / 2` backslashes are
//! emitted followed by the value (even `n`) or the reference text (odd `n`).
//! A reference that does not resolve is emitted exactly as written.

mod environment;
pub mod errors;
mod operators;
mod renderer;
mod value;

pub use environment::Environment;
pub use errors::RenderError;
pub use operators::{evaluate_binary, evaluate_unary};
pub use renderer::{render, Renderer};
pub use value::{PropertyMap, Value, ValueMap};
