//! Stencil: file templates with attribute discovery and header recognition.
//!
//! # Pipeline
//!
//! ```text
//! text ──parse──> Document ──collect──> attribute names
//!                    │
//!                    ├──render──> text        (stencil_eval)
//!                    └──derive──> pattern     (stencil_patterns)
//! ```
//!
//! - [`collect_attributes`]: which attributes a template needs, following
//!   `#parse` includes through a [`TemplateResolver`]
//! - [`TemplateEngine`]: one resolver plus [`EngineConfig`]; the two-phase
//!   `merge` primes escaped references before rendering
//! - [`TemplateRegistry`]: document and include templates
//! - [`tracing_setup::init_tracing`]: opt-in logging for the CLI
//!
//! The `commands` module backs the `stencil` binary.

pub mod attributes;
pub mod commands;
mod config;
mod engine;
mod registry;
pub mod tracing_setup;

pub use attributes::{collect_attributes, collect_template_attributes, AttributeSet};
pub use config::{DefaultProperties, EngineConfig, PACKAGE_NAME};
pub use engine::{EngineError, MergedTemplate, TemplateEngine};
pub use registry::TemplateRegistry;

pub use stencil_eval::{PropertyMap, RenderError, Value};
pub use stencil_ir::{normalize_reference, NoIncludes, Template, TemplateResolver};
pub use stencil_parse::{parse, ParseError};
pub use stencil_patterns::{derive_pattern, HeaderMatch, PatternError, TemplatePattern};
