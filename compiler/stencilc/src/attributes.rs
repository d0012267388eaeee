//! Attribute discovery.
//!
//! Walks a template tree (and, transitively, every template it `#parse`s)
//! and lists the attribute names the template reads but neither receives as
//! a known name nor binds itself with `#set` or `#foreach`.

use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use stencil_ir::visitor::{walk_node, Visitor};
use stencil_ir::{normalize_reference, Node, Reference, Span, Template, TemplateResolver};
use stencil_parse::ParseError;
use stencil_stack::ensure_sufficient_stack;

/// Attribute names in first-seen order.
pub type AttributeSet = IndexSet<String>;

/// List the attributes `text` needs that are not in `known_names`.
///
/// With `include_dummies`, escaped references (`\$X`) count as well; that
/// pass is used to prime empty defaults before rendering, so that a
/// resolvable escaped reference loses one backslash instead of staying
/// literal.
///
/// `#parse` targets that the resolver does not know contribute nothing.
/// Malformed references are skipped.
pub fn collect_attributes(
    text: &str,
    known_names: &FxHashSet<String>,
    include_dummies: bool,
    resolver: &dyn TemplateResolver,
) -> Result<AttributeSet, ParseError> {
    CollectionSession::new(known_names, include_dummies, resolver).run(text)
}

/// [`collect_attributes`] for a registered template.
///
/// The template itself counts as visited, so an include cycle back to it is
/// not walked a second time.
pub fn collect_template_attributes(
    template: &Template,
    known_names: &FxHashSet<String>,
    include_dummies: bool,
    resolver: &dyn TemplateResolver,
) -> Result<AttributeSet, ParseError> {
    let mut session = CollectionSession::new(known_names, include_dummies, resolver);
    session.visited.insert(template.qualified_name());
    session.run(&template.text)
}

/// State shared across one top-level collection and all of its includes.
struct CollectionSession<'s> {
    known_names: &'s FxHashSet<String>,
    include_dummies: bool,
    resolver: &'s dyn TemplateResolver,
    referenced: AttributeSet,
    defined: FxHashSet<String>,
    visited: FxHashSet<String>,
    /// First syntax error met in an included template; stops the walk.
    error: Option<ParseError>,
}

impl<'s> CollectionSession<'s> {
    fn new(
        known_names: &'s FxHashSet<String>,
        include_dummies: bool,
        resolver: &'s dyn TemplateResolver,
    ) -> Self {
        CollectionSession {
            known_names,
            include_dummies,
            resolver,
            referenced: AttributeSet::new(),
            defined: FxHashSet::default(),
            visited: FxHashSet::default(),
            error: None,
        }
    }

    fn run(mut self, text: &str) -> Result<AttributeSet, ParseError> {
        let document = stencil_parse::parse(text)?;
        self.visit_document(&document);
        if let Some(error) = self.error {
            return Err(error);
        }

        let defined = self.defined;
        let mut referenced = self.referenced;
        referenced.retain(|name| !defined.contains(name));
        tracing::debug!(
            attributes = referenced.len(),
            includes = self.visited.len(),
            dummies = self.include_dummies,
            "collected attributes"
        );
        Ok(referenced)
    }

    fn define(&mut self, target: &Reference) {
        if let Some(name) = normalize_reference(&target.raw, false) {
            self.defined.insert(name);
        }
    }

    fn include(&mut self, path: &str, span: Span) {
        let Some(template) = self.resolver.resolve(path) else {
            tracing::debug!(path, "skipping unresolved include");
            return;
        };
        if !self.visited.insert(template.qualified_name()) {
            tracing::trace!(path, "include already visited");
            return;
        }

        let document = match stencil_parse::parse(&template.text) {
            Ok(document) => document,
            Err(error) => {
                self.error = Some(in_include(path, &error, span));
                return;
            }
        };
        tracing::trace!(path, "walking include");
        ensure_sufficient_stack(|| self.visit_document(&document));
        if let Some(error) = self.error.take() {
            self.error = Some(in_include(path, &error, span));
        }
    }
}

impl<'ast> Visitor<'ast> for CollectionSession<'_> {
    fn visit_node(&mut self, node: &'ast Node) {
        if self.error.is_some() {
            return;
        }
        match node {
            Node::Include { path, span } => self.include(path, *span),
            _ => walk_node(self, node),
        }
    }

    fn visit_reference(&mut self, reference: &'ast Reference) {
        match normalize_reference(&reference.raw, self.include_dummies) {
            Some(name) if !self.known_names.contains(&name) => {
                self.referenced.insert(name);
            }
            Some(_) => {}
            None => tracing::trace!(raw = %reference.raw, "reference skipped"),
        }
    }

    fn visit_set_target(&mut self, lhs: &'ast Reference) {
        self.define(lhs);
    }

    fn visit_loop_var(&mut self, var: &'ast Reference) {
        self.define(var);
    }
}

/// Re-home an error from an included template onto the `#parse` that
/// pulled it in.
fn in_include(path: &str, error: &ParseError, span: Span) -> ParseError {
    ParseError::new(error.code, format!("in `{path}`: {}", error.message), span)
}
