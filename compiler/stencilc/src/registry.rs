//! Template registry: the caller-owned set of named templates.

use stencil_ir::{Template, TemplateResolver};

/// Document templates and include templates.
///
/// `#parse("x")` resolves against document templates first, then include
/// templates. Within a kind, the first registered template that answers to
/// the name wins.
#[derive(Clone, Debug, Default)]
pub struct TemplateRegistry {
    documents: Vec<Template>,
    includes: Vec<Template>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        TemplateRegistry::default()
    }

    pub fn add_document(&mut self, template: Template) -> &mut Self {
        tracing::trace!(name = %template.qualified_name(), "registered document template");
        self.documents.push(template);
        self
    }

    pub fn add_include(&mut self, template: Template) -> &mut Self {
        tracing::trace!(name = %template.qualified_name(), "registered include template");
        self.includes.push(template);
        self
    }

    #[must_use]
    pub fn with_document(mut self, template: Template) -> Self {
        self.add_document(template);
        self
    }

    #[must_use]
    pub fn with_include(mut self, template: Template) -> Self {
        self.add_include(template);
        self
    }

    pub fn documents(&self) -> &[Template] {
        &self.documents
    }

    pub fn includes(&self) -> &[Template] {
        &self.includes
    }

    pub fn document(&self, name: &str) -> Option<&Template> {
        self.documents.iter().find(|template| template.answers_to(name))
    }

    pub fn include(&self, name: &str) -> Option<&Template> {
        self.includes.iter().find(|template| template.answers_to(name))
    }

    pub fn len(&self) -> usize {
        self.documents.len() + self.includes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateResolver for TemplateRegistry {
    fn resolve(&self, path: &str) -> Option<&Template> {
        self.document(path).or_else(|| self.include(path))
    }
}

#[cfg(test)]
mod tests;
