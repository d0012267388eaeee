//! The engine session: one resolver and one configuration, reused across
//! collect, merge and pattern calls.

use rustc_hash::FxHashSet;
use stencil_diagnostic::{Diagnostic, ErrorCode};
use stencil_eval::{PropertyMap, RenderError, Renderer, Value};
use stencil_ir::{Template, TemplateResolver};
use stencil_parse::ParseError;
use stencil_patterns::{PatternError, TemplatePattern};

use crate::attributes::{collect_attributes, collect_template_attributes, AttributeSet};
use crate::EngineConfig;

/// Any failure of an engine operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Syntax(#[from] ParseError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

impl EngineError {
    pub fn code(&self) -> ErrorCode {
        match self {
            EngineError::Syntax(err) => err.code,
            EngineError::Render(err) => err.code,
            EngineError::Pattern(err) => err.code(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            EngineError::Syntax(err) => err.to_diagnostic(),
            EngineError::Render(err) => err.to_diagnostic(),
            EngineError::Pattern(err) => err.to_diagnostic(),
        }
    }

    /// Output rendered before a render failure.
    pub fn partial_output(&self) -> Option<&str> {
        match self {
            EngineError::Render(err) => Some(&err.partial_output),
            _ => None,
        }
    }
}

/// Result of [`TemplateEngine::merge_template`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergedTemplate {
    pub text: String,
    /// The template asks for the created file to be reformatted.
    pub is_reformat: bool,
}

/// Template operations against one resolver.
///
/// The resolver answers `#parse` lookups for every call made through this
/// engine; nothing is kept between calls.
pub struct TemplateEngine<'r> {
    resolver: &'r dyn TemplateResolver,
    config: EngineConfig,
}

impl<'r> TemplateEngine<'r> {
    pub fn new(resolver: &'r dyn TemplateResolver) -> Self {
        TemplateEngine {
            resolver,
            config: EngineConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Attributes `text` reads that are not in `known_names`.
    pub fn collect_attributes(
        &self,
        text: &str,
        known_names: &FxHashSet<String>,
        include_dummies: bool,
    ) -> Result<AttributeSet, ParseError> {
        collect_attributes(text, known_names, include_dummies, self.resolver)
    }

    /// Attributes the user still has to supply for `template`: everything it
    /// reads that is neither in `properties` nor a default property.
    pub fn unset_attributes(
        &self,
        template: &Template,
        properties: &PropertyMap,
    ) -> Result<AttributeSet, ParseError> {
        let known = self.known_names(properties);
        collect_template_attributes(template, &known, false, self.resolver)
    }

    /// Render `text` against `properties` as given.
    pub fn render(&self, text: &str, properties: &PropertyMap) -> Result<String, RenderError> {
        stencil_eval::render(text, properties, self.resolver)
    }

    /// Render `text` with default properties filled in and, unless disabled,
    /// every escaped or missing attribute primed with `""`.
    pub fn merge(&self, text: &str, properties: &PropertyMap) -> Result<String, EngineError> {
        let document = stencil_parse::parse(text)?;
        let mut properties = self.with_defaults(properties);
        if self.config.prime_escaped_references {
            let known = names_of(&properties);
            let dummies = collect_attributes(text, &known, true, self.resolver)?;
            prime(&mut properties, dummies);
        }
        let output = Renderer::new(&properties, self.resolver).render_document(&document)?;
        Ok(output)
    }

    /// [`merge`](Self::merge) for a registered template; a `#parse` back into
    /// the template is a cycle.
    pub fn merge_template(
        &self,
        template: &Template,
        properties: &PropertyMap,
    ) -> Result<MergedTemplate, EngineError> {
        let document = stencil_parse::parse(&template.text)?;
        let mut properties = self.with_defaults(properties);
        if self.config.prime_escaped_references {
            let known = names_of(&properties);
            let dummies = collect_template_attributes(template, &known, true, self.resolver)?;
            prime(&mut properties, dummies);
        }
        let text = Renderer::new(&properties, self.resolver)
            .with_template_name(template.qualified_name())
            .render_document(&document)?;
        tracing::debug!(
            template = %template.qualified_name(),
            bytes = text.len(),
            reformat = template.is_reformat,
            "merged template"
        );
        Ok(MergedTemplate {
            text,
            is_reformat: template.is_reformat,
        })
    }

    /// Pattern recognising rendered instances of `text`.
    pub fn derive_pattern<S: AsRef<str>>(
        &self,
        text: &str,
        known_names: &[S],
    ) -> Result<TemplatePattern, PatternError> {
        stencil_patterns::derive_pattern(text, known_names)
    }

    /// Pattern for a file header template: captures the default properties
    /// and the package attribute.
    pub fn header_pattern(&self, template: &Template) -> Result<TemplatePattern, PatternError> {
        let names = self.config.header_attribute_names();
        stencil_patterns::derive_pattern(&template.text, &names)
    }

    fn with_defaults(&self, properties: &PropertyMap) -> PropertyMap {
        let mut merged = properties.clone();
        self.config.default_properties.fill(&mut merged);
        merged
    }

    fn known_names(&self, properties: &PropertyMap) -> FxHashSet<String> {
        let mut known = names_of(properties);
        known.extend(self.config.default_properties.names().map(str::to_owned));
        known
    }
}

fn names_of(properties: &PropertyMap) -> FxHashSet<String> {
    properties.keys().cloned().collect()
}

fn prime(properties: &mut PropertyMap, dummies: AttributeSet) {
    tracing::trace!(count = dummies.len(), "priming missing attributes");
    for name in dummies {
        properties.insert(name, Value::from(""));
    }
}
