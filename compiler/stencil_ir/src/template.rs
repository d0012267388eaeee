//! Named templates and include resolution.

/// A file template: a name, the extension of the files it creates, and its text.
///
/// Identity is the name. The engine only ever borrows a template for the
/// duration of one operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub extension: String,
    pub text: String,
    /// Whether created files should be reformatted after rendering.
    pub is_reformat: bool,
}

impl Template {
    pub fn new(name: impl Into<String>, extension: impl Into<String>, text: impl Into<String>) -> Self {
        Template {
            name: name.into(),
            extension: extension.into(),
            text: text.into(),
            is_reformat: false,
        }
    }

    #[must_use]
    pub fn with_reformat(mut self, is_reformat: bool) -> Self {
        self.is_reformat = is_reformat;
        self
    }

    /// `name.extension`, or just `name` when there is no extension.
    ///
    /// This is the form `#parse("File Header.java")` refers to.
    pub fn qualified_name(&self) -> String {
        if self.extension.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.name, self.extension)
        }
    }

    /// Whether `#parse(path)` refers to this template.
    pub fn answers_to(&self, path: &str) -> bool {
        if self.extension.is_empty() {
            return path == self.name;
        }
        path == self.name
            || path
                .strip_prefix(self.name.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .is_some_and(|ext| ext == self.extension)
    }
}

/// Resolves `#parse` targets to templates.
///
/// Passed explicitly to every operation that may follow includes.
pub trait TemplateResolver {
    fn resolve(&self, path: &str) -> Option<&Template>;
}

/// Resolver for callers without a registry: every include is unresolved.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoIncludes;

impl TemplateResolver for NoIncludes {
    fn resolve(&self, _path: &str) -> Option<&Template> {
        None
    }
}

impl<R: TemplateResolver + ?Sized> TemplateResolver for &R {
    fn resolve(&self, path: &str) -> Option<&Template> {
        (**self).resolve(path)
    }
}
