//! Engine configuration and the standard default properties.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use stencil_eval::{PropertyMap, Value};

/// Attribute holding the package of the file being created.
pub const PACKAGE_NAME: &str = "PACKAGE_NAME";

/// Properties every template receives without asking: the current user and
/// date/time fields, plus anything the host adds.
///
/// Order is preserved; header patterns are derived with these names first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefaultProperties {
    values: IndexMap<String, String>,
}

impl DefaultProperties {
    /// The standard date, time and user properties at `now`.
    pub fn capture(now: &NaiveDateTime, user: impl Into<String>) -> Self {
        let fields = [
            ("DATE", "%-m/%-d/%y"),
            ("TIME", "%-I:%M %p"),
            ("YEAR", "%Y"),
            ("MONTH", "%m"),
            ("MONTH_NAME_SHORT", "%b"),
            ("MONTH_NAME_FULL", "%B"),
            ("DAY", "%d"),
            ("DAY_NAME_SHORT", "%a"),
            ("DAY_NAME_FULL", "%A"),
            ("HOUR", "%H"),
            ("MINUTE", "%M"),
            ("SECOND", "%S"),
        ];

        let mut values = IndexMap::with_capacity(fields.len() + 1);
        values.insert("USER".to_owned(), user.into());
        for (name, format) in fields {
            values.insert(name.to_owned(), now.format(format).to_string());
        }
        DefaultProperties { values }
    }

    /// [`capture`](Self::capture) with the user from `USER` or `USERNAME`.
    pub fn from_env(now: &NaiveDateTime) -> Self {
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_default();
        DefaultProperties::capture(now, user)
    }

    /// Add or replace a fixed property such as `PROJECT_NAME`.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy into `properties`, keeping values the caller already set.
    pub fn fill(&self, properties: &mut PropertyMap) {
        for (name, value) in &self.values {
            properties
                .entry(name.clone())
                .or_insert_with(|| Value::from(value.as_str()));
        }
    }
}

/// Settings for a [`TemplateEngine`](crate::TemplateEngine).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub default_properties: DefaultProperties,
    /// Appended after the default property names when deriving header
    /// patterns.
    pub package_attribute: String,
    /// Run the dummy collection pass before rendering in `merge`, so that
    /// escaped references lose one backslash.
    pub prime_escaped_references: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            default_properties: DefaultProperties::default(),
            package_attribute: PACKAGE_NAME.to_owned(),
            prime_escaped_references: true,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_default_properties(mut self, default_properties: DefaultProperties) -> Self {
        self.default_properties = default_properties;
        self
    }

    #[must_use]
    pub fn with_package_attribute(mut self, name: impl Into<String>) -> Self {
        self.package_attribute = name.into();
        self
    }

    #[must_use]
    pub fn with_prime_escaped_references(mut self, prime: bool) -> Self {
        self.prime_escaped_references = prime;
        self
    }

    /// Names a header pattern captures: default properties, then the
    /// package attribute.
    pub fn header_attribute_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.default_properties.names().collect();
        if !names.contains(&self.package_attribute.as_str()) {
            names.push(&self.package_attribute);
        }
        names
    }
}
