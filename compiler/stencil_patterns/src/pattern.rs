//! Compiled template patterns and header extraction.

use std::collections::BTreeMap;
use std::ops::Range;

use fancy_regex::{Captures, Regex};

use crate::PatternError;

/// The pattern derived from one template.
#[derive(Clone, Debug)]
pub struct TemplatePattern {
    /// `(?s).*(<body>).*`: finds the template anywhere in a document.
    regex: Regex,
    /// `(?s)^(<body>)$`: the whole text is one instance of the template.
    exact: Regex,
    /// Template offset of each attribute's capturing placeholder.
    offset_to_attribute: BTreeMap<u32, String>,
}

/// A recognised template instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderMatch {
    /// Byte range of the instance in the searched text.
    pub range: Range<usize>,
    /// Each attribute with its captured value, in template order.
    pub properties: Vec<(String, String)>,
}

impl HeaderMatch {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(attribute, _)| attribute == name)
            .map(|(_, value)| value.as_str())
    }
}

impl TemplatePattern {
    /// Compile a pattern body. `offset_to_attribute` must list the
    /// capturing attributes in the order of their groups.
    pub(crate) fn compile(
        body: &str,
        offset_to_attribute: BTreeMap<u32, String>,
    ) -> Result<Self, PatternError> {
        let regex = compile_regex(&format!("(?s).*({body}).*"))?;
        let exact = compile_regex(&format!("(?s)^({body})$"))?;
        Ok(TemplatePattern {
            regex,
            exact,
            offset_to_attribute,
        })
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn offset_to_attribute(&self) -> &BTreeMap<u32, String> {
        &self.offset_to_attribute
    }

    /// Captured attributes in group order.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.offset_to_attribute.values().map(String::as_str)
    }

    /// Capture group of `name`, if it has one.
    pub fn group_of(&self, name: &str) -> Option<usize> {
        self.attributes()
            .position(|attribute| attribute == name)
            .map(|k| k + 2)
    }

    pub fn is_match(&self, document: &str) -> Result<bool, PatternError> {
        self.regex
            .is_match(document)
            .map_err(|err| PatternError::matching(&err))
    }

    /// Find the template inside `document` and read back its attributes.
    pub fn extract(&self, document: &str) -> Result<Option<HeaderMatch>, PatternError> {
        self.read(&self.regex, document)
    }

    /// Read back the attributes of `text` when all of it is one instance.
    pub fn match_instance(&self, text: &str) -> Result<Option<HeaderMatch>, PatternError> {
        self.read(&self.exact, text)
    }

    fn read(&self, regex: &Regex, haystack: &str) -> Result<Option<HeaderMatch>, PatternError> {
        let captures = regex
            .captures(haystack)
            .map_err(|err| PatternError::matching(&err))?;
        Ok(captures.and_then(|captures| self.header_match(&captures)))
    }

    /// Group 1 is the instance; the `k`-th attribute by offset is group `k + 2`.
    fn header_match(&self, captures: &Captures<'_>) -> Option<HeaderMatch> {
        let whole = captures.get(1)?;
        let properties = self
            .attributes()
            .enumerate()
            .filter_map(|(k, name)| {
                captures
                    .get(k + 2)
                    .map(|value| (name.to_owned(), value.as_str().to_owned()))
            })
            .collect();
        Some(HeaderMatch {
            range: whole.start()..whole.end(),
            properties,
        })
    }
}

fn compile_regex(pattern: &str) -> Result<Regex, PatternError> {
    Regex::new(pattern).map_err(|err| PatternError::compile(pattern, &err))
}
