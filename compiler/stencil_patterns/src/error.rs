//! Pattern derivation and matching errors.

use stencil_diagnostic::{Diagnostic, ErrorCode};
use stencil_parse::ParseError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// The template text is not well-formed.
    #[error(transparent)]
    Syntax(#[from] ParseError),
    #[error("derived pattern `{pattern}` does not compile: {message}")]
    Compile { pattern: String, message: String },
    #[error("matching against the derived pattern failed: {message}")]
    Match { message: String },
}

impl PatternError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PatternError::Syntax(err) => err.code,
            PatternError::Compile { .. } => ErrorCode::E3001,
            PatternError::Match { .. } => ErrorCode::E3002,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            PatternError::Syntax(err) => err.to_diagnostic(),
            _ => Diagnostic::error(self.code(), self.to_string()),
        }
    }

    pub(crate) fn compile(pattern: &str, err: &fancy_regex::Error) -> Self {
        PatternError::Compile {
            pattern: pattern.to_owned(),
            message: err.to_string(),
        }
    }

    pub(crate) fn matching(err: &fancy_regex::Error) -> Self {
        PatternError::Match {
            message: err.to_string(),
        }
    }
}
