//! Structured diagnostics.

use std::fmt::{self, Write as _};

use stencil_ir::Span;

use crate::span_utils::LineOffsetTable;
use crate::ErrorCode;

/// A reportable problem with a template.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    /// Where in the template text, if known.
    pub span: Option<Span>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Diagnostic {
            code,
            message: message.into(),
            span: None,
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Render against the template source, `rustc`-style:
    ///
    /// ```text
    /// error[E1004]: `#if` is missing its `#end`
    ///  --> Class.java:1:1
    ///   |
    /// 1 | #if($x)
    ///   | ^^^^^^^
    ///   = note: ...
    /// ```
    pub fn render(&self, file_name: &str, source: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{self}");

        if let Some(span) = self.span {
            let table = LineOffsetTable::build(source);
            let (line, col) = table.offset_to_line_col(source, span.start);
            let gutter = line.to_string().len();
            let pad = " ".repeat(gutter);
            let _ = writeln!(out, "{pad}--> {file_name}:{line}:{col}");
            if let Some(text) = table.line_text(source, line) {
                let caret_col = (col as usize).saturating_sub(1);
                let remaining = text.chars().count().saturating_sub(caret_col).max(1);
                let width = (span.len() as usize).clamp(1, remaining);
                let _ = writeln!(out, "{pad} |");
                let _ = writeln!(out, "{line} | {text}");
                let _ = writeln!(
                    out,
                    "{pad} | {}{}",
                    " ".repeat(caret_col),
                    "^".repeat(width)
                );
            }
        }

        for note in &self.notes {
            let _ = writeln!(out, "  = note: {note}");
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code, self.message)
    }
}
