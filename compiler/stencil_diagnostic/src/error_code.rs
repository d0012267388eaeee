//! Error codes for all engine diagnostics.
//!
//! Format: E#### where the first digit is the phase:
//! - E0xxx: lexical errors in template text
//! - E1xxx: directive parse errors
//! - E3xxx: pattern derivation errors
//! - E6xxx: render errors
//! - E9xxx: internal errors

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexical Errors (E0xxx)
    /// Unterminated `${` reference
    E0001,
    /// Unterminated string literal
    E0002,
    /// Unterminated `#*` block comment
    E0003,
    /// Unterminated `#[[` unparsed block
    E0004,
    /// Template text too large
    E0005,

    // Parse Errors (E1xxx)
    /// Unexpected token in directive arguments
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed directive parenthesis
    E1003,
    /// Block directive missing `#end`
    E1004,
    /// `#end`, `#else` or `#elseif` without an open block
    E1005,
    /// Expected a reference
    E1006,
    /// Invalid number literal
    E1007,

    // Pattern Errors (E3xxx)
    /// Derived pattern failed to compile
    E3001,
    /// Matching a derived pattern failed
    E3002,

    // Render Errors (E6xxx)
    /// Unsupported directive
    E6001,
    /// Operand type error
    E6002,
    /// Recursive include
    E6003,
    /// Value cannot be iterated
    E6004,
    /// Included template not found
    E6005,

    // Internal Errors (E9xxx)
    /// Internal engine error
    E9001,
}

impl ErrorCode {
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E6001,
        ErrorCode::E6002,
        ErrorCode::E6003,
        ErrorCode::E6004,
        ErrorCode::E6005,
        ErrorCode::E9001,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line explanation, shown by `stencil explain`.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "a `${` reference is missing its closing `}`",
            ErrorCode::E0002 => "a string literal in a directive is missing its closing quote",
            ErrorCode::E0003 => "a `#*` block comment is missing its closing `*#`",
            ErrorCode::E0004 => "a `#[[` unparsed block is missing its closing `]]#`",
            ErrorCode::E0005 => "the template text exceeds 4 GiB",
            ErrorCode::E1001 => "unexpected input inside directive arguments",
            ErrorCode::E1002 => "a directive argument expected an expression",
            ErrorCode::E1003 => "a directive's argument list is missing its closing `)`",
            ErrorCode::E1004 => "an `#if` or `#foreach` block is missing its `#end`",
            ErrorCode::E1005 => "`#end`, `#else` or `#elseif` appears outside any block",
            ErrorCode::E1006 => "a directive expected a `$reference` here",
            ErrorCode::E1007 => "an integer literal is out of range",
            ErrorCode::E3001 => "the pattern derived from the template did not compile",
            ErrorCode::E3002 => "matching a derived pattern exceeded the backtracking limit",
            ErrorCode::E6001 => "the directive is recognised but cannot be rendered",
            ErrorCode::E6002 => "an operator was applied to values of the wrong type",
            ErrorCode::E6003 => "a template includes itself, directly or indirectly",
            ErrorCode::E6004 => "`#foreach` was given a value that is not a list or range",
            ErrorCode::E6005 => "`#parse`, `#include` or `#evaluate` named a template that does not exist",
            ErrorCode::E9001 => "internal engine error",
        }
    }

    /// Parse a code such as `"E1004"` (case-insensitive).
    pub fn from_code(code: &str) -> Option<ErrorCode> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests;
